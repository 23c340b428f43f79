use crate::core::duration;
use crate::domain::model::{CellValue, Dataset, Record, SourceFile};
use crate::domain::ports::SheetDecoder;
use crate::utils::error::{MergeError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::io::Cursor;

/// 可以讀取的副檔名
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

/// 依副檔名選擇解碼方式：活頁簿交給 calamine（只讀第一個工作表），`.csv` 交給 csv crate。
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl SpreadsheetDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl SheetDecoder for SpreadsheetDecoder {
    fn decode(&self, source: &SourceFile) -> Result<Dataset> {
        let extension = source.extension();
        match extension.as_str() {
            "csv" => decode_csv(&source.bytes),
            ext if SUPPORTED_EXTENSIONS.contains(&ext) => decode_workbook(source),
            _ => Err(MergeError::UnsupportedFormat {
                source_name: source.name.clone(),
                extension,
            }),
        }
    }
}

fn decode_workbook(source: &SourceFile) -> Result<Dataset> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(source.bytes.as_slice()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MergeError::decode(&source.name, "workbook has no worksheets"))??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        tracing::warn!("⚠️ '{}' has an empty first sheet", source.name);
        return Ok(Dataset::default());
    };

    let columns = header_names(header_row.iter().map(header_text));
    let mut dataset = Dataset::new(columns);

    for row in rows {
        let cells: Vec<CellValue> = (0..dataset.columns.len())
            .map(|i| row.get(i).map(cell_from_data).unwrap_or_default())
            .collect();
        push_row(&mut dataset, cells);
    }
    Ok(dataset)
}

fn decode_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let columns = header_names(reader.headers()?.iter().map(str::to_string));
    let mut dataset = Dataset::new(columns);

    for row in reader.records() {
        let row = row?;
        let cells: Vec<CellValue> = (0..dataset.columns.len())
            .map(|i| row.get(i).map(cell_from_text).unwrap_or_default())
            .collect();
        push_row(&mut dataset, cells);
    }
    Ok(dataset)
}

/// 整列空白的資料直接略過
fn push_row(dataset: &mut Dataset, cells: Vec<CellValue>) {
    if cells.iter().all(CellValue::is_blank) {
        return;
    }
    let data = dataset.columns.iter().cloned().zip(cells).collect();
    dataset.push(Record { data });
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
        other => cell_from_data(other).to_string(),
    }
}

/// 空白標題命名為 `Unnamed: <n>`，重複標題依序加上 `.1`、`.2`
fn header_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (index, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            name
        };

        let mut candidate = base.clone();
        while names.contains(&candidate) {
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{}.{}", base, count);
        }
        names.push(candidate);
    }
    names
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::String(v) => CellValue::Text(v.clone()),
        Data::Bool(v) => CellValue::text(if *v { "TRUE" } else { "FALSE" }),
        Data::DateTime(v) => date_time_cell(v.as_f64(), v.is_duration()),
        Data::DateTimeIso(v) | Data::DurationIso(v) => CellValue::Text(v.clone()),
    }
}

/// 時間長度（或不足一天的時刻）轉成 `H:MM:SS` 文字，讓匯出的檔案再讀回來時秒數不變；
/// 其他日期時間轉成 `YYYY-MM-DD HH:MM:SS`。
fn date_time_cell(days: f64, is_duration: bool) -> CellValue {
    if is_duration || (0.0..1.0).contains(&days) {
        let seconds = (days * duration::SECONDS_PER_DAY).round();
        return CellValue::Text(duration::encode_text(Some(seconds)));
    }

    let millis = (days * duration::SECONDS_PER_DAY * 1000.0).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.and_hms_opt(0, 0, 0))
        .and_then(|epoch| epoch.checked_add_signed(Duration::milliseconds(millis)))
        .map(|dt| CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
        .unwrap_or(CellValue::Number(days))
}

fn cell_from_text(text: &str) -> CellValue {
    if text.trim().is_empty() {
        return CellValue::Empty;
    }
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(text.to_string()),
    }
}
