use crate::core::duration::{self, DURATION_NUM_FORMAT};
use crate::domain::model::{CellStyle, CellValue, Dataset, ExportCell, ExportSheet, ExportValue};
use crate::domain::schema::{IDENTITY_COLUMN, OUTPUT_SHEET_NAME};
use chrono::NaiveDateTime;

const COLUMN_GAP: &str = "  ";

/// 輸出檔名：`Merged_Excel_<YYYYMMDD_HHMMSS>.xlsx`
pub fn output_file_name(completed_at: NaiveDateTime) -> String {
    format!("Merged_Excel_{}.xlsx", completed_at.format("%Y%m%d_%H%M%S"))
}

fn is_duration(column: &str, duration_columns: &[String]) -> bool {
    duration_columns.iter().any(|c| c == column)
}

/// 預覽用的純文字表格。時間欄位顯示為 `H:MM:SS`，
/// 客服名稱靠左，其他欄位靠右。
pub fn to_preview(dataset: &Dataset, duration_columns: &[String]) -> String {
    let rows: Vec<Vec<String>> = dataset
        .records
        .iter()
        .map(|record| {
            dataset
                .columns
                .iter()
                .map(|column| {
                    let cell = record.get(column);
                    if is_duration(column, duration_columns) {
                        duration::encode_text(cell.and_then(CellValue::as_f64))
                    } else {
                        cell.map(ToString::to_string).unwrap_or_default()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(&dataset.columns)
            .zip(&widths)
            .map(|((cell, column), width)| {
                if column == IDENTITY_COLUMN {
                    format!("{:<width$}", cell, width = *width)
                } else {
                    format!("{:>width$}", cell, width = *width)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(&dataset.columns));
    lines.extend(rows.iter().map(|row| render(row)));
    lines.join("\n")
}

/// 匯出用的儲存格與格式指示。
///
/// 時間欄位轉成以天為單位的數值並套用 `[h]:mm:ss`；
/// 客服名稱以外的每一欄（含標題）都靠右對齊。
pub fn to_export(dataset: &Dataset, duration_columns: &[String]) -> ExportSheet {
    let header_style = |column: &str| CellStyle {
        align_right: column != IDENTITY_COLUMN,
        num_format: None,
    };

    let header = dataset
        .columns
        .iter()
        .map(|column| ExportCell {
            value: ExportValue::Text(column.clone()),
            style: header_style(column),
        })
        .collect();

    let rows = dataset
        .records
        .iter()
        .map(|record| {
            dataset
                .columns
                .iter()
                .map(|column| {
                    let cell = record.get(column);
                    if is_duration(column, duration_columns) {
                        let seconds = duration::decode(cell);
                        ExportCell {
                            value: ExportValue::Number(duration::encode_fraction_of_day(seconds)),
                            style: CellStyle {
                                align_right: true,
                                num_format: Some(DURATION_NUM_FORMAT),
                            },
                        }
                    } else {
                        ExportCell {
                            value: export_value(cell),
                            style: header_style(column),
                        }
                    }
                })
                .collect()
        })
        .collect();

    ExportSheet {
        sheet_name: OUTPUT_SHEET_NAME.to_string(),
        header,
        rows,
    }
}

fn export_value(cell: Option<&CellValue>) -> ExportValue {
    match cell {
        Some(CellValue::Number(n)) if n.is_finite() => ExportValue::Number(*n),
        Some(CellValue::Text(s)) => ExportValue::Text(s.clone()),
        _ => ExportValue::Empty,
    }
}
