use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 單一儲存格的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 沒有值：空儲存格或 NaN。空白字串仍算有值
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(_) => false,
        }
    }

    /// 空值、空字串或只有空白都視為空白
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 一列資料。欄位不在 `data` 裡代表該來源檔沒有這個欄位，
/// 與存在但空白的 `CellValue::Empty` 不同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.data.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: CellValue) {
        self.data.insert(column.into(), value);
    }

    pub fn remove(&mut self, column: &str) -> Option<CellValue> {
        self.data.remove(column)
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value.into());
        self
    }
}

/// 有序的資料集：欄位順序由 `columns` 決定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    pub fn from_rows<C, R, V>(columns: &[C], rows: R) -> Self
    where
        C: AsRef<str>,
        R: IntoIterator<Item = Vec<V>>,
        V: Into<CellValue>,
    {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let records = rows
            .into_iter()
            .map(|row| Record {
                data: columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(Into::into))
                    .collect(),
            })
            .collect();
        Self { columns, records }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// 某欄位的所有值，缺少的欄位以 `None` 表示
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a CellValue>> + 'a {
        self.records.iter().map(move |r| r.get(column))
    }
}

/// 上傳的單一檔案
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 小寫副檔名，沒有則為空字串
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

/// 非時間欄位在同一位客服的多筆資料間如何取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MergePolicy {
    /// 保留第一筆出現的值
    #[default]
    #[serde(alias = "first")]
    #[cfg_attr(feature = "cli", value(alias = "first"))]
    FirstWins,
    /// 保留最後一筆的值
    #[serde(alias = "last")]
    #[cfg_attr(feature = "cli", value(alias = "last"))]
    LastWins,
}

/// 過濾後沒有任何資料列時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EmptyResultPolicy {
    /// 只輸出 Average 列，平均值定義為 0
    #[default]
    #[serde(alias = "zero")]
    #[cfg_attr(feature = "cli", value(alias = "zero"))]
    ZeroSummary,
    /// 回傳 `MergeError::EmptyResult`
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergeOptions {
    #[serde(default)]
    pub merge_policy: MergePolicy,
    #[serde(default)]
    pub empty_result: EmptyResultPolicy,
}

/// 寫出時的儲存格格式指示
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CellStyle {
    pub align_right: bool,
    pub num_format: Option<&'static str>,
}

impl CellStyle {
    pub fn is_plain(&self) -> bool {
        !self.align_right && self.num_format.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportValue {
    Empty,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportCell {
    pub value: ExportValue,
    pub style: CellStyle,
}

/// 交給試算表寫入器的單一工作表內容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSheet {
    pub sheet_name: String,
    pub header: Vec<ExportCell>,
    pub rows: Vec<Vec<ExportCell>>,
}

#[derive(Debug, Clone)]
pub struct MergeResult {
    /// 彙總後的資料，時間欄位以秒數儲存
    pub dataset: Dataset,
    pub duration_columns: Vec<String>,
    pub source_count: usize,
    pub input_rows: usize,
    pub preview: String,
    pub export: ExportSheet,
}

impl MergeResult {
    /// 不含 Average 列的客服人數
    pub fn group_count(&self) -> usize {
        if self.duration_columns.is_empty() {
            self.dataset.len()
        } else {
            self.dataset.len().saturating_sub(1)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub output_path: String,
    pub file_name: String,
    pub source_count: usize,
    pub input_rows: usize,
    pub groups: usize,
    pub duration_columns: Vec<String>,
    pub preview: String,
}
