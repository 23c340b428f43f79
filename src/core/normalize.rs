use crate::core::duration;
use crate::domain::model::{CellValue, Dataset};
use crate::domain::schema::{DROPPED_COLUMNS, DURATION_COLUMNS, IDENTITY_COLUMN};
use crate::utils::error::{MergeError, Result};

/// 移除固定的無用欄位；不存在的欄位直接略過
pub fn drop_irrelevant_columns(dataset: &mut Dataset) {
    let before = dataset.columns.len();
    dataset
        .columns
        .retain(|column| !DROPPED_COLUMNS.contains(&column.as_str()));

    if dataset.columns.len() == before {
        return;
    }

    for record in &mut dataset.records {
        for column in DROPPED_COLUMNS {
            record.remove(column);
        }
    }
    tracing::debug!("Dropped {} irrelevant column(s)", before - dataset.columns.len());
}

/// 移除客服名稱為空、空字串或只有空白的資料列。
/// 整份資料沒有客服名稱欄位時回傳 `MergeError::Schema`。
pub fn filter_valid_identity(dataset: &mut Dataset) -> Result<()> {
    if !dataset.has_column(IDENTITY_COLUMN) {
        return Err(MergeError::schema(format!(
            "{} column not found in the data.",
            IDENTITY_COLUMN
        )));
    }

    let before = dataset.len();
    dataset
        .records
        .retain(|record| identity_key(record.get(IDENTITY_COLUMN)).is_some());

    let removed = before - dataset.len();
    if removed > 0 {
        tracing::debug!("Removed {} row(s) without a {}", removed, IDENTITY_COLUMN);
    }
    Ok(())
}

/// 分組用的鍵。空白的客服名稱回傳 `None`。
pub fn identity_key(value: Option<&CellValue>) -> Option<String> {
    match value {
        Some(cell) if !cell.is_blank() => Some(cell.to_string()),
        _ => None,
    }
}

/// 依固定順序列出實際存在的時間欄位
pub fn select_present_duration_columns(dataset: &Dataset) -> Vec<String> {
    DURATION_COLUMNS
        .iter()
        .filter(|column| dataset.has_column(column))
        .map(|column| column.to_string())
        .collect()
}

/// 將時間欄位的每一格轉成秒數；來源檔缺少的欄位視為 0
pub fn decode_duration_columns(dataset: &mut Dataset, duration_columns: &[String]) {
    for record in &mut dataset.records {
        for column in duration_columns {
            let seconds = duration::decode(record.get(column));
            record.set(column.clone(), CellValue::Number(seconds));
        }
    }
}
