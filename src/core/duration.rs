//! 時間長度的編碼與解碼。內部一律以秒數計算。

use crate::domain::model::CellValue;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// 試算表顯示格式，小時數超過 24 不歸零
pub const DURATION_NUM_FORMAT: &str = "[h]:mm:ss";

/// 將儲存格轉成秒數。數字視為已是秒數；文字接受 `H:MM:SS` 或 `MM:SS`。
/// 無法解析或缺值一律回傳 0，不會回傳錯誤。
pub fn decode(value: Option<&CellValue>) -> f64 {
    match value {
        Some(CellValue::Number(n)) if n.is_finite() => *n,
        Some(CellValue::Text(text)) => parse_clock(text).map(|s| s as f64).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 解析 `H:MM:SS` / `MM:SS`，每段前後空白會先去掉，各段須為整數
pub fn parse_clock(text: &str) -> Option<i64> {
    let parts = text
        .split(':')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    match parts.as_slice() {
        [h, m, s] => Some(h * 3600 + m * 60 + s),
        [m, s] => Some(m * 60 + s),
        _ => None,
    }
}

/// 秒數轉成 `H:MM:SS`，小數秒捨去
pub fn encode_text(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s.is_finite() => s.trunc() as i64,
        _ => return "0:00:00".to_string(),
    };

    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}{}:{:02}:{:02}", sign, hours, minutes, secs)
}

/// 秒數轉成試算表原生的「天」為單位的值，搭配 [`DURATION_NUM_FORMAT`]
pub fn encode_fraction_of_day(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY
}
