//! 客服報表的固定欄位定義。名稱需與來源報表完全一致（區分大小寫）。

/// 用來分組的客服名稱欄位
pub const IDENTITY_COLUMN: &str = "Collector Name";

/// 合併前直接移除的欄位
pub const DROPPED_COLUMNS: [&str; 3] = ["SNo.", "Total Calls", "Pause Count"];

/// 需要加總與平均的時間欄位，輸出時依此順序排列
pub const DURATION_COLUMNS: [&str; 8] = [
    "Spent Time",
    "Talk Time",
    "AVG Talk Time",
    "Wait Time",
    "Average Wait Time",
    "Write Time",
    "AVG Write Time",
    "Pause Time",
];

/// 平均列在客服名稱欄位的值
pub const SUMMARY_SENTINEL: &str = "Average";

/// 輸出工作表名稱
pub const OUTPUT_SHEET_NAME: &str = "Sheet1";
