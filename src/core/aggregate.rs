use crate::core::normalize::identity_key;
use crate::domain::model::{CellValue, Dataset, MergePolicy, Record};
use crate::domain::schema::{IDENTITY_COLUMN, SUMMARY_SENTINEL};
use std::collections::HashMap;

/// 同一位客服累積中的資料
struct Group {
    identity: CellValue,
    totals: Vec<f64>,
    values: HashMap<String, CellValue>,
}

impl MergePolicy {
    /// 決定非時間欄位要不要以新值取代目前的值。缺值永遠不會取代已有的值。
    pub fn resolve(&self, current: Option<&CellValue>, incoming: &CellValue) -> bool {
        if incoming.is_missing() {
            return current.is_none();
        }
        match self {
            MergePolicy::FirstWins => current.map_or(true, CellValue::is_missing),
            MergePolicy::LastWins => true,
        }
    }
}

/// 依客服名稱分組：時間欄位加總，其他欄位依 `policy` 取值，
/// 最後附上一列 Average（各時間欄位對每位客服總和取平均）。
///
/// 沒有任何時間欄位時只做分組，不附 Average 列。
/// 輸出欄位順序：客服名稱、時間欄位、其他欄位。
pub fn aggregate(dataset: &Dataset, duration_columns: &[String], policy: MergePolicy) -> Dataset {
    let passthrough: Vec<String> = dataset
        .columns
        .iter()
        .filter(|c| c.as_str() != IDENTITY_COLUMN && !duration_columns.contains(c))
        .cloned()
        .collect();

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Group> = HashMap::new();

    for record in &dataset.records {
        let Some(key) = identity_key(record.get(IDENTITY_COLUMN)) else {
            continue;
        };

        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Group {
                identity: record.get(IDENTITY_COLUMN).cloned().unwrap_or_default(),
                totals: vec![0.0; duration_columns.len()],
                values: HashMap::new(),
            }
        });

        for (total, column) in group.totals.iter_mut().zip(duration_columns) {
            *total += record.get(column).and_then(CellValue::as_f64).unwrap_or(0.0);
        }

        for column in &passthrough {
            let Some(incoming) = record.get(column) else {
                continue;
            };
            if policy.resolve(group.values.get(column), incoming) {
                group.values.insert(column.clone(), incoming.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(1 + duration_columns.len() + passthrough.len());
    columns.push(IDENTITY_COLUMN.to_string());
    columns.extend(duration_columns.iter().cloned());
    columns.extend(passthrough.iter().cloned());

    let mut out = Dataset::new(columns);
    let mut sums = vec![0.0; duration_columns.len()];

    for key in &order {
        let Some(group) = groups.remove(key) else {
            continue;
        };

        let mut record = Record::new();
        record.set(IDENTITY_COLUMN, group.identity);
        for ((column, total), sum) in duration_columns.iter().zip(group.totals).zip(sums.iter_mut()) {
            *sum += total;
            record.set(column.clone(), CellValue::Number(total));
        }
        for column in &passthrough {
            let value = group.values.get(column).cloned().unwrap_or_default();
            record.set(column.clone(), value);
        }
        out.push(record);
    }

    tracing::debug!(
        "Aggregated {} row(s) into {} group(s)",
        dataset.len(),
        order.len()
    );

    if duration_columns.is_empty() {
        return out;
    }

    out.push(summary_record(duration_columns, &passthrough, &sums, order.len()));
    out
}

/// Average 列：各時間欄位的總和除以客服人數；沒有任何客服時平均值定義為 0
fn summary_record(
    duration_columns: &[String],
    passthrough: &[String],
    sums: &[f64],
    groups: usize,
) -> Record {
    let mut record = Record::new();
    record.set(IDENTITY_COLUMN, CellValue::text(SUMMARY_SENTINEL));
    for (column, sum) in duration_columns.iter().zip(sums) {
        let mean = if groups == 0 { 0.0 } else { sum / groups as f64 };
        record.set(column.clone(), CellValue::Number(mean));
    }
    for column in passthrough {
        record.set(column.clone(), CellValue::Empty);
    }
    record
}
