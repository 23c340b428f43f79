use crate::core::{aggregate, normalize, present};
use crate::domain::model::{Dataset, EmptyResultPolicy, MergeOptions, MergeResult, SourceFile};
use crate::domain::ports::SheetDecoder;
use crate::utils::error::{MergeError, Result};

/// 串接多份資料集。欄位取聯集，依第一次出現的順序排列；
/// 來源沒有的欄位在該來源的資料列中保持缺值。
pub fn concat_datasets(datasets: Vec<Dataset>) -> Dataset {
    let mut merged = Dataset::default();
    for dataset in datasets {
        for column in dataset.columns {
            if !merged.has_column(&column) {
                merged.columns.push(column);
            }
        }
        merged.records.extend(dataset.records);
    }
    merged
}

/// 合併並彙總已解析的資料集
pub fn merge_datasets(datasets: Vec<Dataset>, options: &MergeOptions) -> Result<MergeResult> {
    if datasets.is_empty() {
        return Err(MergeError::NoInput);
    }

    let source_count = datasets.len();
    let mut merged = concat_datasets(datasets);
    let input_rows = merged.len();
    tracing::debug!(
        "Concatenated {} dataset(s): {} row(s), {} column(s)",
        source_count,
        input_rows,
        merged.columns.len()
    );

    normalize::drop_irrelevant_columns(&mut merged);
    normalize::filter_valid_identity(&mut merged)?;

    if merged.is_empty() {
        match options.empty_result {
            EmptyResultPolicy::Error => return Err(MergeError::EmptyResult { sources: source_count }),
            EmptyResultPolicy::ZeroSummary => {
                tracing::warn!("⚠️ No rows with a Collector Name; output holds only the Average row");
            }
        }
    }

    let duration_columns = normalize::select_present_duration_columns(&merged);
    if duration_columns.is_empty() {
        tracing::warn!("⚠️ No known time columns found, rows are grouped without an Average row");
    }
    normalize::decode_duration_columns(&mut merged, &duration_columns);

    let dataset = aggregate::aggregate(&merged, &duration_columns, options.merge_policy);
    let preview = present::to_preview(&dataset, &duration_columns);
    let export = present::to_export(&dataset, &duration_columns);

    Ok(MergeResult {
        dataset,
        duration_columns,
        source_count,
        input_rows,
        preview,
        export,
    })
}

/// 依序解碼每個上傳檔案後合併。任何一個檔案解碼失敗都會讓整次合併失敗。
pub fn merge_sources<D: SheetDecoder>(
    sources: &[SourceFile],
    decoder: &D,
    options: &MergeOptions,
) -> Result<MergeResult> {
    let datasets = decode_sources(sources, decoder)?;
    merge_datasets(datasets, options)
}

pub fn decode_sources<D: SheetDecoder>(sources: &[SourceFile], decoder: &D) -> Result<Vec<Dataset>> {
    let mut datasets = Vec::with_capacity(sources.len());
    for source in sources {
        let dataset = decoder.decode(source).map_err(|e| match e {
            MergeError::Decode { .. } | MergeError::UnsupportedFormat { .. } => e,
            other => MergeError::decode(&source.name, other),
        })?;
        tracing::debug!(
            "Decoded '{}': {} row(s), {} column(s)",
            source.name,
            dataset.len(),
            dataset.columns.len()
        );
        datasets.push(dataset);
    }
    Ok(datasets)
}
