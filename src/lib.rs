pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, MemoryStorage, SpreadsheetDecoder, XlsxEncoder};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::{
    engine::MergeEngine,
    merge::{merge_datasets, merge_sources},
    pipeline::SheetMergePipeline,
};
pub use domain::model::{
    CellValue, Dataset, EmptyResultPolicy, MergeOptions, MergePolicy, MergeReport, MergeResult,
    Record, SourceFile,
};
pub use utils::error::{MergeError, Result};
