// Adapters layer: concrete implementations of the domain ports (spreadsheet codec, storage).

pub mod spreadsheet;
pub mod storage;
pub mod xlsx;

pub use spreadsheet::SpreadsheetDecoder;
pub use storage::{LocalStorage, MemoryStorage};
pub use xlsx::XlsxEncoder;
