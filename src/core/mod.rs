pub mod aggregate;
pub mod duration;
pub mod engine;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod present;

pub use crate::domain::model::{Dataset, MergeResult, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SheetDecoder, SheetEncoder, Storage};
pub use crate::utils::error::Result;
