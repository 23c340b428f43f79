use crate::domain::model::{Dataset, ExportSheet, MergeOptions, MergeResult, SourceFile};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn merge_options(&self) -> MergeOptions;
}

/// 把一個上傳檔案（只取第一個工作表）解成資料集
pub trait SheetDecoder: Send + Sync {
    fn decode(&self, source: &SourceFile) -> Result<Dataset>;
}

/// 把輸出工作表編碼成檔案內容
pub trait SheetEncoder: Send + Sync {
    fn encode(&self, sheet: &ExportSheet) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Dataset>>;
    async fn transform(&self, data: Vec<Dataset>) -> Result<MergeResult>;
    async fn load(&self, result: &MergeResult) -> Result<String>;
}
