use crate::core::merge::{decode_sources, merge_datasets};
use crate::core::present::output_file_name;
use crate::domain::model::{Dataset, MergeResult, SourceFile};
use crate::domain::ports::{ConfigProvider, Pipeline, SheetDecoder, SheetEncoder, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// 讀取設定中的每個檔案、合併彙總後寫出 `Merged_Excel_<時間>.xlsx`
pub struct SheetMergePipeline<S: Storage, C: ConfigProvider, D: SheetDecoder, E: SheetEncoder> {
    storage: S,
    config: C,
    decoder: D,
    encoder: E,
}

impl<S: Storage, C: ConfigProvider, D: SheetDecoder, E: SheetEncoder> SheetMergePipeline<S, C, D, E> {
    pub fn new(storage: S, config: C, decoder: D, encoder: E) -> Self {
        Self {
            storage,
            config,
            decoder,
            encoder,
        }
    }
}

#[async_trait::async_trait]
impl<S, C, D, E> Pipeline for SheetMergePipeline<S, C, D, E>
where
    S: Storage,
    C: ConfigProvider,
    D: SheetDecoder,
    E: SheetEncoder,
{
    async fn extract(&self) -> Result<Vec<Dataset>> {
        let mut sources = Vec::with_capacity(self.config.input_files().len());

        // 依序讀取，不併發
        for path in self.config.input_files() {
            tracing::debug!("Reading input file: {}", path);
            let bytes = self.storage.read_file(path).await?;
            let name = Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(path)
                .to_string();
            sources.push(SourceFile::new(name, bytes));
        }

        tracing::info!("📥 Loaded {} file(s)", sources.len());
        decode_sources(&sources, &self.decoder)
    }

    async fn transform(&self, data: Vec<Dataset>) -> Result<MergeResult> {
        merge_datasets(data, &self.config.merge_options())
    }

    async fn load(&self, result: &MergeResult) -> Result<String> {
        let bytes = self.encoder.encode(&result.export)?;

        let file_name = output_file_name(chrono::Local::now().naive_local());
        let output_path = Path::new(self.config.output_path())
            .join(&file_name)
            .to_string_lossy()
            .into_owned();

        tracing::debug!("Writing workbook ({} bytes) to {}", bytes.len(), output_path);
        self.storage.write_file(&output_path, &bytes).await?;

        Ok(output_path)
    }
}
