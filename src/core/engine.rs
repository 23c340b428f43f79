use crate::domain::model::MergeReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use std::path::Path;

/// 執行一次完整的合併：讀取 → 合併彙總 → 寫出。
/// 引擎本身不保留每次執行的狀態，失敗後可以直接再執行。
pub struct MergeEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> MergeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub async fn run(&self) -> Result<MergeReport> {
        let mut monitor = RunMonitor::new(self.monitor_enabled);
        tracing::info!("🚀 Starting merge");

        // Extract
        let datasets = self.pipeline.extract().await?;
        let rows: usize = datasets.iter().map(|d| d.len()).sum();
        tracing::info!("Read {} file(s) with {} row(s)", datasets.len(), rows);
        monitor.phase_done("extract");

        // Transform
        let result = self.pipeline.transform(datasets).await?;
        tracing::info!(
            "Aggregated into {} collector(s) over {} time column(s)",
            result.group_count(),
            result.duration_columns.len()
        );
        monitor.phase_done("transform");

        // Load
        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);
        monitor.phase_done("load");
        monitor.finish();

        let file_name = Path::new(&output_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(MergeReport {
            output_path,
            file_name,
            source_count: result.source_count,
            input_rows: result.input_rows,
            groups: result.group_count(),
            duration_columns: result.duration_columns,
            preview: result.preview,
        })
    }
}
