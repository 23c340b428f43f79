use agent_summarizer::domain::ports::ConfigProvider;
use agent_summarizer::{
    EmptyResultPolicy, MemoryStorage, MergeEngine, MergeError, MergeOptions, MergePolicy,
    SheetMergePipeline, SpreadsheetDecoder, XlsxEncoder,
};
use anyhow::Result;

struct TestConfig {
    inputs: Vec<String>,
    options: MergeOptions,
}

impl TestConfig {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            options: MergeOptions::default(),
        }
    }
}

impl ConfigProvider for TestConfig {
    fn input_files(&self) -> &[String] {
        &self.inputs
    }

    fn output_path(&self) -> &str {
        "merged"
    }

    fn merge_options(&self) -> MergeOptions {
        self.options
    }
}

fn engine(
    storage: MemoryStorage,
    config: TestConfig,
) -> MergeEngine<SheetMergePipeline<MemoryStorage, TestConfig, SpreadsheetDecoder, XlsxEncoder>> {
    MergeEngine::new(SheetMergePipeline::new(
        storage,
        config,
        SpreadsheetDecoder,
        XlsxEncoder,
    ))
}

#[tokio::test]
async fn test_engine_can_run_again_after_failure() -> Result<()> {
    let storage = MemoryStorage::new();
    let engine = engine(storage.clone(), TestConfig::new(&["uploads/day1.csv"]));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, MergeError::Io(_)));
    assert!(storage.paths().await.is_empty());

    storage
        .insert(
            "uploads/day1.csv",
            b"SNo.,Collector Name,Talk Time\n1,Alice,00:10:00\n2,Alice,00:05:00\n".to_vec(),
        )
        .await;

    let report = engine.run().await?;
    assert_eq!(report.groups, 1);
    assert!(report.output_path.starts_with("merged"));
    assert!(storage.get(&report.output_path).await.is_some());
    assert!(report.preview.contains("0:15:00"));
    Ok(())
}

#[tokio::test]
async fn test_engine_without_inputs_reports_no_input() {
    let engine = engine(MemoryStorage::new(), TestConfig::new(&[]));
    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, MergeError::NoInput));
    assert_eq!(err.user_friendly_message(), "No valid Excel files uploaded.");
}

#[tokio::test]
async fn test_engine_honours_merge_options() -> Result<()> {
    let storage = MemoryStorage::new();
    storage
        .insert(
            "a.csv",
            b"Collector Name,Team,Wait Time\nBo,North,0:01:00\nBo,South,0:02:00\n".to_vec(),
        )
        .await;
    storage
        .insert("blank.csv", b"Collector Name,Wait Time\n ,0:01:00\n".to_vec())
        .await;

    let mut config = TestConfig::new(&["a.csv"]);
    config.options.merge_policy = MergePolicy::LastWins;
    let report = engine(storage.clone(), config).run().await?;
    let bo = report.preview.lines().nth(1).unwrap();
    assert!(bo.contains("South"));
    assert!(bo.contains("0:03:00"));

    let mut config = TestConfig::new(&["blank.csv"]);
    config.options.empty_result = EmptyResultPolicy::Error;
    let err = engine(storage.clone(), config).run().await.unwrap_err();
    assert!(matches!(err, MergeError::EmptyResult { sources: 1 }));

    let report = engine(storage, TestConfig::new(&["blank.csv"])).run().await?;
    assert_eq!(report.groups, 0);
    let lines: Vec<&str> = report.preview.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Average"));
    assert!(lines[1].ends_with("0:00:00"));
    Ok(())
}
