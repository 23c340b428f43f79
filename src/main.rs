use agent_summarizer::utils::error::ErrorSeverity;
use agent_summarizer::utils::{logger, validation::Validate};
use agent_summarizer::{
    CliConfig, LocalStorage, MergeEngine, SheetMergePipeline, SpreadsheetDecoder, XlsxEncoder,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting agent-summarizer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let show_preview = config.preview;
    let as_json = config.json;
    let monitor_enabled = config.monitor;

    // 輸入路徑以目前目錄為準，輸出寫到 output_path 底下
    let storage = LocalStorage::new(".");
    let pipeline = SheetMergePipeline::new(storage, config, SpreadsheetDecoder, XlsxEncoder);
    let engine = MergeEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            if show_preview {
                println!("Preview of Merged Data");
                println!("{}", report.preview);
                println!();
            }
            println!(
                "✅ Merged {} file(s) into {} collector row(s)",
                report.source_count, report.groups
            );
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Merge failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
