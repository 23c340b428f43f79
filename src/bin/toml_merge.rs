use agent_summarizer::utils::{logger, validation::Validate};
use agent_summarizer::{
    LocalStorage, MergeEngine, SheetMergePipeline, SpreadsheetDecoder, TomlConfig, XlsxEncoder,
};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-merge")]
#[command(about = "Merge collector exports described by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "merge-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be merged without reading any file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    if config.log_format() == "json" {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let show_preview = config.preview_enabled();

    let storage = LocalStorage::new(".");
    let pipeline = SheetMergePipeline::new(storage, config, SpreadsheetDecoder, XlsxEncoder);
    let engine = MergeEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            if show_preview {
                println!("{}", report.preview);
                println!();
            }
            println!("✅ Merge completed successfully!");
            println!("📁 Output saved to: {}", report.output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Merge failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            Err(e).context("merge failed")
        }
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Merge: {}", config.merge.name);
    if let Some(description) = &config.merge.description {
        println!("  Description: {}", description);
    }
    println!("  Inputs: {} file(s)", config.merge.inputs.len());
    for input in &config.merge.inputs {
        println!("    - {}", input);
    }
    println!("  Output: {}", config.output.path);
    println!("  Merge Policy: {:?}", config.merge.merge_policy);
    println!("  Empty Result: {:?}", config.merge.empty_result);

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
