pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{EmptyResultPolicy, MergeOptions, MergePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "agent-summarizer"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Merge call-center agent exports into a single summary workbook")
)]
pub struct CliConfig {
    /// Spreadsheet exports to merge (.xlsx, .xls, .xlsm, .xlsb, .ods, .csv)
    #[cfg_attr(feature = "cli", arg(value_name = "INPUTS"))]
    pub inputs: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// How to pick non-time columns when a collector appears more than once
    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value_t = MergePolicy::FirstWins))]
    pub merge_policy: MergePolicy,

    /// What to produce when no row has a Collector Name
    #[cfg_attr(
        feature = "cli",
        arg(long, value_enum, default_value_t = EmptyResultPolicy::ZeroSummary)
    )]
    pub empty_result: EmptyResultPolicy,

    #[cfg_attr(feature = "cli", arg(long, help = "Print the merged table"))]
    pub preview: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Print the run report as JSON"))]
    pub json: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log time and memory per phase"))]
    pub monitor: bool,
}

impl CliConfig {
    pub fn new(inputs: Vec<String>, output_path: impl Into<String>) -> Self {
        Self {
            inputs,
            output_path: output_path.into(),
            merge_policy: MergePolicy::default(),
            empty_result: EmptyResultPolicy::default(),
            preview: false,
            json: false,
            verbose: false,
            monitor: false,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_input_files("inputs", &self.inputs)?;
        validation::validate_path("output_path", &self.output_path)
    }
}

impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.inputs
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            merge_policy: self.merge_policy,
            empty_result: self.empty_result,
        }
    }
}
