use crate::core::ConfigProvider;
use crate::domain::model::{EmptyResultPolicy, MergeOptions, MergePolicy};
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub merge: MergeConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    pub name: String,
    pub description: Option<String>,
    pub inputs: Vec<String>,
    #[serde(default)]
    pub merge_policy: MergePolicy,
    #[serde(default)]
    pub empty_result: EmptyResultPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub preview: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MergeError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXPORT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MergeError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn verbose(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.verbose)
            .unwrap_or(false)
    }

    /// `text` 或 `json`
    pub fn log_format(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .unwrap_or("text")
    }

    pub fn preview_enabled(&self) -> bool {
        self.output.preview
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("merge.name", &self.merge.name)?;
        validation::validate_input_files("merge.inputs", &self.merge.inputs)?;
        validation::validate_path("output.path", &self.output.path)?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.log_format()) {
            return Err(MergeError::InvalidConfigValue {
                field: "monitoring.log_format".to_string(),
                value: self.log_format().to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    valid_formats.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_files(&self) -> &[String] {
        &self.merge.inputs
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            merge_policy: self.merge.merge_policy,
            empty_result: self.merge.empty_result,
        }
    }
}
