use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No valid Excel files uploaded.")]
    NoInput,

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("No records left after filtering {sources} input file(s)")]
    EmptyResult { sources: usize },

    #[error("Error merging files: failed to read '{source_name}': {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    #[error("Unsupported input format for '{source_name}': {extension}")]
    UnsupportedFormat {
        source_name: String,
        extension: String,
    },

    #[error("Workbook encoding failed: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Schema,
    Codec,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MergeError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn decode(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoInput | Self::EmptyResult { .. } | Self::UnsupportedFormat { .. } => {
                ErrorCategory::Input
            }
            Self::Schema { .. } => ErrorCategory::Schema,
            Self::Decode { .. }
            | Self::Encode(_)
            | Self::Spreadsheet(_)
            | Self::Csv(_)
            | Self::Serialization(_) => ErrorCategory::Codec,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Config { .. }
            | Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Schema | ErrorCategory::Codec => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoInput => "No valid Excel files uploaded.".to_string(),
            Self::Schema { message } => message.clone(),
            Self::EmptyResult { sources } => format!(
                "None of the {} uploaded file(s) contain a row with a Collector Name.",
                sources
            ),
            Self::Decode {
                source_name,
                message,
            } => format!("Error merging files: {} ({})", message, source_name),
            Self::UnsupportedFormat {
                source_name,
                extension,
            } => format!("'{}' is not a supported spreadsheet (.{})", source_name, extension),
            Self::Encode(e) => format!("Could not build the merged workbook: {}", e),
            Self::Io(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NoInput => "Pass one or more .xlsx / .xls files to merge",
            Self::Schema { .. } => "Make sure every export has a 'Collector Name' header in the first sheet",
            Self::EmptyResult { .. } => "Check that the Collector Name column is filled in",
            Self::Decode { .. } | Self::Spreadsheet(_) | Self::Csv(_) => {
                "Re-export the file from the source system and try again"
            }
            Self::UnsupportedFormat { .. } => "Convert the file to .xlsx before merging",
            Self::Encode(_) | Self::Serialization(_) => "Retry the merge; report the issue if it persists",
            Self::Io(_) => "Check that the input files exist and the output path is writable",
            Self::Config { .. }
            | Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => "Fix the configuration value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
