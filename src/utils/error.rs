use crate::domain::model::RowErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV format error: {message}")]
    FormatError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn format(message: impl Into<String>) -> Self {
        ImportError::FormatError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ImportError::FormatError { .. } | ImportError::CsvError(_) => ErrorSeverity::High,
            ImportError::SerializationError(_) => ErrorSeverity::High,
            ImportError::IoError(_) => ErrorSeverity::Critical,
            ImportError::ConfigError { .. }
            | ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::FormatError { message } => format!("The CSV file is invalid: {}", message),
            ImportError::IoError(e) => format!("Could not read the file: {}", e),
            ImportError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            ImportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::FormatError { .. } => {
                "Make sure the file has a header line and at least one data row"
            }
            ImportError::CsvError(_) | ImportError::SerializationError(_) => {
                "Check the input data for unexpected characters"
            }
            ImportError::IoError(_) => "Check that the file exists and is readable",
            ImportError::ConfigError { .. }
            | ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::ConfigValidationError { .. } => {
                "Review the config file, CLI flags and MEMBER_STORE_* environment variables"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// 單筆寫入失敗；只影響該列，不會中斷整批匯入
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{message}")]
    Rejected {
        message: String,
        status: Option<u16>,
    },

    #[error("Store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected store response: {message}")]
    MalformedResponse { message: String },
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected {
            message: message.into(),
            status: None,
        }
    }
}

/// 個別資料列的錯誤，會記錄在匯入結果中
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Missing required fields: first_name and last_name (missing: {})", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RowError {
    pub fn kind(&self) -> RowErrorKind {
        match self {
            RowError::Validation { .. } => RowErrorKind::Validation,
            RowError::Store(_) => RowErrorKind::Store,
        }
    }
}
