use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid document '{path}': {message}")]
    InvalidDocument { path: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CheckError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CheckError::IoError(e) => format!("Could not read input: {}", e),
            CheckError::SerializationError(e) => format!("Could not parse JSON: {}", e),
            CheckError::TomlError(e) => format!("Could not parse config file: {}", e),
            CheckError::ApiError(e) => format!("Could not set up the HTTP client: {}", e),
            CheckError::InvalidDocument { path, message } => {
                format!("Error reading or parsing {}: {}", path, message)
            }
            CheckError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CheckError::IoError(_) => "Check that the file exists and is readable",
            CheckError::SerializationError(_) | CheckError::InvalidDocument { .. } => {
                "Make sure the file is valid JSON with the expected top-level key"
            }
            CheckError::TomlError(_) => "Make sure the config file is valid TOML",
            CheckError::ApiError(_) => {
                "Check the system TLS setup, or rerun with --quick to skip network checks"
            }
            CheckError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the config file values"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
