use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Failed to decode response from {path} (status {status}): {source}")]
    DecodeError {
        path: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ClientError {
    /// Failure reaching the backend or reading its answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ApiError(_) | Self::DecodeError { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidConfigValueError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(e) if e.is_connect() => {
                "Check that the backend is running and --base-url points at it"
            }
            Self::ApiError(_) => "Check network connectivity and try again",
            Self::DecodeError { .. } => {
                "The backend answered with an unexpected body; check --base-url and the backend logs"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "Report this as a bug",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or flags"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            3
        } else {
            2
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
