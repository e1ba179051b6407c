use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No photo available: {message}")]
    EmptyResult { message: String },

    #[error("Cannot access {path}: {reason}")]
    FileAccess { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes that calling automation can tell apart by exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    EmptyResult,
    FileAccess,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::EmptyResult => 4,
            ErrorCategory::FileAccess => 5,
        }
    }
}

impl UpdateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UpdateError::MissingConfig { .. }
            | UpdateError::InvalidConfigValue { .. }
            | UpdateError::ConfigParse { .. } => ErrorCategory::Configuration,
            UpdateError::Http(_) | UpdateError::HttpStatus { .. } | UpdateError::Decode(_) => {
                ErrorCategory::Transport
            }
            UpdateError::EmptyResult { .. } => ErrorCategory::EmptyResult,
            UpdateError::FileAccess { .. } | UpdateError::Io(_) => ErrorCategory::FileAccess,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UpdateError::MissingConfig { .. } => {
                "Set FLICKR_USER_ID or pass --user-id with your Flickr account id"
            }
            UpdateError::InvalidConfigValue { .. } | UpdateError::ConfigParse { .. } => {
                "Check the command line flags and the TOML configuration file"
            }
            UpdateError::Http(_) | UpdateError::HttpStatus { .. } => {
                "Check network connectivity and that the Flickr account is public"
            }
            UpdateError::Decode(_) => "The feed returned an unexpected payload; try again later",
            UpdateError::EmptyResult { .. } => {
                "Make sure the account has public photos, or pick another image id"
            }
            UpdateError::FileAccess { .. } | UpdateError::Io(_) => {
                "Make sure the README exists, is writable and no other update is running"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Transport => format!("Could not reach Flickr: {}", self),
            ErrorCategory::EmptyResult => format!("Nothing to update: {}", self),
            ErrorCategory::FileAccess => format!("README not updated: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
