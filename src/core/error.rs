use std::fmt;

/// Error types for sectxt-audit operations
#[derive(Debug)]
pub enum AuditError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// A required CSV column is absent from a file's header
    MissingColumn { path: String, column: String },

    /// The existing output cannot be used to resume a run
    CorruptResumeState { path: String, reason: String },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Io(err) => write!(f, "IO error: {err}"),
            AuditError::Csv(err) => write!(f, "CSV error: {err}"),
            AuditError::Http(err) => write!(f, "HTTP error: {err}"),
            AuditError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            AuditError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AuditError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            AuditError::MissingColumn { path, column } => {
                write!(f, "Missing column '{column}' in {path}")
            }
            AuditError::CorruptResumeState { path, reason } => {
                write!(f, "Corrupt resume state in {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Io(err) => Some(err),
            AuditError::Csv(err) => Some(err),
            AuditError::Http(err) => Some(err),
            AuditError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io(err)
    }
}

impl From<csv::Error> for AuditError {
    fn from(err: csv::Error) -> Self {
        AuditError::Csv(err)
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Http(err)
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        AuditError::TomlParsing(err)
    }
}

impl AuditError {
    /// Whether this error means an existing output file cannot be resumed from
    pub fn is_corrupt_resume_state(&self) -> bool {
        matches!(self, AuditError::CorruptResumeState { .. })
    }
}

/// Type alias for Results using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;
