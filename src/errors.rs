use std::fmt;
use std::path::PathBuf;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid configuration (fatal at startup).
    Config(String),
    /// The input file does not exist.
    InputNotFound(PathBuf),
    /// The input header lacks the designated URL column.
    MissingColumn(String),
    /// The requested output format is neither `csv` nor `json`.
    UnsupportedFormat(String),
    /// File-system error while reading input or writing output.
    Io(std::io::Error),
    /// CSV reading or writing error.
    Csv(csv::Error),
    /// JSON serialization error.
    Json(serde_json::Error),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InputNotFound(path) => {
                write!(f, "Input CSV not found: {}", path.display())
            }
            AppError::MissingColumn(column) => write!(f, "CSV missing column: {}", column),
            AppError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format '{}'. Use csv or json.", format)
            }
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Csv(e) => write!(f, "CSV error: {}", e),
            AppError::Json(e) => write!(f, "JSON error: {}", e),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Csv(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

/// A failed vendor call.
///
/// Never propagated past the lookup workflow: its text ends up in the
/// `apollo_error` column of the affected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    /// HTTP status of the failure, 500 when the fault carried none.
    pub status_code: u16,
}

pub const DEFAULT_ERROR_STATUS: u16 = 500;

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code: status_code.unwrap_or(DEFAULT_ERROR_STATUS),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        ApiError::new(err.to_string(), status)
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: f(),
        })
    }
}
