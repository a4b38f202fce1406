//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, PlatformError, ReportError};

/// Every error the bot can surface at its outer boundary.
///
/// # Examples
///
/// ```
/// use tribunal_error::{ConfigError, TribunalError};
///
/// let err: TribunalError = ConfigError::new("token missing").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TribunalErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Messaging platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Report workflow error
    #[from(ReportError)]
    Report(ReportError),
}

/// Tribunal error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tribunal Error: {}", _0)]
pub struct TribunalError(Box<TribunalErrorKind>);

impl TribunalError {
    /// Create a new error from a kind.
    pub fn new(kind: TribunalErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TribunalErrorKind {
        &self.0
    }
}

impl<T> From<T> for TribunalError
where
    T: Into<TribunalErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tribunal operations.
pub type TribunalResult<T> = std::result::Result<T, TribunalError>;
