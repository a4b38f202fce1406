//! Report workflow error types.

/// Specific report workflow error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ReportErrorKind {
    /// The moderator summary could not be published, so the report is unreachable.
    #[display("Failed to publish report summary: {}", _0)]
    SummaryPublishFailed(String),

    /// A decision control identifier could not be parsed.
    #[display("Invalid decision control '{}': {}", custom_id, reason)]
    InvalidControl {
        /// Raw identifier carried by the control
        custom_id: String,
        /// Why it was rejected
        reason: String,
    },

    /// The flagged message could not be loaded from the platform.
    #[display("Flagged message unavailable: {}", _0)]
    MessageUnavailable(String),

    /// Restoring an approved report into its origin channel failed.
    #[display("Failed to restore report '{}': {}", report_id, reason)]
    RestoreFailed {
        /// Report being restored
        report_id: String,
        /// Underlying failure
        reason: String,
    },
}

/// Report workflow error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Report Error: {} at line {} in {}", kind, line, file)]
pub struct ReportError {
    /// The specific error kind
    pub kind: ReportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ReportError {
    /// Create a new report error with location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use tribunal_error::{ReportError, ReportErrorKind};
    ///
    /// let err = ReportError::new(ReportErrorKind::MessageUnavailable("gone".into()));
    /// assert!(format!("{}", err).contains("unavailable"));
    /// ```
    #[track_caller]
    pub fn new(kind: ReportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReportErrorKind {
        &self.kind
    }
}

/// Result type for report workflow operations.
pub type ReportResult<T> = Result<T, ReportError>;
