//! Attachment download errors.

/// Failed attachment download.
///
/// Carries the HTTP status when the server answered at all, so a dead CDN
/// link (403/404) can be told apart from a timeout.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What went wrong
    pub message: String,
    /// Response status, if a response arrived
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Download error without a response status.
    ///
    /// ```
    /// use tribunal_error::HttpError;
    ///
    /// let err = HttpError::new("connection reset").with_status(404);
    /// assert_eq!(err.status, Some(404));
    /// assert!(err.to_string().contains("connection reset"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for HttpError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let error = HttpError::new(err.to_string());
        match err.status() {
            Some(status) => error.with_status(status.as_u16()),
            None => error,
        }
    }
}
