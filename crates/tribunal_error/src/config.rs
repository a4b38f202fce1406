//! Configuration errors.

/// Invalid or unreadable configuration.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted key of the offending setting, when one is to blame
    pub setting: Option<&'static str>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Configuration error at the caller's location.
    ///
    /// ```
    /// use tribunal_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("moderation.channel_id", "must be set");
    /// assert_eq!(err.setting, Some("moderation.channel_id"));
    /// assert!(err.message.contains("moderation.channel_id must be set"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            setting: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A specific setting holds an unusable value.
    #[track_caller]
    pub fn invalid(setting: &'static str, problem: impl std::fmt::Display) -> Self {
        let mut error = Self::new(format!("{setting} {problem}"));
        error.setting = Some(setting);
        error
    }
}
