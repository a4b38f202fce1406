//! Messaging platform error types.
//!
//! Raised by implementations of the platform boundary (Discord HTTP calls,
//! interaction responses, permission lookups).

/// Platform error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Underlying platform API error (HTTP error, gateway error, rate limit).
    #[display("Platform API error: {_0}")]
    Api(String),

    /// Channel not found or not a guild text channel.
    #[display("Channel not found: {_0}")]
    ChannelNotFound(u64),

    /// Message not found (already deleted, or never visible to the bot).
    #[display("Message not found: {_0}")]
    MessageNotFound(u64),

    /// Guild member not found.
    #[display("Member not found: {_0}")]
    MemberNotFound(u64),

    /// Message failed to send.
    #[display("Message send failed: {_0}")]
    MessageSendFailed(String),

    /// Direct message could not be delivered (closed DMs, blocked bot).
    #[display("Direct message failed: {_0}")]
    DirectMessageFailed(String),

    /// Interaction response (reply, update) failed.
    #[display("Interaction failed: {_0}")]
    InteractionFailed(String),

    /// An inbound event could not be narrowed into a workflow schema.
    #[display("Malformed event: {_0}")]
    MalformedEvent(String),
}

/// Platform error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The specific error kind
    pub kind: PlatformErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use tribunal_error::{PlatformError, PlatformErrorKind};
    ///
    /// let err = PlatformError::new(PlatformErrorKind::MessageNotFound(42));
    /// assert_eq!(err.kind(), &PlatformErrorKind::MessageNotFound(42));
    /// ```
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PlatformErrorKind {
        &self.kind
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

#[cfg(feature = "serenity")]
impl From<serenity::Error> for PlatformError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        PlatformError::new(PlatformErrorKind::Api(err.to_string()))
    }
}
