//! The messaging platform boundary.

use crate::{
    CapturedAttachment, ChannelId, FlaggedMessage, GuildId, MessageId, ReportId, RoleId, UserId,
    UserRef,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use tribunal_error::PlatformResult;

/// A plain channel message with optional file uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct OutgoingMessage {
    /// Message body.
    text: String,
    /// Files to upload alongside the body.
    files: Vec<CapturedAttachment>,
}

impl OutgoingMessage {
    /// A text-only message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            files: Vec::new(),
        }
    }

    /// Attach files to the message.
    pub fn with_files(mut self, files: Vec<CapturedAttachment>) -> Self {
        self.files = files;
        self
    }
}

/// What moderators see when a report is filed.
///
/// Rendering (embed layout, colours, button labels) belongs to the platform;
/// the controls it renders must encode `{action, report_id}` for both
/// [`crate::DecisionAction`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ReportSummary {
    /// Report the summary describes.
    report_id: ReportId,
    /// Channel the flagged message came from.
    origin_channel: ChannelId,
    /// Author of the flagged message.
    author: UserRef,
    /// User who filed the report.
    reporter: UserRef,
    /// Content excerpt, already bounded in length.
    excerpt: String,
    /// When the report was filed.
    filed_at: DateTime<Utc>,
}

impl ReportSummary {
    /// Assemble a summary.
    pub fn new(
        report_id: ReportId,
        origin_channel: ChannelId,
        author: UserRef,
        reporter: UserRef,
        excerpt: String,
        filed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            report_id,
            origin_channel,
            author,
            reporter,
            excerpt,
            filed_at,
        }
    }
}

/// Operations the report workflow needs from the messaging platform.
///
/// Implementations should bound their own network calls; the workflow treats
/// every method as fallible and decides per call site whether a failure is fatal.
#[async_trait]
pub trait ModerationPlatform: Send + Sync {
    /// Send a direct message to a user.
    ///
    /// # Errors
    ///
    /// Returns error if the user does not accept direct messages from the bot
    /// or the platform call fails.
    async fn send_direct_message(&self, user: UserId, text: &str) -> PlatformResult<()>;

    /// Post a message (and files) to a channel.
    async fn send_channel_message(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> PlatformResult<MessageId>;

    /// Post a report summary carrying the two decision controls.
    async fn publish_report_summary(
        &self,
        channel: ChannelId,
        summary: &ReportSummary,
    ) -> PlatformResult<MessageId>;

    /// Load a full message for filing.
    async fn fetch_message(
        &self,
        guild: GuildId,
        channel: ChannelId,
        message: MessageId,
    ) -> PlatformResult<FlaggedMessage>;

    /// Display name of a guild.
    async fn guild_name(&self, guild: GuildId) -> PlatformResult<String>;

    /// Whether the bot may delete other users' messages in a channel.
    async fn can_manage_messages(&self, channel: ChannelId) -> PlatformResult<bool>;

    /// Whether a guild member holds a role.
    async fn member_has_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
    ) -> PlatformResult<bool>;

    /// Delete a message from a channel.
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()>;
}
