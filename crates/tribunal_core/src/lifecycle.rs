//! Report filing.
//!
//! [`ReportFiler::file`] is the one place a report comes into existence,
//! whichever trigger fired. It:
//! 1. acknowledges the reporter (independently of everything else),
//! 2. snapshots attachments while their URLs are still valid,
//! 3. stores the report under a fresh id,
//! 4. publishes the moderator summary with its decision controls,
//! 5. removes the message from its channel when the bot is allowed to,
//! 6. publishes captured files as a follow-up tagged with the report id.
//!
//! Only step 4 is fatal: without a summary no moderator can reach the report.
//! The message is left in place in that case.

use crate::notices::{self, EMPTY_CONTENT, REPORT_ACKNOWLEDGED, SUMMARY_EXCERPT_LIMIT};
use crate::{
    AttachmentSnapshotter, ChannelId, FlaggedMessage, ModerationPlatform, NewReport,
    OutgoingMessage, ReportId, ReportStore, ReportSummary, UserId, UserRef,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use tribunal_error::{PlatformResult, ReportError, ReportErrorKind, ReportResult};

/// Delivers the filing acknowledgment to the reporting user.
///
/// The command trigger answers the interaction ephemerally; the reaction
/// trigger has no interaction and falls back to a direct message.
#[async_trait]
pub trait ReporterNotifier: Send + Sync {
    /// Send `text` to the reporter.
    async fn notify(&self, text: &str) -> PlatformResult<()>;
}

/// [`ReporterNotifier`] that sends a direct message.
pub struct DirectMessageNotifier {
    platform: Arc<dyn ModerationPlatform>,
    user: UserId,
}

impl DirectMessageNotifier {
    /// Notify `user` through `platform`.
    pub fn new(platform: Arc<dyn ModerationPlatform>, user: UserId) -> Self {
        Self { platform, user }
    }
}

#[async_trait]
impl ReporterNotifier for DirectMessageNotifier {
    async fn notify(&self, text: &str) -> PlatformResult<()> {
        self.platform.send_direct_message(self.user, text).await
    }
}

/// Files reports: capture, store, publish, remove.
pub struct ReportFiler {
    platform: Arc<dyn ModerationPlatform>,
    store: Arc<ReportStore>,
    snapshotter: AttachmentSnapshotter,
    moderation_channel: ChannelId,
}

impl ReportFiler {
    /// Create a filer publishing to `moderation_channel`.
    pub fn new(
        platform: Arc<dyn ModerationPlatform>,
        store: Arc<ReportStore>,
        snapshotter: AttachmentSnapshotter,
        moderation_channel: ChannelId,
    ) -> Self {
        Self {
            platform,
            store,
            snapshotter,
            moderation_channel,
        }
    }

    /// File a report for `message` on behalf of `reporter`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportErrorKind::SummaryPublishFailed`] when the moderator
    /// summary cannot be posted. The report is discarded and the message is
    /// left in its channel, since nobody could act on it. Every other failure
    /// is logged and tolerated.
    #[instrument(
        skip(self, message, reporter, notifier),
        fields(
            message_id = %message.id(),
            channel_id = %message.channel_id(),
            reporter_id = %reporter.id(),
            report_id
        )
    )]
    pub async fn file(
        &self,
        message: &FlaggedMessage,
        reporter: &UserRef,
        notifier: &dyn ReporterNotifier,
    ) -> ReportResult<ReportId> {
        if let Err(e) = notifier.notify(REPORT_ACKNOWLEDGED).await {
            warn!(error = %e, "Failed to acknowledge reporter");
        }

        let attachments = self.snapshotter.snapshot(message).await;

        let content = if message.content().is_empty() {
            EMPTY_CONTENT.to_string()
        } else {
            message.content().clone()
        };
        let excerpt = notices::excerpt(&content, SUMMARY_EXCERPT_LIMIT);
        let follow_up = attachments.clone();

        let report_id = self.store.create(NewReport::new(
            *message.guild_id(),
            *message.channel_id(),
            message.author().clone(),
            content,
            attachments,
        ));
        tracing::Span::current().record("report_id", report_id.as_str());

        let summary = ReportSummary::new(
            report_id.clone(),
            *message.channel_id(),
            message.author().clone(),
            reporter.clone(),
            excerpt,
            Utc::now(),
        );

        if let Err(e) = self
            .platform
            .publish_report_summary(self.moderation_channel, &summary)
            .await
        {
            error!(error = %e, "Failed to publish report summary, discarding report");
            self.store.delete(&report_id);
            return Err(ReportError::new(ReportErrorKind::SummaryPublishFailed(
                e.to_string(),
            )));
        }

        self.remove_original(message).await;

        if !follow_up.is_empty() {
            let file_count = follow_up.len();
            let files = OutgoingMessage::new(notices::attachments_caption(&report_id))
                .with_files(follow_up);
            if let Err(e) = self
                .platform
                .send_channel_message(self.moderation_channel, files)
                .await
            {
                warn!(error = %e, file_count, "Failed to publish report attachments");
            }
        }

        info!("Report filed");
        Ok(report_id)
    }

    /// Best-effort removal of the flagged message.
    async fn remove_original(&self, message: &FlaggedMessage) {
        let channel = *message.channel_id();
        match self.platform.can_manage_messages(channel).await {
            Ok(true) => {
                if let Err(e) = self.platform.delete_message(channel, *message.id()).await {
                    warn!(error = %e, "Failed to remove reported message");
                }
            }
            Ok(false) => {
                warn!("Missing permission to remove messages in this channel, leaving message in place");
            }
            Err(e) => {
                warn!(error = %e, "Could not determine message permissions, leaving message in place");
            }
        }
    }
}
