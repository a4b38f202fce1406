//! Report triggers: the message context command and the marker reaction.
//!
//! Both end up in [`ReportFiler::file`]. The reaction path additionally
//! filters automated reactors, direct-message reactions and non-marker emoji,
//! and deduplicates per message for the life of the process. A message is
//! only claimed once it has been fetched, so a failed fetch leaves it
//! reportable.

use crate::{
    DirectMessageNotifier, FlaggedMessage, GuildId, ModerationPlatform, ReactionEvent,
    ReportFiler, ReportId, ReporterNotifier, TriggerDedup, TriggerMarker, UserRef,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use tribunal_error::{ReportError, ReportErrorKind, ReportResult};

/// Why a reaction did not file a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    /// Reactor is an automated account.
    Bot,
    /// Reaction was added outside a guild.
    DirectMessage,
    /// Emoji is not the configured marker.
    MarkerMismatch,
    /// The message was already reported by reaction.
    AlreadyReported,
}

/// What a reaction event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// A report was filed.
    Filed(ReportId),
    /// The reaction was ignored.
    Ignored(IgnoreReason),
}

/// Entry points for the two report triggers.
pub struct ReportTriggers {
    filer: Arc<ReportFiler>,
    platform: Arc<dyn ModerationPlatform>,
    dedup: Arc<TriggerDedup>,
    marker: TriggerMarker,
}

impl ReportTriggers {
    /// Create the triggers.
    pub fn new(
        filer: Arc<ReportFiler>,
        platform: Arc<dyn ModerationPlatform>,
        dedup: Arc<TriggerDedup>,
        marker: TriggerMarker,
    ) -> Self {
        Self {
            filer,
            platform,
            dedup,
            marker,
        }
    }

    /// A user invoked the report command on `message`.
    ///
    /// The command path does not consult the reaction dedup set; invoking the
    /// command twice on the same message files two reports.
    #[instrument(skip_all, fields(message_id = %message.id(), reporter_id = %reporter.id()))]
    pub async fn on_message_action(
        &self,
        message: &FlaggedMessage,
        reporter: &UserRef,
        notifier: &dyn ReporterNotifier,
    ) -> ReportResult<ReportId> {
        self.filer.file(message, reporter, notifier).await
    }

    /// Decide whether a reaction should file a report.
    ///
    /// Checks run in order: automated reactor, guild context, marker match,
    /// dedup. This only reads the dedup set; the message is claimed by
    /// [`Self::on_reaction_add`] after it has been fetched.
    pub fn admit(&self, event: &ReactionEvent) -> Result<GuildId, IgnoreReason> {
        if *event.reactor_is_bot() {
            return Err(IgnoreReason::Bot);
        }
        let Some(guild_id) = *event.guild_id() else {
            return Err(IgnoreReason::DirectMessage);
        };
        if !self.marker.matches(event.emoji()) {
            return Err(IgnoreReason::MarkerMismatch);
        }
        if self.dedup.contains(*event.message_id()) {
            return Err(IgnoreReason::AlreadyReported);
        }
        Ok(guild_id)
    }

    /// A reaction was added to a message.
    ///
    /// # Errors
    ///
    /// Returns [`ReportErrorKind::MessageUnavailable`] when the reacted message
    /// cannot be fetched, in which case the message is not marked and a later
    /// reaction may report it. Errors from filing are returned as-is; the
    /// message stays marked.
    #[instrument(
        skip_all,
        fields(
            message_id = %event.message_id(),
            channel_id = %event.channel_id(),
            reactor_id = %event.reactor().id()
        )
    )]
    pub async fn on_reaction_add(&self, event: &ReactionEvent) -> ReportResult<ReactionOutcome> {
        let guild_id = match self.admit(event) {
            Ok(guild_id) => guild_id,
            Err(reason) => {
                debug!(%reason, "Ignoring reaction");
                return Ok(ReactionOutcome::Ignored(reason));
            }
        };

        let message = self
            .platform
            .fetch_message(guild_id, *event.channel_id(), *event.message_id())
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch reacted message");
                ReportError::new(ReportErrorKind::MessageUnavailable(e.to_string()))
            })?;

        // Concurrent reactions may all pass `admit`; only one claims the message.
        if !self.dedup.mark(*event.message_id()) {
            debug!(reason = %IgnoreReason::AlreadyReported, "Ignoring reaction");
            return Ok(ReactionOutcome::Ignored(IgnoreReason::AlreadyReported));
        }

        let notifier = DirectMessageNotifier::new(Arc::clone(&self.platform), *event.reactor().id());
        let report_id = self.filer.file(&message, event.reactor(), &notifier).await?;
        Ok(ReactionOutcome::Filed(report_id))
    }
}
