//! Moderator decisions on pending reports.

use crate::notices::{self, MODERATORS_ONLY, REPORT_UNAVAILABLE};
use crate::{
    DecisionAction, DecisionControl, GuildId, MessageId, ModerationPlatform, OutgoingMessage,
    Report, ReportId, ReportStore, RoleId, UserId, UserRef,
};
use async_trait::async_trait;
use derive_getters::Getters;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tribunal_error::{PlatformResult, ReportError, ReportErrorKind, ReportResult};

const FALLBACK_GUILD_NAME: &str = "the server";

/// Who activated a decision control, and where.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DecisionActor {
    /// Guild the control was activated in; `None` outside a guild.
    guild_id: Option<GuildId>,
    /// The acting user.
    user: UserRef,
}

impl DecisionActor {
    /// Create an actor.
    pub fn new(guild_id: Option<GuildId>, user: UserRef) -> Self {
        Self { guild_id, user }
    }
}

/// Terminal state a report was resolved into.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Resolution {
    /// Resolved report.
    report_id: ReportId,
    /// Decision that was applied.
    action: DecisionAction,
    /// Moderator who decided.
    decided_by: UserRef,
    /// For deletions, whether the author received the removal notice.
    author_notified: bool,
}

impl Resolution {
    /// One-line outcome annotation for the decision surface.
    ///
    /// ```
    /// use tribunal_core::{DecisionAction, ReportId, Resolution, UserRef};
    ///
    /// let id = ReportId::parse("abcd1234").expect("valid id");
    /// let resolution = Resolution::new(id, DecisionAction::Approve, UserRef::new(1, "mod"), false);
    /// assert_eq!(resolution.describe(), "Approved by mod");
    /// ```
    pub fn describe(&self) -> String {
        let by = self.decided_by.tag();
        match (self.action, self.author_notified) {
            (DecisionAction::Approve, _) => format!("Approved by {by}"),
            (DecisionAction::Delete, true) => {
                format!("Deleted by {by}; author notified by DM")
            }
            (DecisionAction::Delete, false) => {
                format!("Deleted by {by}; author could not be notified by DM")
            }
        }
    }

    /// Create a resolution.
    pub fn new(
        report_id: ReportId,
        action: DecisionAction,
        decided_by: UserRef,
        author_notified: bool,
    ) -> Self {
        Self {
            report_id,
            action,
            decided_by,
            author_notified,
        }
    }
}

/// Where a decision was made: the moderator-facing summary and its controls.
#[async_trait]
pub trait DecisionSurface: Send + Sync {
    /// Tell the acting user the decision was refused.
    async fn reject(&self, text: &str) -> PlatformResult<()>;

    /// Disable the decision controls and annotate the outcome.
    async fn mark_resolved(&self, resolution: &Resolution) -> PlatformResult<()>;
}

/// Result of a decision attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Content was restored to its origin channel.
    Approved {
        /// Resolved report.
        report_id: ReportId,
        /// Messages that carry the restored content, in posting order.
        restored_messages: Vec<MessageId>,
    },
    /// Removal was confirmed.
    Deleted {
        /// Resolved report.
        report_id: ReportId,
        /// Whether the author received the removal notice.
        author_notified: bool,
    },
    /// The report is not pending (already resolved, or lost to a restart).
    UnknownReport(ReportId),
    /// The acting user lacks the moderator role.
    Unauthorized(UserId),
}

/// Applies approve/delete decisions to pending reports.
///
/// ```text
/// PENDING --approve--> RESOLVED_APPROVED
/// PENDING --delete---> RESOLVED_DELETED
/// ```
///
/// Both resolved states are terminal: the report leaves the store, so any
/// later decision on the same id takes the unknown-report path.
pub struct DecisionHandler {
    platform: Arc<dyn ModerationPlatform>,
    store: Arc<ReportStore>,
    moderator_role: RoleId,
}

impl DecisionHandler {
    /// Create a handler gated on `moderator_role`.
    pub fn new(
        platform: Arc<dyn ModerationPlatform>,
        store: Arc<ReportStore>,
        moderator_role: RoleId,
    ) -> Self {
        Self {
            platform,
            store,
            moderator_role,
        }
    }

    /// Apply a decision.
    ///
    /// Unknown reports and unauthorized actors are answered on the surface and
    /// returned as outcomes, not errors; neither changes any state.
    ///
    /// # Errors
    ///
    /// Returns [`ReportErrorKind::RestoreFailed`] when an approved report
    /// cannot be re-posted. The report is reinstated so the decision can be retried.
    #[instrument(
        skip(self, control, actor, surface),
        fields(
            report_id = %control.report_id(),
            action = %control.action(),
            actor_id = %actor.user().id()
        )
    )]
    pub async fn decide(
        &self,
        control: &DecisionControl,
        actor: &DecisionActor,
        surface: &dyn DecisionSurface,
    ) -> ReportResult<DecisionOutcome> {
        let report_id = control.report_id();

        if !self.store.contains(report_id) {
            info!("Decision on unknown report");
            Self::reject(surface, REPORT_UNAVAILABLE).await;
            return Ok(DecisionOutcome::UnknownReport(report_id.clone()));
        }

        if !self.is_moderator(actor).await {
            info!("Decision refused, actor is not a moderator");
            Self::reject(surface, MODERATORS_ONLY).await;
            return Ok(DecisionOutcome::Unauthorized(*actor.user().id()));
        }

        // Claim the report; a concurrent decision may have won since the check above.
        let Some(report) = self.store.take(report_id) else {
            debug!("Report resolved concurrently");
            Self::reject(surface, REPORT_UNAVAILABLE).await;
            return Ok(DecisionOutcome::UnknownReport(report_id.clone()));
        };

        match control.action() {
            DecisionAction::Approve => self.approve(report, actor, surface).await,
            DecisionAction::Delete => self.delete(report, actor, surface).await,
        }
    }

    async fn is_moderator(&self, actor: &DecisionActor) -> bool {
        let Some(guild) = actor.guild_id else {
            return false;
        };

        match self
            .platform
            .member_has_role(guild, *actor.user().id(), self.moderator_role)
            .await
        {
            Ok(has_role) => has_role,
            Err(e) => {
                warn!(error = %e, "Failed to look up actor roles, treating as non-moderator");
                false
            }
        }
    }

    async fn approve(
        &self,
        report: Arc<Report>,
        actor: &DecisionActor,
        surface: &dyn DecisionSurface,
    ) -> ReportResult<DecisionOutcome> {
        let mut parts: Vec<OutgoingMessage> =
            notices::restored_messages(*report.author().id(), report.content())
                .into_iter()
                .map(OutgoingMessage::new)
                .collect();
        // Files ride on the last part so they follow the whole text.
        if let Some(last) = parts.pop() {
            parts.push(last.with_files(report.attachments().clone()));
        }

        let part_count = parts.len();
        let mut restored_messages = Vec::with_capacity(part_count);
        for part in parts {
            match self
                .platform
                .send_channel_message(*report.channel_id(), part)
                .await
            {
                Ok(id) => restored_messages.push(id),
                Err(e) => {
                    error!(
                        error = %e,
                        posted = restored_messages.len(),
                        part_count,
                        "Failed to restore message, reinstating report"
                    );
                    let report_id = report.id().to_string();
                    self.store.reinstate(report);
                    return Err(ReportError::new(ReportErrorKind::RestoreFailed {
                        report_id,
                        reason: e.to_string(),
                    }));
                }
            }
        }

        let resolution = Resolution::new(
            report.id().clone(),
            DecisionAction::Approve,
            actor.user().clone(),
            false,
        );
        Self::mark(surface, &resolution).await;

        info!(part_count, "Report approved, message restored");
        Ok(DecisionOutcome::Approved {
            report_id: report.id().clone(),
            restored_messages,
        })
    }

    async fn delete(
        &self,
        report: Arc<Report>,
        actor: &DecisionActor,
        surface: &dyn DecisionSurface,
    ) -> ReportResult<DecisionOutcome> {
        let guild_name = match self.platform.guild_name(*report.guild_id()).await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Failed to look up guild name");
                FALLBACK_GUILD_NAME.to_string()
            }
        };

        let author_notified = match self
            .platform
            .send_direct_message(*report.author().id(), &notices::removal_notice(&guild_name))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(author_id = %report.author().id(), error = %e, "Failed to notify author by DM");
                false
            }
        };

        let resolution = Resolution::new(
            report.id().clone(),
            DecisionAction::Delete,
            actor.user().clone(),
            author_notified,
        );
        Self::mark(surface, &resolution).await;

        info!(author_notified, "Report deleted");
        Ok(DecisionOutcome::Deleted {
            report_id: report.id().clone(),
            author_notified,
        })
    }

    async fn reject(surface: &dyn DecisionSurface, text: &str) {
        if let Err(e) = surface.reject(text).await {
            warn!(error = %e, "Failed to answer refused decision");
        }
    }

    async fn mark(surface: &dyn DecisionSurface, resolution: &Resolution) {
        if let Err(e) = surface.mark_resolved(resolution).await {
            warn!(error = %e, "Failed to update decision controls");
        }
    }
}
