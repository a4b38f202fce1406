//! Moderation-report workflow core for Tribunal.
//!
//! This crate holds everything about a report that does not depend on a
//! particular messaging platform. Platform adapters (see `tribunal_discord`)
//! narrow their events into the schemas defined here and implement the
//! [`ModerationPlatform`] boundary.
//!
//! # Architecture
//!
//! - **Store**: [`ReportStore`] owns pending reports, keyed by [`ReportId`]
//! - **Dedup**: [`TriggerDedup`] remembers messages already reported by reaction
//! - **Snapshotter**: [`AttachmentSnapshotter`] downloads attachment payloads
//! - **Lifecycle**: [`ReportFiler`] captures, removes, stores, and publishes a report
//! - **Decisions**: [`DecisionHandler`] applies a moderator's approve/delete choice
//! - **Triggers**: [`ReportTriggers`] routes command and reaction events into filing
//!
//! Store and dedup are explicitly constructed and shared through `Arc`, so every
//! test (and every bot instance) starts from fresh state.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod control;
mod decision;
mod dedup;
mod ids;
mod lifecycle;
mod message;
pub mod notices;
mod platform;
mod report;
mod settings;
mod snapshot;
mod store;
mod triggers;

pub use control::{DecisionAction, DecisionControl};
pub use decision::{
    DecisionActor, DecisionHandler, DecisionOutcome, DecisionSurface, Resolution,
};
pub use dedup::TriggerDedup;
pub use ids::{ChannelId, EmojiId, GuildId, MessageId, RoleId, UserId};
pub use lifecycle::{DirectMessageNotifier, ReportFiler, ReporterNotifier};
pub use message::{
    AttachmentRef, EmojiRef, FlaggedMessage, FlaggedMessageBuilder, ReactionEvent,
    ReactionEventBuilder, UserRef,
};
pub use platform::{ModerationPlatform, OutgoingMessage, ReportSummary};
pub use report::{CapturedAttachment, NewReport, NewReportBuilder, Report, ReportId};
pub use settings::{
    ModerationSettings, ModerationSettingsBuilder, TriggerMarker, TriggerMarkerBuilder,
};
pub use snapshot::{AttachmentFetcher, AttachmentSnapshotter, HttpAttachmentFetcher};
pub use store::ReportStore;
pub use triggers::{IgnoreReason, ReactionOutcome, ReportTriggers};
