//! Test utilities for the report workflow.
//!
//! Mock implementations of every boundary trait, recording what the workflow
//! asked them to do.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tribunal_core::{
    AttachmentFetcher, AttachmentRef, AttachmentSnapshotter, ChannelId, DecisionSurface,
    FlaggedMessage, FlaggedMessageBuilder, GuildId, MessageId, ModerationPlatform,
    OutgoingMessage, ReportFiler, ReportStore, ReportSummary, ReporterNotifier, Resolution,
    RoleId, UserId, UserRef,
};
use tribunal_error::{HttpError, PlatformError, PlatformErrorKind, PlatformResult};

pub const GUILD: GuildId = GuildId(1);
pub const ORIGIN_CHANNEL: ChannelId = ChannelId(10);
pub const MOD_CHANNEL: ChannelId = ChannelId(20);
pub const MOD_ROLE: RoleId = RoleId(30);
pub const AUTHOR: UserId = UserId(100);
pub const REPORTER: UserId = UserId(200);
pub const MODERATOR: UserId = UserId(300);

/// Mock platform that records every call.
pub struct MockPlatform {
    manage_messages: bool,
    moderators: HashSet<UserId>,
    closed_dms: HashSet<UserId>,
    messages: HashMap<MessageId, FlaggedMessage>,
    guild_name: Option<String>,
    fail_summary: bool,
    fail_channel_send: bool,
    fail_role_lookup: bool,
    fetch_failures: AtomicUsize,
    next_message_id: AtomicU64,
    fetches: AtomicUsize,
    dms: Mutex<Vec<(UserId, String)>>,
    channel_messages: Mutex<Vec<(ChannelId, OutgoingMessage)>>,
    summaries: Mutex<Vec<(ChannelId, ReportSummary)>>,
    deletions: Mutex<Vec<(ChannelId, MessageId)>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            manage_messages: true,
            moderators: HashSet::new(),
            closed_dms: HashSet::new(),
            messages: HashMap::new(),
            guild_name: Some("Test Guild".to_string()),
            fail_summary: false,
            fail_channel_send: false,
            fail_role_lookup: false,
            fetch_failures: AtomicUsize::new(0),
            next_message_id: AtomicU64::new(5000),
            fetches: AtomicUsize::new(0),
            dms: Mutex::new(Vec::new()),
            channel_messages: Mutex::new(Vec::new()),
            summaries: Mutex::new(Vec::new()),
            deletions: Mutex::new(Vec::new()),
        }
    }

    pub fn without_manage_messages(mut self) -> Self {
        self.manage_messages = false;
        self
    }

    pub fn with_moderator(mut self, user: UserId) -> Self {
        self.moderators.insert(user);
        self
    }

    pub fn with_closed_dms(mut self, user: UserId) -> Self {
        self.closed_dms.insert(user);
        self
    }

    pub fn with_message(mut self, message: FlaggedMessage) -> Self {
        self.messages.insert(*message.id(), message);
        self
    }

    pub fn without_guild_name(mut self) -> Self {
        self.guild_name = None;
        self
    }

    pub fn with_summary_failure(mut self) -> Self {
        self.fail_summary = true;
        self
    }

    pub fn with_channel_send_failure(mut self) -> Self {
        self.fail_channel_send = true;
        self
    }

    pub fn with_role_lookup_failure(mut self) -> Self {
        self.fail_role_lookup = true;
        self
    }

    /// Fail the next `count` message fetches, as a flaky connection would.
    pub fn with_fetch_failures(self, count: usize) -> Self {
        self.fetch_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn dms(&self) -> Vec<(UserId, String)> {
        self.dms.lock().clone()
    }

    pub fn dms_to(&self, user: UserId) -> Vec<String> {
        self.dms
            .lock()
            .iter()
            .filter(|(to, _)| *to == user)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn channel_messages(&self) -> Vec<(ChannelId, OutgoingMessage)> {
        self.channel_messages.lock().clone()
    }

    pub fn summaries(&self) -> Vec<(ChannelId, ReportSummary)> {
        self.summaries.lock().clone()
    }

    pub fn deletions(&self) -> Vec<(ChannelId, MessageId)> {
        self.deletions.lock().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> MessageId {
        MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ModerationPlatform for MockPlatform {
    async fn send_direct_message(&self, user: UserId, text: &str) -> PlatformResult<()> {
        if self.closed_dms.contains(&user) {
            return Err(PlatformError::new(PlatformErrorKind::DirectMessageFailed(
                "Cannot send messages to this user".to_string(),
            )));
        }
        self.dms.lock().push((user, text.to_string()));
        Ok(())
    }

    async fn send_channel_message(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> PlatformResult<MessageId> {
        if self.fail_channel_send {
            return Err(PlatformError::new(PlatformErrorKind::MessageSendFailed(
                "Missing Access".to_string(),
            )));
        }
        self.channel_messages.lock().push((channel, message));
        Ok(self.next_id())
    }

    async fn publish_report_summary(
        &self,
        channel: ChannelId,
        summary: &ReportSummary,
    ) -> PlatformResult<MessageId> {
        if self.fail_summary {
            return Err(PlatformError::new(PlatformErrorKind::MessageSendFailed(
                "Missing Access".to_string(),
            )));
        }
        self.summaries.lock().push((channel, summary.clone()));
        Ok(self.next_id())
    }

    async fn fetch_message(
        &self,
        _guild: GuildId,
        _channel: ChannelId,
        message: MessageId,
    ) -> PlatformResult<FlaggedMessage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .fetch_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PlatformError::new(PlatformErrorKind::Api(
                "Service Unavailable".to_string(),
            )));
        }
        self.messages
            .get(&message)
            .cloned()
            .ok_or_else(|| PlatformError::new(PlatformErrorKind::MessageNotFound(message.get())))
    }

    async fn guild_name(&self, _guild: GuildId) -> PlatformResult<String> {
        self.guild_name
            .clone()
            .ok_or_else(|| PlatformError::new(PlatformErrorKind::Api("Unknown Guild".to_string())))
    }

    async fn can_manage_messages(&self, _channel: ChannelId) -> PlatformResult<bool> {
        Ok(self.manage_messages)
    }

    async fn member_has_role(
        &self,
        _guild: GuildId,
        user: UserId,
        _role: RoleId,
    ) -> PlatformResult<bool> {
        if self.fail_role_lookup {
            return Err(PlatformError::new(PlatformErrorKind::MemberNotFound(
                user.get(),
            )));
        }
        Ok(self.moderators.contains(&user))
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()> {
        self.deletions.lock().push((channel, message));
        Ok(())
    }
}

/// Fetcher serving fixed payloads by URL; unknown URLs fail.
#[derive(Default)]
pub struct MockFetcher {
    payloads: HashMap<String, Vec<u8>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, url: &str, payload: &[u8]) -> Self {
        self.payloads.insert(url.to_string(), payload.to_vec());
        self
    }
}

#[async_trait]
impl AttachmentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::new(format!("Not Found: {url}")).with_status(404))
    }
}

/// Notifier that records acknowledgments, optionally failing.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ReporterNotifier for RecordingNotifier {
    async fn notify(&self, text: &str) -> PlatformResult<()> {
        if self.fail {
            return Err(PlatformError::new(PlatformErrorKind::InteractionFailed(
                "Unknown interaction".to_string(),
            )));
        }
        self.sent.lock().push(text.to_string());
        Ok(())
    }
}

/// Decision surface that records rejections and resolutions.
#[derive(Default)]
pub struct RecordingSurface {
    rejections: Mutex<Vec<String>>,
    resolutions: Mutex<Vec<Resolution>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejections(&self) -> Vec<String> {
        self.rejections.lock().clone()
    }

    pub fn resolutions(&self) -> Vec<Resolution> {
        self.resolutions.lock().clone()
    }
}

#[async_trait]
impl DecisionSurface for RecordingSurface {
    async fn reject(&self, text: &str) -> PlatformResult<()> {
        self.rejections.lock().push(text.to_string());
        Ok(())
    }

    async fn mark_resolved(&self, resolution: &Resolution) -> PlatformResult<()> {
        self.resolutions.lock().push(resolution.clone());
        Ok(())
    }
}

pub fn author() -> UserRef {
    UserRef::new(AUTHOR, "author")
}

pub fn reporter() -> UserRef {
    UserRef::new(REPORTER, "reporter")
}

pub fn moderator() -> UserRef {
    UserRef::new(MODERATOR, "moderator")
}

/// A text-only message in the origin channel.
pub fn flagged_message(id: u64, content: &str) -> FlaggedMessage {
    FlaggedMessageBuilder::default()
        .id(MessageId(id))
        .guild_id(GUILD)
        .channel_id(ORIGIN_CHANNEL)
        .author(author())
        .content(content)
        .build()
        .expect("Valid message")
}

/// A message carrying the given `(name, url)` attachments.
pub fn flagged_message_with_attachments(
    id: u64,
    content: &str,
    attachments: &[(&str, &str)],
) -> FlaggedMessage {
    FlaggedMessageBuilder::default()
        .id(MessageId(id))
        .guild_id(GUILD)
        .channel_id(ORIGIN_CHANNEL)
        .author(author())
        .content(content)
        .attachments(
            attachments
                .iter()
                .map(|(name, url)| AttachmentRef::new(*name, *url))
                .collect::<Vec<_>>(),
        )
        .build()
        .expect("Valid message")
}

/// Filer wired to the given platform, fetcher, and store.
pub fn filer(
    platform: Arc<MockPlatform>,
    fetcher: MockFetcher,
    store: Arc<ReportStore>,
) -> ReportFiler {
    ReportFiler::new(
        platform,
        store,
        AttachmentSnapshotter::new(Arc::new(fetcher)),
        MOD_CHANNEL,
    )
}
