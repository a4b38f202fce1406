//! Report records and identifiers.

use crate::{ChannelId, GuildId, UserRef};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Short opaque report identifier.
///
/// Eight lowercase base-36 characters, which keeps decision control ids well
/// inside the platform's custom id limit.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}", _0)]
pub struct ReportId(String);

impl ReportId {
    /// Length of every generated identifier.
    pub const LEN: usize = 8;

    /// Generate a fresh random identifier.
    ///
    /// Uniqueness among pending reports is enforced by [`crate::ReportStore`].
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..Self::LEN)
            .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
            .collect();
        Self(id)
    }

    /// Validate an identifier received from outside (e.g. a control activation).
    ///
    /// # Example
    ///
    /// ```
    /// use tribunal_core::ReportId;
    ///
    /// assert!(ReportId::parse("a1b2c3d4").is_some());
    /// assert!(ReportId::parse("A1B2C3D4").is_none());
    /// assert!(ReportId::parse("short").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == Self::LEN && raw.bytes().all(|b| ID_ALPHABET.contains(&b));
        valid.then(|| Self(raw.to_string()))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Attachment payload captured at report time.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CapturedAttachment {
    /// File name to re-upload under.
    name: String,
    /// Raw file bytes.
    payload: Vec<u8>,
}

impl CapturedAttachment {
    /// Create a captured attachment.
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Report contents before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct NewReport {
    /// Guild the flagged message came from.
    guild_id: GuildId,
    /// Channel the flagged message came from.
    channel_id: ChannelId,
    /// Author of the flagged message.
    author: UserRef,
    /// Captured text body.
    content: String,
    /// Successfully downloaded attachments, in message order.
    #[builder(default)]
    attachments: Vec<CapturedAttachment>,
}

impl NewReport {
    /// Assemble report contents.
    pub fn new(
        guild_id: GuildId,
        channel_id: ChannelId,
        author: UserRef,
        content: String,
        attachments: Vec<CapturedAttachment>,
    ) -> Self {
        Self {
            guild_id,
            channel_id,
            author,
            content,
            attachments,
        }
    }
}

/// A pending moderation decision.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Report {
    /// Store-assigned identifier.
    id: ReportId,
    /// Guild the flagged message came from.
    guild_id: GuildId,
    /// Channel the flagged message came from.
    channel_id: ChannelId,
    /// Author of the flagged message.
    author: UserRef,
    /// Captured text body.
    content: String,
    /// Successfully downloaded attachments, in message order.
    attachments: Vec<CapturedAttachment>,
    /// When the report was filed.
    filed_at: DateTime<Utc>,
}

impl Report {
    pub(crate) fn from_new(id: ReportId, new: NewReport) -> Self {
        Self {
            id,
            guild_id: new.guild_id,
            channel_id: new.channel_id,
            author: new.author,
            content: new.content,
            attachments: new.attachments,
            filed_at: Utc::now(),
        }
    }

    /// Whether any attachment payloads were captured.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}
