//! Narrowed event schemas.
//!
//! Platform adapters convert their raw events into these types before calling
//! into the core, so nothing downstream depends on the shape of a gateway payload.

use crate::{ChannelId, EmojiId, GuildId, MessageId, UserId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A user as the report workflow needs to see them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct UserRef {
    /// Platform user id.
    id: UserId,
    /// Human-readable tag (e.g. `name` or `name#1234`).
    tag: String,
}

impl UserRef {
    /// Create a user reference.
    pub fn new(id: impl Into<UserId>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }

    /// Tag followed by a mention, as shown to moderators.
    pub fn labelled_mention(&self) -> String {
        format!("{} ({})", self.tag, self.id.mention())
    }
}

/// Reference to an attachment on a flagged message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// File name as uploaded.
    name: String,
    /// Download URL.
    url: String,
}

impl AttachmentRef {
    /// Create an attachment reference.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A guild message that a user asked moderators to review.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct FlaggedMessage {
    /// Message id.
    id: MessageId,
    /// Guild the message was posted in.
    guild_id: GuildId,
    /// Channel the message was posted in.
    channel_id: ChannelId,
    /// Original author.
    author: UserRef,
    /// Text body, possibly empty.
    #[builder(default)]
    content: String,
    /// Attachments in the order they appear on the message.
    #[builder(default)]
    attachments: Vec<AttachmentRef>,
}

/// Emoji carried by a reaction event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Getters, Serialize, Deserialize)]
pub struct EmojiRef {
    /// Custom emoji id; `None` for unicode emoji.
    id: Option<EmojiId>,
    /// Emoji name (the glyph itself for unicode emoji).
    name: Option<String>,
}

impl EmojiRef {
    /// A custom guild emoji.
    pub fn custom(id: impl Into<EmojiId>, name: Option<String>) -> Self {
        Self {
            id: Some(id.into()),
            name,
        }
    }

    /// A unicode emoji.
    pub fn unicode(glyph: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(glyph.into()),
        }
    }
}

/// A reaction being added to a message.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ReactionEvent {
    /// Guild of the reacted message; `None` in direct messages.
    #[builder(default)]
    guild_id: Option<GuildId>,
    /// Channel of the reacted message.
    channel_id: ChannelId,
    /// The reacted message.
    message_id: MessageId,
    /// User who added the reaction.
    reactor: UserRef,
    /// Whether the reacting account is automated.
    #[builder(default)]
    reactor_is_bot: bool,
    /// The emoji that was added.
    emoji: EmojiRef,
}
