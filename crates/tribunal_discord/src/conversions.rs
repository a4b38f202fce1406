//! Narrowing of serenity payloads into workflow schemas.
//!
//! Core ids are plain `u64` newtypes; serenity ids are non-zero. Converting
//! back relies on every core id having come from Discord or from validated
//! configuration.

use serenity::all as discord;
use tribunal_core::{
    AttachmentRef, ChannelId, EmojiRef, FlaggedMessage, FlaggedMessageBuilder, GuildId, MessageId,
    ReactionEvent, ReactionEventBuilder, RoleId, UserId, UserRef,
};
use tribunal_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// Narrow a Discord user.
pub fn user_ref(user: &discord::User) -> UserRef {
    UserRef::new(user.id.get(), user.tag())
}

/// Narrow a guild message.
///
/// Messages resolved from interactions and fetched over HTTP do not always
/// carry their guild id, so the caller supplies it.
///
/// # Errors
///
/// Returns [`PlatformErrorKind::MalformedEvent`] if the schema cannot be assembled.
pub fn flagged_message(guild: GuildId, message: &discord::Message) -> PlatformResult<FlaggedMessage> {
    let attachments: Vec<AttachmentRef> = message
        .attachments
        .iter()
        .map(|a| AttachmentRef::new(a.filename.clone(), a.url.clone()))
        .collect();

    FlaggedMessageBuilder::default()
        .id(MessageId(message.id.get()))
        .guild_id(guild)
        .channel_id(ChannelId(message.channel_id.get()))
        .author(user_ref(&message.author))
        .content(message.content.clone())
        .attachments(attachments)
        .build()
        .map_err(|e| PlatformError::new(PlatformErrorKind::MalformedEvent(e.to_string())))
}

/// Narrow a reaction emoji.
pub fn emoji_ref(emoji: &discord::ReactionType) -> EmojiRef {
    match emoji {
        discord::ReactionType::Custom { id, name, .. } => EmojiRef::custom(id.get(), name.clone()),
        discord::ReactionType::Unicode(glyph) => EmojiRef::unicode(glyph.clone()),
        _ => EmojiRef::default(),
    }
}

/// Narrow a reaction-add event, given the (resolved) reacting user.
///
/// # Errors
///
/// Returns [`PlatformErrorKind::MalformedEvent`] if the schema cannot be assembled.
pub fn reaction_event(
    reaction: &discord::Reaction,
    reactor: &discord::User,
) -> PlatformResult<ReactionEvent> {
    ReactionEventBuilder::default()
        .guild_id(reaction.guild_id.map(|g| GuildId(g.get())))
        .channel_id(ChannelId(reaction.channel_id.get()))
        .message_id(MessageId(reaction.message_id.get()))
        .reactor(user_ref(reactor))
        .reactor_is_bot(reactor.bot)
        .emoji(emoji_ref(&reaction.emoji))
        .build()
        .map_err(|e| PlatformError::new(PlatformErrorKind::MalformedEvent(e.to_string())))
}

pub(crate) fn to_guild(id: GuildId) -> discord::GuildId {
    discord::GuildId::new(id.get())
}

pub(crate) fn to_channel(id: ChannelId) -> discord::ChannelId {
    discord::ChannelId::new(id.get())
}

pub(crate) fn to_message(id: MessageId) -> discord::MessageId {
    discord::MessageId::new(id.get())
}

pub(crate) fn to_user(id: UserId) -> discord::UserId {
    discord::UserId::new(id.get())
}

pub(crate) fn to_role(id: RoleId) -> discord::RoleId {
    discord::RoleId::new(id.get())
}

pub(crate) fn from_message(id: discord::MessageId) -> MessageId {
    MessageId(id.get())
}
