//! serenity-backed implementation of the workflow's platform boundary.

use crate::conversions::{
    flagged_message, from_message, to_channel, to_guild, to_message, to_role, to_user,
};
use crate::presentation::{decision_row, summary_embed};
use async_trait::async_trait;
use serenity::all::{
    Channel, ChannelId as DiscordChannelId, ChannelType, CreateAttachment, CreateMessage,
    GuildChannel, Http, UserId as DiscordUserId,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use tribunal_core::{
    ChannelId, FlaggedMessage, GuildId, MessageId, ModerationPlatform, OutgoingMessage,
    ReportSummary, RoleId, UserId,
};
use tribunal_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// Discord platform implementation over serenity's HTTP client.
pub struct SerenityPlatform {
    http: Arc<Http>,
    bot_user: OnceCell<DiscordUserId>,
}

impl SerenityPlatform {
    /// Create a platform sharing an existing HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            bot_user: OnceCell::new(),
        }
    }

    fn http(&self) -> &Http {
        &self.http
    }

    async fn guild_channel(&self, channel: DiscordChannelId) -> PlatformResult<GuildChannel> {
        match self.http.get_channel(channel).await? {
            Channel::Guild(guild_channel) => Ok(guild_channel),
            _ => Err(PlatformError::new(PlatformErrorKind::ChannelNotFound(
                channel.get(),
            ))),
        }
    }

    /// The bot's own user id, fetched once.
    async fn bot_user(&self) -> PlatformResult<DiscordUserId> {
        self.bot_user
            .get_or_try_init(|| async {
                let user = self.http.get_current_user().await?;
                Ok::<_, PlatformError>(user.id)
            })
            .await
            .copied()
    }
}

#[async_trait]
impl ModerationPlatform for SerenityPlatform {
    #[instrument(skip(self, text), fields(user_id = %user))]
    async fn send_direct_message(&self, user: UserId, text: &str) -> PlatformResult<()> {
        let dm_failed =
            |e: serenity::Error| PlatformError::new(PlatformErrorKind::DirectMessageFailed(e.to_string()));

        let channel = to_user(user)
            .create_dm_channel(self.http())
            .await
            .map_err(dm_failed)?;
        channel
            .id
            .send_message(self.http(), CreateMessage::new().content(text))
            .await
            .map_err(dm_failed)?;

        debug!("Direct message sent");
        Ok(())
    }

    #[instrument(skip(self, message), fields(channel_id = %channel, file_count = message.files().len()))]
    async fn send_channel_message(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> PlatformResult<MessageId> {
        let files = message
            .files()
            .iter()
            .map(|f| CreateAttachment::bytes(f.payload().clone(), f.name().clone()));
        let builder = CreateMessage::new()
            .content(message.text().clone())
            .add_files(files);

        let sent = to_channel(channel)
            .send_message(self.http(), builder)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::MessageSendFailed(e.to_string())))?;

        Ok(from_message(sent.id))
    }

    #[instrument(skip(self, summary), fields(channel_id = %channel, report_id = %summary.report_id()))]
    async fn publish_report_summary(
        &self,
        channel: ChannelId,
        summary: &ReportSummary,
    ) -> PlatformResult<MessageId> {
        let builder = CreateMessage::new()
            .embed(summary_embed(summary))
            .components(vec![decision_row(summary.report_id(), false)]);

        let sent = to_channel(channel)
            .send_message(self.http(), builder)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::MessageSendFailed(e.to_string())))?;

        Ok(from_message(sent.id))
    }

    #[instrument(skip(self), fields(guild_id = %guild, channel_id = %channel, message_id = %message))]
    async fn fetch_message(
        &self,
        guild: GuildId,
        channel: ChannelId,
        message: MessageId,
    ) -> PlatformResult<FlaggedMessage> {
        let raw = self
            .http
            .get_message(to_channel(channel), to_message(message))
            .await
            .map_err(|e| {
                debug!(error = %e, "Message lookup failed");
                PlatformError::new(PlatformErrorKind::MessageNotFound(message.get()))
            })?;

        flagged_message(guild, &raw)
    }

    async fn guild_name(&self, guild: GuildId) -> PlatformResult<String> {
        Ok(self.http.get_guild(to_guild(guild)).await?.name)
    }

    #[instrument(skip(self), fields(channel_id = %channel))]
    async fn can_manage_messages(&self, channel: ChannelId) -> PlatformResult<bool> {
        let mut guild_channel = self.guild_channel(to_channel(channel)).await?;

        // Threads inherit their parent's overwrites.
        let source = permission_channel(
            guild_channel.kind,
            guild_channel.id,
            guild_channel.parent_id,
        );
        if source != guild_channel.id {
            debug!(parent_id = %source, "Resolving permissions through thread parent");
            guild_channel = self.guild_channel(source).await?;
        }

        let guild = self.http.get_guild(guild_channel.guild_id).await?;
        let bot = self.bot_user().await?;
        let member = self.http.get_member(guild_channel.guild_id, bot).await?;

        let permissions = guild.user_permissions_in(&guild_channel, &member);
        debug!(?permissions, "Resolved bot permissions");
        Ok(permissions.manage_messages())
    }

    async fn member_has_role(
        &self,
        guild: GuildId,
        user: UserId,
        role: RoleId,
    ) -> PlatformResult<bool> {
        let member = self
            .http
            .get_member(to_guild(guild), to_user(user))
            .await
            .map_err(|_| PlatformError::new(PlatformErrorKind::MemberNotFound(user.get())))?;

        Ok(member.roles.contains(&to_role(role)))
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> PlatformResult<()> {
        to_channel(channel)
            .delete_message(self.http(), to_message(message))
            .await?;
        Ok(())
    }
}

/// Channel whose permission overwrites apply to messages in `id`.
fn permission_channel(
    kind: ChannelType,
    id: DiscordChannelId,
    parent_id: Option<DiscordChannelId>,
) -> DiscordChannelId {
    match (kind, parent_id) {
        (
            ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread,
            Some(parent),
        ) => parent,
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threads_resolve_through_parent() {
        let thread = DiscordChannelId::new(11);
        let parent = DiscordChannelId::new(10);

        for kind in [
            ChannelType::PublicThread,
            ChannelType::PrivateThread,
            ChannelType::NewsThread,
        ] {
            assert_eq!(permission_channel(kind, thread, Some(parent)), parent);
        }
    }

    #[test]
    fn text_channels_resolve_to_themselves() {
        let channel = DiscordChannelId::new(10);
        let category = DiscordChannelId::new(1);

        // A category parent does not replace the channel's own overwrites
        assert_eq!(
            permission_channel(ChannelType::Text, channel, Some(category)),
            channel
        );
        assert_eq!(permission_channel(ChannelType::Text, channel, None), channel);
    }
}
