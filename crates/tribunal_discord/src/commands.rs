//! Report command registration.

use crate::conversions::to_guild;
use serenity::all::{ApplicationId, Command, CommandType, CreateCommand, Http};
use tracing::{info, instrument};
use tribunal_core::GuildId;
use tribunal_error::PlatformResult;

/// Name shown in the message context menu when none is configured.
pub const DEFAULT_COMMAND_NAME: &str = "Report to moderators";

/// The message context-menu command that files a report.
pub fn report_command(name: &str) -> CreateCommand {
    CreateCommand::new(name).kind(CommandType::Message)
}

/// Register the report command in a guild, replacing the guild's commands.
///
/// When `application_id` is `None` it is looked up from the token.
///
/// # Errors
///
/// Returns error if the application lookup or the registration call fails.
#[instrument(skip(http), fields(guild_id = %guild))]
pub async fn register_report_command(
    http: &Http,
    guild: GuildId,
    name: &str,
    application_id: Option<u64>,
) -> PlatformResult<Vec<Command>> {
    if http.application_id().is_none() {
        let id = match application_id {
            Some(id) => ApplicationId::new(id),
            None => http.get_current_application_info().await?.id,
        };
        http.set_application_id(id);
    }

    let registered = to_guild(guild)
        .set_commands(http, vec![report_command(name)])
        .await?;

    info!(count = registered.len(), "Registered report command");
    Ok(registered)
}

/// Register the report command using a standalone HTTP client.
///
/// For one-off registration outside a running bot.
///
/// # Errors
///
/// Returns error if the application lookup or the registration call fails.
pub async fn register_with_token(
    token: &str,
    guild: GuildId,
    name: &str,
    application_id: Option<u64>,
) -> PlatformResult<Vec<Command>> {
    let http = Http::new(token);
    register_report_command(&http, guild, name, application_id).await
}
