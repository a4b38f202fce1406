//! Tribunal bot binary.
//!
//! - `run`: start the bot
//! - `register-commands`: register the report command in a guild
//! - `check-config`: print the effective configuration

use clap::Parser;
use tracing::info;
use tribunal::{TribunalConfig, init_logging};
use tribunal_discord::{TribunalBot, register_with_token};
use tribunal_error::{ConfigError, TribunalResult};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = TribunalConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());

    init_logging(cli.verbose, config.logging.format)?;

    match cli.command {
        Commands::Run => run(&config).await?,
        Commands::RegisterCommands => register_commands(&config).await?,
        Commands::CheckConfig => check_config(&config)?,
    }

    Ok(())
}

async fn run(config: &TribunalConfig) -> TribunalResult<()> {
    config.validate()?;
    let mut bot = TribunalBot::new(
        config.token()?,
        config.moderation_settings()?,
        config.bot_options()?,
    )
    .await?;
    bot.start().await
}

async fn register_commands(config: &TribunalConfig) -> TribunalResult<()> {
    config.validate()?;
    let guild = config.command_guild().ok_or_else(|| {
        ConfigError::new("discord.guild_id (or GUILD_ID) is required to register commands")
    })?;

    let registered = register_with_token(
        config.token()?,
        guild,
        &config.discord.command_name,
        config.discord.application_id,
    )
    .await?;

    for command in registered {
        info!(name = %command.name, id = %command.id, "Command registered");
    }
    Ok(())
}

fn check_config(config: &TribunalConfig) -> TribunalResult<()> {
    config.validate()?;
    println!("{}", config.redacted_toml()?);
    if config.token().is_err() {
        println!("# warning: no Discord token configured");
    }
    Ok(())
}
