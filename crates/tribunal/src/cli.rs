//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tribunal::ConfigOverrides;

/// Tribunal - route reported Discord messages to moderators for review
#[derive(Parser, Debug)]
#[command(name = "tribunal")]
#[command(about = "Route reported Discord messages to moderators for review", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Additional configuration file, applied over the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Channel that receives report summaries
    #[arg(long, env = "MOD_CHANNEL_ID", global = true)]
    pub mod_channel: Option<u64>,

    /// Role allowed to decide reports
    #[arg(long, env = "MOD_ROLE_ID", global = true)]
    pub mod_role: Option<u64>,

    /// Guild to register the report command in
    #[arg(long, env = "GUILD_ID", global = true)]
    pub guild: Option<u64>,

    /// Discord application id
    #[arg(long, env = "CLIENT_ID", global = true)]
    pub application_id: Option<u64>,
}

impl Cli {
    /// Command-line values that override file and environment configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            channel_id: self.mod_channel,
            role_id: self.mod_role,
            guild_id: self.guild,
            application_id: self.application_id,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and handle reports until interrupted
    Run,

    /// Register the report context-menu command in the configured guild
    RegisterCommands,

    /// Load, validate, and print the effective configuration
    CheckConfig,
}
