//! Layered bot configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`tribunal.toml` shipped with the binary)
//! 2. `~/.config/tribunal/tribunal.toml`
//! 3. `./tribunal.toml`
//! 4. An explicit file passed with `--config`
//! 5. `TRIBUNAL__*` environment variables
//! 6. Command-line flags ([`ConfigOverrides`])

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use tribunal_core::{
    ChannelId, GuildId, ModerationSettings, ModerationSettingsBuilder, RoleId, TriggerMarker,
};
use tribunal_discord::{BotOptions, BotOptionsBuilder};
use tribunal_error::{ConfigError, TribunalResult};

const DEFAULT_CONFIG: &str = include_str!("../tribunal.toml");
const COMMAND_NAME_MAX: usize = 32;
const REDACTED: &str = "<redacted>";

/// Where reports go and who may decide them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ModerationConfig {
    /// Moderation channel id.
    #[serde(default)]
    pub channel_id: u64,
    /// Moderator role id.
    #[serde(default)]
    pub role_id: u64,
}

/// Discord connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscordConfig {
    /// Bot token. Usually supplied through `DISCORD_TOKEN` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Message context-menu command name.
    pub command_name: String,
    /// Guild to register the command in on startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<u64>,
    /// Application id; looked up from the token when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<u64>,
    /// Seconds before an attachment download is abandoned.
    pub attachment_timeout_secs: u64,
}

/// Log output format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Values supplied on the command line, applied over every file and
/// environment source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Bot token.
    pub token: Option<String>,
    /// Moderation channel id.
    pub channel_id: Option<u64>,
    /// Moderator role id.
    pub role_id: Option<u64>,
    /// Guild for command registration.
    pub guild_id: Option<u64>,
    /// Application id.
    pub application_id: Option<u64>,
}

/// Complete bot configuration.
///
/// # Example
///
/// ```no_run
/// use tribunal::TribunalConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TribunalConfig::load(None)?;
/// config.validate()?;
/// let settings = config.moderation_settings()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TribunalConfig {
    /// Report routing.
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Reaction trigger marker.
    #[serde(default)]
    pub trigger: TriggerMarker,
    /// Discord connection.
    pub discord: DiscordConfig,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TribunalConfig {
    /// Load from every source, optionally including an explicit file.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read (the explicit file is
    /// required; the others are optional) or the merged result does not parse.
    #[instrument(skip(explicit), fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> TribunalResult<Self> {
        debug!("Loading configuration");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tribunal/tribunal.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("tribunal").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIBUNAL")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load bundled defaults overlaid with a single file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TribunalResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns error if the bundled file does not parse.
    pub fn bundled() -> TribunalResult<Self> {
        Self::finish(Self::defaults())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> TribunalResult<Self> {
        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {e}")))?;
        Ok(config)
    }

    /// Apply command-line values.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(token) = overrides.token {
            self.discord.token = Some(token);
        }
        if let Some(channel_id) = overrides.channel_id {
            self.moderation.channel_id = channel_id;
        }
        if let Some(role_id) = overrides.role_id {
            self.moderation.role_id = role_id;
        }
        if overrides.guild_id.is_some() {
            self.discord.guild_id = overrides.guild_id;
        }
        if overrides.application_id.is_some() {
            self.discord.application_id = overrides.application_id;
        }
        self
    }

    /// Check the settings the bot cannot run without.
    ///
    /// The token is checked separately by [`Self::token`], so configuration
    /// can be inspected without one.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> TribunalResult<()> {
        if self.moderation.channel_id == 0 {
            return Err(ConfigError::invalid("moderation.channel_id", "must be set").into());
        }
        if self.moderation.role_id == 0 {
            return Err(ConfigError::invalid("moderation.role_id", "must be set").into());
        }
        if !self.trigger.is_configured() {
            return Err(ConfigError::invalid("trigger", "needs an emoji id or name").into());
        }
        if self.trigger.id().is_some_and(|id| id.get() == 0) {
            return Err(ConfigError::invalid("trigger.id", "must be non-zero").into());
        }

        let name_len = self.discord.command_name.chars().count();
        if name_len == 0 || name_len > COMMAND_NAME_MAX {
            return Err(ConfigError::invalid(
                "discord.command_name",
                format!("must be 1-{COMMAND_NAME_MAX} characters"),
            )
            .into());
        }
        if self.discord.guild_id == Some(0) {
            return Err(ConfigError::invalid("discord.guild_id", "must be non-zero").into());
        }
        if self.discord.application_id == Some(0) {
            return Err(ConfigError::invalid("discord.application_id", "must be non-zero").into());
        }
        if self.discord.attachment_timeout_secs == 0 {
            return Err(ConfigError::invalid("discord.attachment_timeout_secs", "must be positive").into());
        }
        Ok(())
    }

    /// The bot token.
    ///
    /// # Errors
    ///
    /// Returns error if no token was configured.
    pub fn token(&self) -> TribunalResult<&str> {
        match self.discord.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::new(
                "Discord token missing; set DISCORD_TOKEN or pass --token",
            )
            .into()),
        }
    }

    /// Guild for command registration, if configured.
    pub fn command_guild(&self) -> Option<GuildId> {
        self.discord.guild_id.map(GuildId)
    }

    /// Workflow settings.
    ///
    /// # Errors
    ///
    /// Returns error if the settings cannot be assembled.
    pub fn moderation_settings(&self) -> TribunalResult<ModerationSettings> {
        let settings = ModerationSettingsBuilder::default()
            .moderation_channel(ChannelId(self.moderation.channel_id))
            .moderator_role(RoleId(self.moderation.role_id))
            .trigger(self.trigger.clone())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid moderation settings: {e}")))?;
        Ok(settings)
    }

    /// Bot runtime options.
    ///
    /// # Errors
    ///
    /// Returns error if the options cannot be assembled.
    pub fn bot_options(&self) -> TribunalResult<BotOptions> {
        let options = BotOptionsBuilder::default()
            .command_name(self.discord.command_name.clone())
            .command_guild(self.command_guild())
            .application_id(self.discord.application_id)
            .attachment_timeout(Duration::from_secs(self.discord.attachment_timeout_secs))
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid bot options: {e}")))?;
        Ok(options)
    }

    /// Render as TOML with the token hidden.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn redacted_toml(&self) -> TribunalResult<String> {
        let mut shown = self.clone();
        if shown.discord.token.is_some() {
            shown.discord.token = Some(REDACTED.to_string());
        }
        let rendered = toml::to_string_pretty(&shown)
            .map_err(|e| ConfigError::new(format!("Failed to render configuration: {e}")))?;
        Ok(rendered)
    }
}
