//! Discord integration for Tribunal.
//!
//! Connects the platform-agnostic workflow in `tribunal_core` to Discord
//! through serenity.
//!
//! # Architecture
//!
//! ## Boundary
//! - **platform**: [`SerenityPlatform`], the HTTP-backed `ModerationPlatform`
//! - **conversions**: narrowing of gateway payloads into core schemas
//!
//! ## Presentation
//! - **presentation**: report summary embed and decision buttons
//! - **interactions**: ephemeral replies and summary updates for interactions
//!
//! ## Runtime
//! - **handler**: serenity `EventHandler` routing events into the workflow
//! - **commands**: message context-menu command registration
//! - **client**: [`TribunalBot`], client construction and lifecycle
//!
//! # Usage
//!
//! ```rust,no_run
//! use tribunal_core::{ChannelId, ModerationSettingsBuilder, RoleId};
//! use tribunal_discord::{BotOptionsBuilder, TribunalBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ModerationSettingsBuilder::default()
//!         .moderation_channel(ChannelId(1234))
//!         .moderator_role(RoleId(5678))
//!         .build()?;
//!     let options = BotOptionsBuilder::default().build()?;
//!
//!     let mut bot = TribunalBot::new(&std::env::var("DISCORD_TOKEN")?, settings, options).await?;
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod commands;
mod conversions;
mod handler;
mod interactions;
mod platform;
mod presentation;

pub use client::{BotOptions, BotOptionsBuilder, TribunalBot};
pub use commands::{
    DEFAULT_COMMAND_NAME, register_report_command, register_with_token, report_command,
};
pub use conversions::{emoji_ref, flagged_message, reaction_event, user_ref};
pub use handler::TribunalHandler;
pub use interactions::{ComponentSurface, InteractionNotifier};
pub use platform::SerenityPlatform;
pub use presentation::{decision_row, resolved_embed, summary_embed};
