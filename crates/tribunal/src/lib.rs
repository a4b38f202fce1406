//! Tribunal bot configuration and process setup.
//!
//! The binary wires these together; they live in a library so configuration
//! loading can be tested without starting the bot.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod observability;

pub use config::{
    ConfigOverrides, DiscordConfig, LogFormat, LoggingConfig, ModerationConfig, TribunalConfig,
};
pub use observability::init_logging;
