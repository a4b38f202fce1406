//! Bot client setup and lifecycle management.

use crate::commands::DEFAULT_COMMAND_NAME;
use crate::handler::TribunalHandler;
use crate::platform::SerenityPlatform;
use derive_getters::Getters;
use serenity::Client;
use serenity::all::{ApplicationId, Http};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use tribunal_core::{
    AttachmentSnapshotter, DecisionHandler, GuildId, HttpAttachmentFetcher, ModerationPlatform,
    ModerationSettings, ReportFiler, ReportStore, ReportTriggers, TriggerDedup,
};
use tribunal_error::{PlatformError, PlatformErrorKind, TribunalResult};

/// Runtime options beyond the moderation settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct BotOptions {
    /// Name of the message context-menu command.
    #[builder(default = DEFAULT_COMMAND_NAME.to_string())]
    command_name: String,
    /// Guild to register the command in on startup.
    #[builder(default)]
    command_guild: Option<GuildId>,
    /// Application id; looked up from the token when absent.
    #[builder(default)]
    application_id: Option<u64>,
    /// Upper bound on a single attachment download.
    #[builder(default = Duration::from_secs(30))]
    attachment_timeout: Duration,
}

/// The Tribunal Discord bot.
///
/// Owns the serenity client and the shared workflow state (report store and
/// reaction dedup set), both of which live exactly as long as the process.
pub struct TribunalBot {
    client: Client,
    store: Arc<ReportStore>,
}

impl TribunalBot {
    /// Build the workflow and the serenity client.
    ///
    /// # Errors
    ///
    /// Returns error if the attachment HTTP client or the serenity client
    /// cannot be built.
    #[instrument(skip(token, settings, options), fields(token_len = token.len()))]
    pub async fn new(
        token: &str,
        settings: ModerationSettings,
        options: BotOptions,
    ) -> TribunalResult<Self> {
        info!("Initializing Tribunal bot");

        let http = Arc::new(Http::new(token));
        if let Some(id) = options.application_id {
            http.set_application_id(ApplicationId::new(id));
        }
        let platform: Arc<dyn ModerationPlatform> = Arc::new(SerenityPlatform::new(http));

        let store = Arc::new(ReportStore::new());
        let fetcher = HttpAttachmentFetcher::new(options.attachment_timeout)?;
        let filer = Arc::new(ReportFiler::new(
            Arc::clone(&platform),
            Arc::clone(&store),
            AttachmentSnapshotter::new(Arc::new(fetcher)),
            *settings.moderation_channel(),
        ));
        let triggers = Arc::new(ReportTriggers::new(
            filer,
            Arc::clone(&platform),
            Arc::new(TriggerDedup::new()),
            settings.trigger().clone(),
        ));
        let decisions = Arc::new(DecisionHandler::new(
            platform,
            Arc::clone(&store),
            *settings.moderator_role(),
        ));

        let handler = TribunalHandler::new(
            triggers,
            decisions,
            options.command_name.clone(),
            options.command_guild,
            options.application_id,
        );
        let intents = TribunalHandler::intents();
        info!(?intents, "Building serenity client");

        let mut builder = Client::builder(token, intents).event_handler(handler);
        if let Some(id) = options.application_id {
            builder = builder.application_id(ApplicationId::new(id));
        }
        let client = builder.await.map_err(|e| {
            PlatformError::new(PlatformErrorKind::Api(format!(
                "Failed to build client: {e}"
            )))
        })?;

        Ok(Self { client, store })
    }

    /// Run until the gateway connection ends or Ctrl+C is received.
    ///
    /// Pending reports are dropped on exit.
    ///
    /// # Errors
    ///
    /// Returns error if the client fails to start or hits a fatal gateway error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> TribunalResult<()> {
        let shard_manager = Arc::clone(&self.client.shard_manager);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!(pending_reports = store.len(), "Shutting down");
                shard_manager.shutdown_all().await;
            }
        });

        info!("Starting Tribunal bot");
        self.client.start().await.map_err(PlatformError::from)?;
        Ok(())
    }
}
