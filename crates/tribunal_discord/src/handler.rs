//! serenity event handler routing Discord events into the report workflow.

use crate::commands::register_report_command;
use crate::conversions::{flagged_message, reaction_event, user_ref};
use crate::interactions::{ComponentSurface, InteractionNotifier};
use serenity::all::{
    CommandInteraction, CommandType, ComponentInteraction, Context, EventHandler, GatewayIntents,
    Interaction, Reaction, Ready, ResolvedTarget,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tribunal_core::notices::GUILD_ONLY;
use tribunal_core::{
    DecisionActor, DecisionControl, DecisionHandler, DecisionOutcome, GuildId, ReactionOutcome,
    ReportTriggers, ReporterNotifier,
};
use tribunal_error::{ReportError, ReportErrorKind, TribunalResult};

/// Event handler for the Tribunal bot.
pub struct TribunalHandler {
    triggers: Arc<ReportTriggers>,
    decisions: Arc<DecisionHandler>,
    command_name: String,
    command_guild: Option<GuildId>,
    application_id: Option<u64>,
}

impl TribunalHandler {
    /// Create a handler.
    ///
    /// When `command_guild` is set the report command is registered there on
    /// every ready event.
    pub fn new(
        triggers: Arc<ReportTriggers>,
        decisions: Arc<DecisionHandler>,
        command_name: impl Into<String>,
        command_guild: Option<GuildId>,
        application_id: Option<u64>,
    ) -> Self {
        Self {
            triggers,
            decisions,
            command_name: command_name.into(),
            command_guild,
            application_id,
        }
    }

    /// Gateway intents the workflow needs.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
    }

    #[instrument(skip_all, fields(command = %command.data.name, user_id = %command.user.id))]
    async fn handle_command(&self, ctx: &Context, command: &CommandInteraction) {
        if command.data.kind != CommandType::Message || command.data.name != self.command_name {
            debug!("Ignoring unrelated command");
            return;
        }

        let notifier = InteractionNotifier::new(&ctx.http, command);
        if let Err(e) = self.report_from_command(command, &notifier).await {
            error!(error = %e, "Report command failed");
            notifier.fail().await;
        }
    }

    async fn report_from_command(
        &self,
        command: &CommandInteraction,
        notifier: &InteractionNotifier<'_>,
    ) -> TribunalResult<()> {
        let Some(guild_id) = command.guild_id else {
            notifier.notify(GUILD_ONLY).await?;
            return Ok(());
        };

        let Some(ResolvedTarget::Message(target)) = command.data.target() else {
            return Err(ReportError::new(ReportErrorKind::MessageUnavailable(
                "command carried no target message".to_string(),
            ))
            .into());
        };

        let message = flagged_message(GuildId(guild_id.get()), target)?;
        let reporter = user_ref(&command.user);
        self.triggers
            .on_message_action(&message, &reporter, notifier)
            .await?;
        Ok(())
    }

    #[instrument(skip_all, fields(custom_id = %component.data.custom_id, user_id = %component.user.id))]
    async fn handle_component(&self, ctx: &Context, component: &ComponentInteraction) {
        if !DecisionControl::is_decision_control(&component.data.custom_id) {
            debug!("Ignoring component owned by something else");
            return;
        }

        let surface = ComponentSurface::new(&ctx.http, component);
        if let Err(e) = surface.acknowledge().await {
            warn!(error = %e, "Failed to defer decision response");
        }
        match self.decide(component, &surface).await {
            Ok(outcome) => debug!(?outcome, "Decision handled"),
            Err(e) => {
                error!(error = %e, "Decision failed");
                surface.fail().await;
            }
        }
    }

    async fn decide(
        &self,
        component: &ComponentInteraction,
        surface: &ComponentSurface<'_>,
    ) -> TribunalResult<DecisionOutcome> {
        let control = DecisionControl::parse(&component.data.custom_id)?;
        let actor = DecisionActor::new(
            component.guild_id.map(|g| GuildId(g.get())),
            user_ref(&component.user),
        );
        Ok(self.decisions.decide(&control, &actor, surface).await?)
    }
}

#[async_trait]
impl EventHandler for TribunalHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guild_count = ready.guilds.len(),
            "Connected to Discord"
        );

        let Some(guild) = self.command_guild else {
            return;
        };
        if let Err(e) =
            register_report_command(&ctx.http, guild, &self.command_name, self.application_id).await
        {
            error!(guild_id = %guild, error = %e, "Failed to register report command");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.handle_command(&ctx, &command).await,
            Interaction::Component(component) => self.handle_component(&ctx, &component).await,
            _ => {}
        }
    }

    #[instrument(skip_all, fields(message_id = %reaction.message_id, channel_id = %reaction.channel_id))]
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let reactor = match reaction.member.as_ref() {
            Some(member) => member.user.clone(),
            None => match reaction.user(&ctx).await {
                Ok(user) => user,
                Err(e) => {
                    warn!(error = %e, "Failed to resolve reacting user");
                    return;
                }
            },
        };

        let event = match reaction_event(&reaction, &reactor) {
            Ok(event) => event,
            Err(e) => {
                error!(error = %e, "Failed to narrow reaction event");
                return;
            }
        };

        match self.triggers.on_reaction_add(&event).await {
            Ok(ReactionOutcome::Filed(report_id)) => {
                info!(report_id = %report_id, "Report filed from reaction");
            }
            Ok(ReactionOutcome::Ignored(reason)) => debug!(%reason, "Reaction ignored"),
            Err(e) => error!(error = %e, "Reaction report failed"),
        }
    }
}
