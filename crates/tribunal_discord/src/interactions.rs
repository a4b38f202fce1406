//! Interaction-backed notifier and decision surface.
//!
//! Discord accepts exactly one initial response per interaction, within three
//! seconds of the event. Both types remember whether the user has been
//! answered, so the event handler's catch-all only sends its generic failure
//! notice when nothing else was sent.
//!
//! Decisions can take longer than the response window (restoring re-uploads
//! every captured file), so [`ComponentSurface::acknowledge`] defers the
//! response up front and later replies edit the message or follow up.

use crate::presentation::{decision_row, resolved_embed};
use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, ComponentInteraction, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, EditInteractionResponse,
    Http,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;
use tribunal_core::notices::GENERIC_FAILURE;
use tribunal_core::{DecisionSurface, ReporterNotifier, Resolution};
use tribunal_error::{PlatformError, PlatformErrorKind, PlatformResult};

fn ephemeral(text: &str) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(text)
            .ephemeral(true),
    )
}

fn interaction_failed(e: serenity::Error) -> PlatformError {
    PlatformError::new(PlatformErrorKind::InteractionFailed(e.to_string()))
}

/// Acknowledges a report command with an ephemeral reply.
pub struct InteractionNotifier<'a> {
    http: &'a Http,
    command: &'a CommandInteraction,
    responded: AtomicBool,
}

impl<'a> InteractionNotifier<'a> {
    /// Respond to `command`.
    pub fn new(http: &'a Http, command: &'a CommandInteraction) -> Self {
        Self {
            http,
            command,
            responded: AtomicBool::new(false),
        }
    }

    /// Whether the interaction has been answered.
    pub fn responded(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }

    /// Send the generic failure notice if the interaction is still unanswered.
    pub async fn fail(&self) {
        if self.responded() {
            return;
        }
        if let Err(e) = self.notify(GENERIC_FAILURE).await {
            warn!(error = %e, "Failed to send failure notice");
        }
    }
}

#[async_trait]
impl ReporterNotifier for InteractionNotifier<'_> {
    async fn notify(&self, text: &str) -> PlatformResult<()> {
        self.command
            .create_response(self.http, ephemeral(text))
            .await
            .map_err(interaction_failed)?;
        self.responded.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Where the next reply to a component interaction is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyRoute {
    /// The initial response is still unused.
    Initial,
    /// The response was deferred; edit the message or send a follow-up.
    Deferred,
}

/// Response bookkeeping for one component interaction.
#[derive(Debug, Default)]
struct ResponseState {
    acknowledged: AtomicBool,
    answered: AtomicBool,
}

impl ResponseState {
    fn route(&self) -> ReplyRoute {
        if self.acknowledged.load(Ordering::SeqCst) {
            ReplyRoute::Deferred
        } else {
            ReplyRoute::Initial
        }
    }

    fn acknowledge(&self) {
        self.acknowledged.store(true, Ordering::SeqCst);
    }

    fn answer(&self) {
        self.answered.store(true, Ordering::SeqCst);
    }

    fn answered(&self) -> bool {
        self.answered.load(Ordering::SeqCst)
    }
}

/// The report summary message whose button was pressed.
pub struct ComponentSurface<'a> {
    http: &'a Http,
    component: &'a ComponentInteraction,
    state: ResponseState,
}

impl<'a> ComponentSurface<'a> {
    /// Respond to `component`.
    pub fn new(http: &'a Http, component: &'a ComponentInteraction) -> Self {
        Self {
            http,
            component,
            state: ResponseState::default(),
        }
    }

    /// Defer the response so a slow decision still lands.
    ///
    /// The user sees nothing until the message is updated or a follow-up is
    /// sent. If this fails, later replies fall back to the initial response.
    ///
    /// # Errors
    ///
    /// Returns error if Discord rejects the deferral.
    pub async fn acknowledge(&self) -> PlatformResult<()> {
        self.component
            .create_response(self.http, CreateInteractionResponse::Acknowledge)
            .await
            .map_err(interaction_failed)?;
        self.state.acknowledge();
        Ok(())
    }

    /// Whether the user has been answered.
    pub fn responded(&self) -> bool {
        self.state.answered()
    }

    /// Send the generic failure notice if the user is still unanswered.
    pub async fn fail(&self) {
        if self.responded() {
            return;
        }
        if let Err(e) = self.reject(GENERIC_FAILURE).await {
            warn!(error = %e, "Failed to send failure notice");
        }
    }
}

#[async_trait]
impl DecisionSurface for ComponentSurface<'_> {
    async fn reject(&self, text: &str) -> PlatformResult<()> {
        match self.state.route() {
            ReplyRoute::Initial => {
                self.component
                    .create_response(self.http, ephemeral(text))
                    .await
                    .map_err(interaction_failed)?;
            }
            ReplyRoute::Deferred => {
                let followup = CreateInteractionResponseFollowup::new()
                    .content(text)
                    .ephemeral(true);
                self.component
                    .create_followup(self.http, followup)
                    .await
                    .map_err(interaction_failed)?;
            }
        }
        self.state.answer();
        Ok(())
    }

    async fn mark_resolved(&self, resolution: &Resolution) -> PlatformResult<()> {
        let embed = resolved_embed(self.component.message.embeds.first(), resolution);
        let row = decision_row(resolution.report_id(), true);

        match self.state.route() {
            ReplyRoute::Initial => {
                let update = CreateInteractionResponseMessage::new()
                    .embeds(vec![embed])
                    .components(vec![row]);
                self.component
                    .create_response(self.http, CreateInteractionResponse::UpdateMessage(update))
                    .await
                    .map_err(interaction_failed)?;
            }
            ReplyRoute::Deferred => {
                let edit = EditInteractionResponse::new()
                    .embeds(vec![embed])
                    .components(vec![row]);
                self.component
                    .edit_response(self.http, edit)
                    .await
                    .map_err(interaction_failed)?;
            }
        }
        self.state.answer();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_interaction_uses_initial_response() {
        let state = ResponseState::default();
        assert_eq!(state.route(), ReplyRoute::Initial);
        assert!(!state.answered());
    }

    #[test]
    fn acknowledged_interaction_still_needs_an_answer() {
        let state = ResponseState::default();
        state.acknowledge();

        assert_eq!(state.route(), ReplyRoute::Deferred);
        // A deferral shows the user nothing, so the catch-all must still fire
        assert!(!state.answered());

        state.answer();
        assert!(state.answered());
        assert_eq!(state.route(), ReplyRoute::Deferred);
    }
}
