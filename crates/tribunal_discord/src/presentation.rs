//! Moderator-facing report presentation.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, Embed, Timestamp,
};
use tribunal_core::{DecisionAction, DecisionControl, ReportId, ReportSummary, Resolution};

const PENDING_COLOUR: u32 = 0xffcc00;
const APPROVED_COLOUR: u32 = 0x00aa00;
const DELETED_COLOUR: u32 = 0xdd0000;

/// Summary posted to the moderation channel when a report is filed.
pub fn summary_embed(summary: &ReportSummary) -> CreateEmbed {
    CreateEmbed::new()
        .title("New message report")
        .colour(PENDING_COLOUR)
        .field("Report ID", summary.report_id().as_str(), true)
        .field("Original channel", summary.origin_channel().mention(), true)
        .field("Message author", summary.author().labelled_mention(), false)
        .field("Reported by", summary.reporter().labelled_mention(), false)
        .field("Content", summary.excerpt(), false)
        .timestamp(Timestamp::from(*summary.filed_at()))
}

/// The approve/delete buttons for a report.
pub fn decision_row(report_id: &ReportId, disabled: bool) -> CreateActionRow {
    let button = |action: DecisionAction, label: &str, style: ButtonStyle| {
        CreateButton::new(DecisionControl::new(action, report_id.clone()).custom_id())
            .label(label)
            .style(style)
            .disabled(disabled)
    };

    CreateActionRow::Buttons(vec![
        button(DecisionAction::Approve, "Restore message", ButtonStyle::Success),
        button(DecisionAction::Delete, "Delete and notify", ButtonStyle::Danger),
    ])
}

/// The summary embed recoloured and annotated with its outcome.
///
/// Starts from the embed already on the summary message when there is one,
/// so the original fields are kept.
pub fn resolved_embed(existing: Option<&Embed>, resolution: &Resolution) -> CreateEmbed {
    let colour = match resolution.action() {
        DecisionAction::Approve => APPROVED_COLOUR,
        DecisionAction::Delete => DELETED_COLOUR,
    };

    existing
        .cloned()
        .map(CreateEmbed::from)
        .unwrap_or_else(|| CreateEmbed::new().title(format!("Report {}", resolution.report_id())))
        .colour(colour)
        .field("Outcome", resolution.describe(), false)
}
