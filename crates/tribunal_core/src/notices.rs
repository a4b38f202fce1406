//! User-facing text produced by the report workflow.

use crate::{ReportId, UserId};

/// Acknowledgment sent to whoever filed a report.
pub const REPORT_ACKNOWLEDGED: &str =
    "Thanks. Your report has been sent to the moderation team.";

/// Rejection for a decision on a report that is no longer pending.
pub const REPORT_UNAVAILABLE: &str =
    "This report is no longer available (it was already resolved or the bot restarted).";

/// Rejection for a decision by someone without the moderator role.
pub const MODERATORS_ONLY: &str = "Only moderators can make decisions on reports.";

/// Reply when the report command is used outside a server.
pub const GUILD_ONLY: &str = "Messages can only be reported from inside a server.";

/// Last-resort reply when handling an interaction failed.
pub const GENERIC_FAILURE: &str = "An error occurred while processing this action.";

/// Stored in place of an empty message body.
pub const EMPTY_CONTENT: &str = "[no text]";

/// File name used when an attachment arrives without one.
pub const DEFAULT_ATTACHMENT_NAME: &str = "file";

/// Upper bound on the content excerpt shown to moderators.
pub const SUMMARY_EXCERPT_LIMIT: usize = 1024;

/// Upper bound on a single platform message.
pub const MESSAGE_LIMIT: usize = 2000;

const ELLIPSIS: char = '…';

/// Truncate `content` to at most `limit` characters, marking the cut.
///
/// ```
/// use tribunal_core::notices::excerpt;
///
/// assert_eq!(excerpt("hello", 10), "hello");
/// assert_eq!(excerpt("hello world", 5), "hell…");
/// ```
pub fn excerpt(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(limit.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Caption for the follow-up message that carries a report's files.
pub fn attachments_caption(report_id: &ReportId) -> String {
    format!("Attachments for report **{report_id}**:")
}

/// Messages that restore `content` after an approve decision.
///
/// The first carries the attribution header and as much content as fits;
/// the rest follows in platform-sized chunks split on char boundaries.
/// Joining the content portions yields `content` unchanged.
///
/// ```
/// use tribunal_core::{UserId, notices::restored_messages};
///
/// let parts = restored_messages(UserId(5), "hello");
/// assert_eq!(parts.len(), 1);
/// assert!(parts[0].contains("<@5>"));
/// assert!(parts[0].ends_with("\n\nhello"));
/// ```
pub fn restored_messages(author: UserId, content: &str) -> Vec<String> {
    let header = format!(
        "**Message restored after review by the moderation team. Original author:** {}",
        author.mention()
    );
    let room = MESSAGE_LIMIT.saturating_sub(header.chars().count() + 2);

    let mut chars = content.chars();
    let lead: String = chars.by_ref().take(room).collect();
    let rest: Vec<char> = chars.collect();

    let mut parts = vec![format!("{header}\n\n{lead}")];
    parts.extend(rest.chunks(MESSAGE_LIMIT).map(|chunk| chunk.iter().collect::<String>()));
    parts
}

/// Direct message sent to an author whose message was removed.
pub fn removal_notice(guild_name: &str) -> String {
    format!(
        "Hello. Your post in **{guild_name}** was removed by a moderator because it did not \
         follow the rules.\n\nIf you have questions, contact the moderation team."
    )
}
