//! Moderation settings shared by the workflow components.

use crate::{ChannelId, EmojiId, EmojiRef, RoleId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Emoji that files a report when added as a reaction.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into, strip_option), default)]
pub struct TriggerMarker {
    /// Custom emoji id. When set, only this id matches.
    #[serde(default)]
    id: Option<EmojiId>,
    /// Emoji name, used only when no id is configured.
    #[serde(default)]
    name: Option<String>,
}

impl TriggerMarker {
    /// Whether a reaction emoji is the configured marker.
    ///
    /// ```
    /// use tribunal_core::{EmojiRef, TriggerMarkerBuilder};
    ///
    /// let marker = TriggerMarkerBuilder::default()
    ///     .id(77u64)
    ///     .name("report")
    ///     .build()
    ///     .expect("valid marker");
    /// assert!(marker.matches(&EmojiRef::custom(77u64, Some("report".into()))));
    /// assert!(!marker.matches(&EmojiRef::custom(78u64, Some("report".into()))));
    /// ```
    pub fn matches(&self, emoji: &EmojiRef) -> bool {
        match (self.id, &self.name) {
            (Some(id), _) => emoji.id() == &Some(id),
            (None, Some(name)) => emoji.name().as_deref() == Some(name.as_str()),
            (None, None) => false,
        }
    }

    /// Whether the marker can match anything.
    pub fn is_configured(&self) -> bool {
        self.id.is_some() || self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Where reports go and who may decide them.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ModerationSettings {
    /// Channel that receives report summaries.
    moderation_channel: ChannelId,
    /// Role required to approve or delete a report.
    moderator_role: RoleId,
    /// Reaction that files a report.
    #[builder(default)]
    trigger: TriggerMarker,
}
