//! Tests for narrowing serenity payloads.

use serenity::all::{EmojiId, ReactionType};
use tribunal_core::{EmojiRef, TriggerMarkerBuilder};
use tribunal_discord::emoji_ref;

#[test]
fn test_custom_emoji_keeps_id_and_name() {
    let emoji = ReactionType::Custom {
        animated: false,
        id: EmojiId::new(555),
        name: Some("report".to_string()),
    };

    assert_eq!(
        emoji_ref(&emoji),
        EmojiRef::custom(555u64, Some("report".to_string()))
    );
}

#[test]
fn test_unicode_emoji_is_name_only() {
    let emoji = ReactionType::Unicode("🚩".to_string());
    assert_eq!(emoji_ref(&emoji), EmojiRef::unicode("🚩"));
}

#[test]
fn test_narrowed_emoji_matches_marker() {
    let marker = TriggerMarkerBuilder::default()
        .id(555u64)
        .build()
        .expect("Valid marker");

    let custom = ReactionType::Custom {
        animated: false,
        id: EmojiId::new(555),
        name: None,
    };
    assert!(marker.matches(&emoji_ref(&custom)));
    assert!(!marker.matches(&emoji_ref(&ReactionType::Unicode("👍".to_string()))));
}
