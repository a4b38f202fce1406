//! Platform snowflake identifiers.
//!
//! Discord identifiers are 64-bit unsigned integers. Each kind gets its own
//! newtype so a channel id can never be passed where a user id is expected.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[display("{}", _0)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

snowflake!(
    /// Guild (server) identifier.
    GuildId
);
snowflake!(
    /// Channel identifier.
    ChannelId
);
snowflake!(
    /// User identifier.
    UserId
);
snowflake!(
    /// Message identifier.
    MessageId
);
snowflake!(
    /// Role identifier.
    RoleId
);
snowflake!(
    /// Custom emoji identifier.
    EmojiId
);

impl UserId {
    /// Inline mention markup for this user.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl ChannelId {
    /// Inline mention markup for this channel.
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}
