use super::id::{ChannelId, GuildId, MessageId, RoleId};
use super::user::User;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: User,
    pub channel_id: ChannelId,
    pub content: String,
    pub edited_timestamp: Option<DateTime<Utc>>,
    pub guild_id: Option<GuildId>,
    pub mentions: Vec<User>,
    pub mention_roles: Vec<RoleId>,
    pub timestamp: DateTime<Utc>,
}

impl AsRef<ChannelId> for Message {
    fn as_ref(&self) -> &ChannelId {
        &self.channel_id
    }
}

impl AsRef<MessageId> for Message {
    fn as_ref(&self) -> &MessageId {
        &self.id
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct MessageReference {
    pub message_id: Option<MessageId>,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

impl From<(ChannelId, MessageId)> for MessageReference {
    fn from(src: (ChannelId, MessageId)) -> Self {
        Self {
            message_id: Some(src.1),
            channel_id: src.0,
            guild_id: None,
        }
    }
}
