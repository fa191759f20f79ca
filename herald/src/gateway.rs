use crate::builder::CreateMessage;
use crate::model::channel::Message;
use crate::model::id::{ChannelId, GuildId, UserId};
use crate::model::permissions::Capabilities;

use async_trait::async_trait;
use thiserror::Error;

use std::sync::Arc;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),
    #[error("gateway connection closed")]
    Closed,
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// The connection to the chat platform.
///
/// The client core never talks to the platform directly, all
/// message and permission traffic goes through this trait. The
/// permission query is expected to be answered from a local cache,
/// it is called on the dispatching task and must not block.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Creates a new message in the channel with the given id.
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: CreateMessage,
    ) -> Result<Message, GatewayError>;

    /// Triggers a typing indication in the channel with the given
    /// id. Best-effort, callers tolerate failure.
    async fn send_typing(&self, channel_id: ChannelId) -> Result<(), GatewayError>;

    /// Returns `true` if the user has all `capabilities` in the
    /// given channel.
    fn has_permission(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        capabilities: Capabilities,
    ) -> bool;

    /// The user id of the account the gateway is connected as.
    fn current_user_id(&self) -> UserId;

    /// Attaches a [`MessageHandler`] to the connection. Called once
    /// when a client activates.
    fn add_event_listener(&self, handler: Arc<dyn MessageHandler>);
}

/// Receiver for raw message events delivered by a [`Gateway`].
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn message_create(&self, message: Message);

    async fn message_update(&self, _message: Message) {}
}

/// Provider for per-guild information the client cannot know
/// itself.
pub trait InformationProvider: Send + Sync {
    /// The custom prefix for the guild, or `None` if there is no
    /// custom prefix.
    fn prefix(&self, guild_id: GuildId) -> Option<String>;
}
