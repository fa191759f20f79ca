use crate::command::LoadedCommand;
use crate::config::Config;

use herald::arguments::CommandArguments;
use herald::builder::CreateMessage;
use herald::gateway::{Gateway, GatewayError};
use herald::model::channel::Message;
use herald::model::id::{ChannelId, GuildId, MessageId};

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// An alias for `Context<Message>`. This context is received by
/// command bodies.
pub type MessageContext = Context<Message>;

/// The context of a single command invocation.
///
/// Owns the triggering event, the resolved command and the
/// remaining arguments, and provides the send capability through
/// the gateway. Contexts live for one dispatch cycle.
#[derive(Clone)]
pub struct Context<T> {
    pub gateway: Arc<dyn Gateway>,
    pub config: Arc<Config>,
    pub command: LoadedCommand,
    pub args: CommandArguments,
    pub event: T,
}

impl<T> Context<T> {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        config: Arc<Config>,
        command: LoadedCommand,
        args: CommandArguments,
        event: T,
    ) -> Self {
        Self {
            gateway,
            config,
            command,
            args,
            event,
        }
    }

    /// Sends a new message in the channel with the given id.
    pub async fn send_message<M>(
        &self,
        channel_id: ChannelId,
        message: M,
    ) -> Result<Message, GatewayError>
    where
        M: Into<CreateMessage>,
    {
        self.gateway.send_message(channel_id, message.into()).await
    }
}

impl<T> Context<T>
where
    T: AsRef<ChannelId> + AsRef<MessageId>,
{
    /// Responds to the triggering message. Returns the newly
    /// created message.
    pub async fn respond<M>(&self, message: M) -> Result<Message, GatewayError>
    where
        M: Into<CreateMessage>,
    {
        let channel_id = *self.event.as_ref();
        let message_id = *self.event.as_ref();

        let mut builder = message.into();
        builder.reference_message((channel_id, message_id));

        self.send_message(channel_id, builder).await
    }
}

impl Context<Message> {
    /// The guild the invocation happened in, or `None` for a
    /// direct message.
    pub fn guild_id(&self) -> Option<GuildId> {
        self.event.guild_id
    }

    /// The usage display base of the resolved command, built with
    /// the default prefix.
    pub fn usage_base(&self) -> String {
        self.command.usage_base(self.config.prefix())
    }
}

impl<T> AsRef<ChannelId> for Context<T>
where
    T: AsRef<ChannelId>,
{
    fn as_ref(&self) -> &ChannelId {
        self.event.as_ref()
    }
}

impl<T> AsRef<MessageId> for Context<T>
where
    T: AsRef<MessageId>,
{
    fn as_ref(&self) -> &MessageId {
        self.event.as_ref()
    }
}

impl<T> Debug for Context<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("command", &self.command.name())
            .field("args", &self.args)
            .field("event", &self.event)
            .finish()
    }
}
