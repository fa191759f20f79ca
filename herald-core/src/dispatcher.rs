use crate::command::CommandRegistry;
use crate::config::Config;
use crate::context::Context;
use crate::events::{
    CommandExecuted, CommandFail, CommandPermissionViolation, Event, EventBus,
};
use crate::permissions::PermissionHandler;
use crate::prefix::strip_prefix;
use crate::router::parse_args;

use herald::arguments::CommandArguments;
use herald::gateway::{Gateway, InformationProvider};
use herald::model::channel::Message;

use std::sync::Arc;

/// Turns raw messages into command executions.
///
/// One `Dispatcher` serves all listeners of a client. A dispatch
/// cycle runs prefix matching, command resolution and the
/// permission check synchronously on the calling task, only the
/// command body itself is handed to the worker pool. Messages that
/// are not command invocations are dropped without emitting
/// anything.
pub struct Dispatcher {
    registry: CommandRegistry,
    config: Arc<Config>,
    events: EventBus,
    permission_handler: Arc<dyn PermissionHandler>,
    information_provider: Arc<dyn InformationProvider>,
    gateway: Arc<dyn Gateway>,
}

impl Dispatcher {
    pub(crate) fn new(
        registry: CommandRegistry,
        config: Arc<Config>,
        events: EventBus,
        permission_handler: Arc<dyn PermissionHandler>,
        information_provider: Arc<dyn InformationProvider>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            registry,
            config,
            events,
            permission_handler,
            information_provider,
            gateway,
        }
    }

    /// Runs one dispatch cycle for the message.
    pub async fn dispatch(&self, message: Message) {
        // Never dispatch messages written by bots.
        if message.author.bot {
            return;
        }

        let custom_prefix = message
            .guild_id
            .and_then(|guild_id| self.information_provider.prefix(guild_id));

        let content = match strip_prefix(
            &message.content,
            custom_prefix.as_deref(),
            &self.config,
            self.gateway.current_user_id(),
        ) {
            Some(content) => content,
            None => return,
        };

        let mut args = CommandArguments::from(parse_args(content));

        let command = match self.registry.get_command(&mut args) {
            Some(command) => command,
            None => return,
        };

        let guild_id = message.guild_id;
        let ctx = Context::new(
            self.gateway.clone(),
            self.config.clone(),
            command.clone(),
            args,
            message,
        );

        if !self.permission_handler.is_covered(&ctx) {
            if let Some(builder) = self.config.permission_error_message() {
                let message = builder(&ctx);
                if let Err(err) = ctx.send_message(ctx.event.channel_id, message).await {
                    log::warn!("Failed to send permission error message: {}", err);
                }
            }

            let response_number = self.events.next_response_number();
            self.events
                .emit(Event::CommandPermissionViolation(CommandPermissionViolation {
                    response_number,
                    guild_id,
                    command,
                    message: ctx.event,
                }));

            return;
        }

        if self.config.send_typing() {
            // Best-effort, a failed typing indication never blocks
            // the invocation.
            if let Err(err) = self.gateway.send_typing(ctx.event.channel_id).await {
                log::warn!("Failed to send typing indication: {}", err);
            }
        }

        let response = match command.executor() {
            Some(executor) => executor.call(ctx.clone()).await,
            // A resolved command without a body cannot be invoked
            // directly.
            None => Err(herald::Error::InvalidCommandUsage),
        };

        let response_number = self.events.next_response_number();
        match response {
            Ok(()) => {
                self.events.emit(Event::CommandExecuted(CommandExecuted {
                    response_number,
                    guild_id,
                    ctx,
                }));
            }
            Err(err) => {
                log::error!("Command '{}' failed: {}", command.name(), err);

                self.events.emit(Event::CommandFail(CommandFail {
                    response_number,
                    guild_id,
                    ctx,
                    error: Arc::new(err),
                }));
            }
        }
    }
}
