use crate::command::LoadedCommand;
use crate::context::MessageContext;

use herald::model::channel::Message;
use herald::model::id::GuildId;

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A lifecycle event emitted by the dispatcher.
///
/// Exactly one terminal event is emitted per invocation that
/// reaches the permission gate: [`CommandExecuted`] or
/// [`CommandFail`] for authorized invocations,
/// [`CommandPermissionViolation`] for denied ones. Resolution
/// misses emit nothing.
#[derive(Clone, Debug)]
pub enum Event {
    CommandExecuted(CommandExecuted),
    CommandFail(CommandFail),
    CommandPermissionViolation(CommandPermissionViolation),
}

impl Event {
    /// The response number assigned to the event. Strictly
    /// increasing across all events of a client instance.
    pub fn response_number(&self) -> u64 {
        match self {
            Self::CommandExecuted(event) => event.response_number,
            Self::CommandFail(event) => event.response_number,
            Self::CommandPermissionViolation(event) => event.response_number,
        }
    }

    /// The guild the invocation happened in.
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::CommandExecuted(event) => event.guild_id,
            Self::CommandFail(event) => event.guild_id,
            Self::CommandPermissionViolation(event) => event.guild_id,
        }
    }
}

/// A command body returned without an error.
#[derive(Clone, Debug)]
pub struct CommandExecuted {
    pub response_number: u64,
    pub guild_id: Option<GuildId>,
    pub ctx: MessageContext,
}

/// A command body raised an error. The original cause is fully
/// captured, it is never rethrown past the dispatcher.
#[derive(Clone, Debug)]
pub struct CommandFail {
    pub response_number: u64,
    pub guild_id: Option<GuildId>,
    pub ctx: MessageContext,
    pub error: Arc<herald::Error>,
}

/// The permission gate denied an invocation. Carries the command
/// with its required permissions and the triggering message.
#[derive(Clone, Debug)]
pub struct CommandPermissionViolation {
    pub response_number: u64,
    pub guild_id: Option<GuildId>,
    pub command: LoadedCommand,
    pub message: Message,
}

/// Observer for dispatcher lifecycle events.
///
/// Every event fires all applicable callbacks, from the most
/// generic to the most specific: [`on_command_event`] for every
/// event, [`on_context_event`] for events carrying an execution
/// context, then the callback for the concrete event kind.
/// Callbacks run synchronously on the task that produced the event
/// and must not block it excessively.
///
/// [`on_command_event`]: Self::on_command_event
/// [`on_context_event`]: Self::on_context_event
#[allow(unused_variables)]
pub trait EventListener: Send + Sync {
    fn on_command_event(&self, event: &Event) {}

    fn on_context_event(&self, ctx: &MessageContext, response_number: u64) {}

    fn on_command_executed(&self, event: &CommandExecuted) {}

    fn on_command_fail(&self, event: &CommandFail) {}

    fn on_permission_violation(&self, event: &CommandPermissionViolation) {}
}

/// Distributes lifecycle events to registered listeners and hands
/// out response numbers.
///
/// The response counter is the only mutable state shared between
/// concurrent dispatches, a single atomic increment guarantees
/// unique, strictly increasing numbers.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<RwLock<Vec<Arc<dyn EventListener>>>>,
    response_number: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Listeners cannot be removed.
    pub fn register(&self, listener: Arc<dyn EventListener>) {
        self.listeners.write().push(listener);
    }

    /// Returns the next response number.
    pub fn next_response_number(&self) -> u64 {
        self.response_number.fetch_add(1, Ordering::SeqCst)
    }

    /// Delivers the event to all registered listeners on the
    /// calling task.
    pub fn emit(&self, event: Event) {
        let listeners = self.listeners.read();

        for listener in listeners.iter() {
            listener.on_command_event(&event);

            match &event {
                Event::CommandExecuted(event) => {
                    listener.on_context_event(&event.ctx, event.response_number);
                    listener.on_command_executed(event);
                }
                Event::CommandFail(event) => {
                    listener.on_context_event(&event.ctx, event.response_number);
                    listener.on_command_fail(event);
                }
                Event::CommandPermissionViolation(event) => {
                    listener.on_permission_violation(event);
                }
            }
        }
    }
}

/// A ready-made listener that logs all lifecycle events.
pub struct LogListener;

impl EventListener for LogListener {
    fn on_command_executed(&self, event: &CommandExecuted) {
        log::info!(
            "[{}] Executed command '{}'",
            event.response_number,
            event.ctx.command.name()
        );
    }

    fn on_command_fail(&self, event: &CommandFail) {
        log::error!(
            "[{}] Command '{}' failed: {}",
            event.response_number,
            event.ctx.command.name(),
            event.error
        );
    }

    fn on_permission_violation(&self, event: &CommandPermissionViolation) {
        log::warn!(
            "[{}] User {} is missing permissions for command '{}'",
            event.response_number,
            event.message.author.id,
            event.command.name()
        );
    }
}
