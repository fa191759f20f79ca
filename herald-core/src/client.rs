use crate::command::{Command, CommandRegistry};
use crate::config::{Config, ConfigBuilder};
use crate::dispatcher::Dispatcher;
use crate::events::{EventBus, EventListener};
use crate::permissions::{DefaultPermissionHandler, PermissionHandler};
use crate::Error;

use herald::gateway::{Gateway, InformationProvider, MessageHandler};
use herald::model::channel::Message;

use async_trait::async_trait;
use std::sync::Arc;

/// Selects which raw message events drive the dispatcher.
///
/// Both variants run the same dispatch state machine, the only
/// difference is whether an edited message is dispatched again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    /// Dispatch newly created messages only.
    MessageCreate,
    /// Dispatch newly created messages and re-dispatch edited
    /// ones.
    MessageCreateAndEdit,
}

impl Default for ListenerKind {
    fn default() -> Self {
        Self::MessageCreate
    }
}

/// The listener attached to the gateway at activation. Every
/// incoming message gets its own task so concurrent invocations
/// never wait on each other.
struct CommandListener {
    dispatcher: Arc<Dispatcher>,
    kind: ListenerKind,
}

impl CommandListener {
    fn spawn_dispatch(&self, message: Message) {
        let dispatcher = self.dispatcher.clone();

        tokio::task::spawn(async move {
            dispatcher.dispatch(message).await;
        });
    }
}

#[async_trait]
impl MessageHandler for CommandListener {
    async fn message_create(&self, message: Message) {
        self.spawn_dispatch(message);
    }

    async fn message_update(&self, message: Message) {
        if self.kind == ListenerKind::MessageCreateAndEdit {
            self.spawn_dispatch(message);
        }
    }
}

/// Builder for a [`Client`].
///
/// An information provider is mandatory, [`build`] fails without
/// one. All other collaborators have defaults.
///
/// [`build`]: Self::build
#[derive(Default)]
pub struct ClientBuilder {
    commands: Vec<Command>,
    config: Option<Config>,
    listener_kind: ListenerKind,
    permission_handler: Option<Arc<dyn PermissionHandler>>,
    information_provider: Option<Arc<dyn InformationProvider>>,
    event_listeners: Vec<Arc<dyn EventListener>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. Registration errors, like a duplicate
    /// alias, surface when the client is built.
    pub fn register_command(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Registers multiple commands.
    pub fn register_commands<I>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = Command>,
    {
        self.commands.extend(commands);
        self
    }

    /// Sets the frozen configuration. Defaults to
    /// [`ConfigBuilder`] defaults.
    pub fn set_config(&mut self, config: Config) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// Sets which message events drive the dispatcher.
    pub fn set_listener_kind(&mut self, kind: ListenerKind) -> &mut Self {
        self.listener_kind = kind;
        self
    }

    /// Sets the permission gate. Defaults to
    /// [`DefaultPermissionHandler`].
    pub fn set_permission_handler(&mut self, handler: Arc<dyn PermissionHandler>) -> &mut Self {
        self.permission_handler = Some(handler);
        self
    }

    /// Sets the information provider. Mandatory.
    pub fn set_information_provider(
        &mut self,
        provider: Arc<dyn InformationProvider>,
    ) -> &mut Self {
        self.information_provider = Some(provider);
        self
    }

    /// Registers a lifecycle event listener.
    pub fn add_event_listener(&mut self, listener: Arc<dyn EventListener>) -> &mut Self {
        self.event_listeners.push(listener);
        self
    }

    /// Builds the client.
    ///
    /// Loads all registered commands into a fresh registry and
    /// wires the dispatcher. Fails with a configuration error if
    /// no information provider was set or a command registration
    /// is invalid.
    pub fn build(&mut self, gateway: Arc<dyn Gateway>) -> Result<Client, Error> {
        let information_provider = self
            .information_provider
            .take()
            .ok_or(Error::MissingInformationProvider)?;

        let config = Arc::new(
            self.config
                .take()
                .unwrap_or_else(|| ConfigBuilder::new().build()),
        );

        let registry = CommandRegistry::new();
        registry.load_commands(self.commands.drain(..), None)?;

        let events = EventBus::new();
        for listener in self.event_listeners.drain(..) {
            events.register(listener);
        }

        let permission_handler = self
            .permission_handler
            .take()
            .unwrap_or_else(|| Arc::new(DefaultPermissionHandler));

        let dispatcher = Arc::new(Dispatcher::new(
            registry.clone(),
            config.clone(),
            events.clone(),
            permission_handler,
            information_provider,
            gateway.clone(),
        ));

        Ok(Client {
            registry,
            config,
            events,
            listener_kind: self.listener_kind,
            dispatcher,
            gateway,
        })
    }
}

/// A fully wired command client.
///
/// [`activate`] attaches the message listener to the gateway, from
/// then on incoming messages are dispatched. The registry should
/// be treated as read-only once the client is active.
///
/// [`activate`]: Self::activate
pub struct Client {
    registry: CommandRegistry,
    config: Arc<Config>,
    events: EventBus,
    listener_kind: ListenerKind,
    dispatcher: Arc<Dispatcher>,
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("listener_kind", &self.listener_kind)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Attaches the message listener to the gateway. Called once.
    pub fn activate(&self) {
        self.gateway.add_event_listener(Arc::new(CommandListener {
            dispatcher: self.dispatcher.clone(),
            kind: self.listener_kind,
        }));

        log::info!(
            "Activated command client with {} top-level commands",
            self.registry.commands().len()
        );
    }

    /// Returns a reference to the command registry.
    pub fn commands(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Returns a reference to the event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the frozen configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the dispatcher. Useful for driving the client from
    /// a custom listener.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }
}
