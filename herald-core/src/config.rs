use crate::context::MessageContext;

use herald::builder::CreateMessage;
use herald::model::id::UserId;

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Builds the permission error message sent to a user when the
/// permission gate denies a command.
pub type PermissionErrorMessageBuilder = dyn Fn(&MessageContext) -> CreateMessage + Send + Sync;

/// The mutable build-time form of a client configuration.
///
/// All options default to sensible values, the default prefix is
/// `!`. Calling [`build`] freezes the builder into an immutable
/// [`Config`], which exposes no mutators. Changing a frozen
/// configuration is rejected by the type system, not at runtime.
///
/// [`build`]: Self::build
pub struct ConfigBuilder {
    prefix: String,
    accept_mention_prefix: bool,
    always_default_prefix: bool,
    send_typing: bool,
    owner_bypass: bool,
    owners: Vec<UserId>,
    permission_error_message: Option<Arc<PermissionErrorMessageBuilder>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            prefix: String::from("!"),
            accept_mention_prefix: true,
            always_default_prefix: false,
            send_typing: true,
            owner_bypass: true,
            owners: Vec::new(),
            permission_error_message: None,
        }
    }

    /// Sets the default command prefix.
    pub fn prefix<T>(&mut self, prefix: T) -> &mut Self
    where
        T: ToString,
    {
        self.prefix = prefix.to_string();
        self
    }

    /// Sets whether a message that starts with a mention of the
    /// bot counts as a command invocation.
    pub fn accept_mention_prefix(&mut self, accept_mention_prefix: bool) -> &mut Self {
        self.accept_mention_prefix = accept_mention_prefix;
        self
    }

    /// Sets whether the default prefix stays in effect even when a
    /// guild configured a custom prefix.
    pub fn always_default_prefix(&mut self, always_default_prefix: bool) -> &mut Self {
        self.always_default_prefix = always_default_prefix;
        self
    }

    /// Sets whether a typing indication is triggered before a
    /// command body executes.
    pub fn send_typing(&mut self, send_typing: bool) -> &mut Self {
        self.send_typing = send_typing;
        self
    }

    /// Sets whether bot owners bypass all permission checks.
    pub fn owner_bypass(&mut self, owner_bypass: bool) -> &mut Self {
        self.owner_bypass = owner_bypass;
        self
    }

    /// Adds a user to the bot owner list.
    pub fn add_owner<T>(&mut self, owner: T) -> &mut Self
    where
        T: Into<UserId>,
    {
        self.owners.push(owner.into());
        self
    }

    /// Sets the builder for the message sent to users that fail
    /// the permission check. Without a builder, denials are only
    /// reported through the event bus.
    pub fn permission_error_message<F>(&mut self, builder: F) -> &mut Self
    where
        F: Fn(&MessageContext) -> CreateMessage + Send + Sync + 'static,
    {
        self.permission_error_message = Some(Arc::new(builder));
        self
    }

    /// Freezes the builder into an immutable [`Config`].
    pub fn build(&self) -> Config {
        Config {
            prefix: self.prefix.clone(),
            accept_mention_prefix: self.accept_mention_prefix,
            always_default_prefix: self.always_default_prefix,
            send_typing: self.send_typing,
            owner_bypass: self.owner_bypass,
            owners: self.owners.clone(),
            permission_error_message: self.permission_error_message.clone(),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The frozen client configuration. Built once by
/// [`ConfigBuilder::build`] and immutable afterwards.
#[derive(Clone)]
pub struct Config {
    prefix: String,
    accept_mention_prefix: bool,
    always_default_prefix: bool,
    send_typing: bool,
    owner_bypass: bool,
    owners: Vec<UserId>,
    permission_error_message: Option<Arc<PermissionErrorMessageBuilder>>,
}

impl Config {
    /// The default command prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn accept_mention_prefix(&self) -> bool {
        self.accept_mention_prefix
    }

    pub fn always_default_prefix(&self) -> bool {
        self.always_default_prefix
    }

    pub fn send_typing(&self) -> bool {
        self.send_typing
    }

    pub fn owner_bypass(&self) -> bool {
        self.owner_bypass
    }

    pub fn owners(&self) -> &[UserId] {
        &self.owners
    }

    /// Returns `true` if the user is in the owner list.
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owners.contains(&user_id)
    }

    pub fn permission_error_message(&self) -> Option<&PermissionErrorMessageBuilder> {
        self.permission_error_message.as_deref()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("prefix", &self.prefix)
            .field("accept_mention_prefix", &self.accept_mention_prefix)
            .field("always_default_prefix", &self.always_default_prefix)
            .field("send_typing", &self.send_typing)
            .field("owner_bypass", &self.owner_bypass)
            .field("owners", &self.owners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigBuilder;

    use herald::model::id::UserId;

    #[test]
    fn test_build_freezes_values() {
        let mut builder = ConfigBuilder::new();
        builder
            .prefix("?")
            .send_typing(false)
            .owner_bypass(false)
            .add_owner(123_u64);

        let config = builder.build();

        assert_eq!(config.prefix(), "?");
        assert!(!config.send_typing());
        assert!(!config.owner_bypass());
        assert!(config.is_owner(UserId(123)));
        assert!(!config.is_owner(UserId(124)));

        // Changing the builder afterwards does not affect the
        // frozen value.
        builder.prefix("$");
        assert_eq!(config.prefix(), "?");
    }

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::new().build();

        assert_eq!(config.prefix(), "!");
        assert!(config.accept_mention_prefix());
        assert!(!config.always_default_prefix());
        assert!(config.send_typing());
        assert!(config.owner_bypass());
        assert!(config.owners().is_empty());
        assert!(config.permission_error_message().is_none());
    }
}
