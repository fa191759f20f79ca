use crate::context::MessageContext;
use crate::executor::Executor;
use crate::router::find_command;
use crate::Error;

use herald::arguments::ArgumentsExt;
use herald::model::permissions::Permissions;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// The mutable build-time form of a command.
///
/// A `Command` is assembled with the setter methods and handed to
/// [`CommandRegistry::load_command`], which freezes it into a
/// [`LoadedCommand`]. Subcommands are nested `Command`s, they are
/// only ever registered through their parent.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: String,
    pub example: String,
    pub permissions: Permissions,
    pub sub_commands: Vec<Command>,
    pub executor: Option<Executor<MessageContext>>,
}

impl Command {
    /// Creates a new `Command` with a name and defaulted fields.
    pub fn new<T>(name: T) -> Self
    where
        T: ToString,
    {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: String::new(),
            usage: String::new(),
            example: String::new(),
            permissions: Permissions::default(),
            sub_commands: Vec::new(),
            executor: None,
        }
    }

    /// Adds an alternate name under which the command can be
    /// invoked.
    pub fn add_alias<T>(&mut self, alias: T)
    where
        T: ToString,
    {
        self.aliases.push(alias.to_string());
    }

    pub fn set_description<T>(&mut self, description: T)
    where
        T: ToString,
    {
        self.description = description.to_string();
    }

    pub fn set_usage<T>(&mut self, usage: T)
    where
        T: ToString,
    {
        self.usage = usage.to_string();
    }

    pub fn set_example<T>(&mut self, example: T)
    where
        T: ToString,
    {
        self.example = example.to_string();
    }

    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.permissions = permissions;
    }

    /// Adds a subcommand.
    pub fn add_sub_command(&mut self, sub_command: Command) {
        self.sub_commands.push(sub_command);
    }

    pub fn executor(&mut self, executor: Option<Executor<MessageContext>>) {
        self.executor = executor;
    }
}

/// The frozen, registered form of a [`Command`].
///
/// A `LoadedCommand` carries the chain of its parent names instead
/// of a pointer into the tree. The chain is never empty for a
/// subcommand since subcommands only enter the registry through
/// their parent.
#[derive(Clone)]
pub struct LoadedCommand {
    name: String,
    aliases: Vec<String>,
    description: String,
    usage: String,
    example: String,
    permissions: Permissions,
    path: Vec<String>,
    sub_commands: AliasTable,
    executor: Option<Executor<MessageContext>>,
}

impl LoadedCommand {
    fn from_command(command: Command, path: Vec<String>) -> Result<Self, Error> {
        let mut child_path = path.clone();
        child_path.push(command.name.clone());

        let mut sub_commands = AliasTable::new();
        for sub_command in command.sub_commands {
            sub_commands.insert(LoadedCommand::from_command(sub_command, child_path.clone())?)?;
        }

        Ok(Self {
            name: command.name,
            aliases: command.aliases,
            description: command.description,
            usage: command.usage,
            example: command.example,
            permissions: command.permissions,
            path,
            sub_commands,
            executor: command.executor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    pub fn sub_commands(&self) -> &AliasTable {
        &self.sub_commands
    }

    pub(crate) fn sub_commands_mut(&mut self) -> &mut AliasTable {
        &mut self.sub_commands
    }

    pub fn executor(&self) -> Option<&Executor<MessageContext>> {
        self.executor.as_ref()
    }

    pub fn has_sub_commands(&self) -> bool {
        !self.sub_commands.is_empty()
    }

    /// The name of the immediate parent, or `None` for a top-level
    /// command.
    pub fn parent_name(&self) -> Option<&str> {
        self.path.last().map(|name| name.as_str())
    }

    /// Builds the display base of the usage string, starting with
    /// the outermost command name.
    ///
    /// For a command `ban` under the parent `mod` and the prefix
    /// `!` this yields `"!mod ban"`.
    pub fn usage_base(&self, prefix: &str) -> String {
        let mut buf = String::from(prefix);
        for parent in &self.path {
            buf.push_str(parent);
            buf.push(' ');
        }
        buf.push_str(&self.name);
        buf
    }

    /// All keys the command is reachable under, lowercased.
    fn keys(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|alias| alias.to_lowercase())
    }
}

impl Debug for LoadedCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedCommand")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("path", &self.path)
            .finish()
    }
}

/// One level of the command tree.
///
/// Maps every alias (including the primary name) of the commands
/// on this level to the command, case-insensitively. Display case
/// and registration order are preserved. An alias maps to exactly
/// one command, inserting a duplicate is an error.
#[derive(Clone, Default)]
pub struct AliasTable {
    commands: Vec<LoadedCommand>,
    aliases: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the command registered under `alias`.
    pub fn get(&self, alias: &str) -> Option<&LoadedCommand> {
        let index = *self.aliases.get(&alias.to_lowercase())?;
        self.commands.get(index)
    }

    pub(crate) fn get_mut(&mut self, alias: &str) -> Option<&mut LoadedCommand> {
        let index = *self.aliases.get(&alias.to_lowercase())?;
        self.commands.get_mut(index)
    }

    /// Returns all commands on this level in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn insert(&mut self, command: LoadedCommand) -> Result<(), Error> {
        let mut keys = Vec::new();
        for key in command.keys() {
            if self.aliases.contains_key(&key) || keys.contains(&key) {
                return Err(Error::DuplicateAlias(key));
            }
            keys.push(key);
        }

        let index = self.commands.len();
        for key in keys {
            self.aliases.insert(key, index);
        }
        self.commands.push(command);

        Ok(())
    }

    /// Removes the command registered under `alias`, dropping all
    /// of its aliases.
    pub(crate) fn remove_command(&mut self, alias: &str) -> Option<LoadedCommand> {
        let index = self.aliases.remove(&alias.to_lowercase())?;
        self.aliases.retain(|_, i| *i != index);

        let command = self.commands.swap_remove(index);

        // The previously last command moved into the freed slot.
        let moved = self.commands.len();
        if index != moved {
            for i in self.aliases.values_mut() {
                if *i == moved {
                    *i = index;
                }
            }
        }

        Some(command)
    }

    /// Removes a single alias mapping. The command itself is only
    /// removed when its last alias goes away.
    pub(crate) fn remove_alias(&mut self, alias: &str) -> bool {
        let key = alias.to_lowercase();

        let index = match self.aliases.get(&key) {
            Some(index) => *index,
            None => return false,
        };

        if self.aliases.values().filter(|i| **i == index).count() == 1 {
            self.remove_command(&key);
        } else {
            self.aliases.remove(&key);
        }

        true
    }
}

/// Stores all commands registered on a client.
///
/// The registry is populated before the client activates and is
/// read-only at dispatch time, concurrent lookups take an
/// uncontended read lock.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    inner: Arc<RwLock<AliasTable>>,
}

impl CommandRegistry {
    /// Creates a new `CommandRegistry` with no commands loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a single command. If `path` is `None`, the command is
    /// loaded at the top level, otherwise `path` is a whitespace
    /// separated alias chain naming the parent command.
    pub fn load_command(&self, command: Command, path: Option<&str>) -> Result<(), Error> {
        let mut table = self.inner.write();

        match path {
            None => table.insert(LoadedCommand::from_command(command, Vec::new())?),
            Some(path) => {
                let parent = command_at_path_mut(&mut table, path).ok_or(Error::InvalidPath)?;

                let mut child_path = parent.path.clone();
                child_path.push(parent.name.clone());

                let command = LoadedCommand::from_command(command, child_path)?;
                parent.sub_commands_mut().insert(command)
            }
        }
    }

    /// Loads multiple commands at the same path.
    pub fn load_commands<I>(&self, commands: I, path: Option<&str>) -> Result<(), Error>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.load_command(command, path)?;
        }

        Ok(())
    }

    /// Resolves the deepest command reachable from the leading
    /// arguments, consuming the matched tokens from `args`.
    pub fn get_command<A>(&self, args: &mut A) -> Option<LoadedCommand>
    where
        A: ArgumentsExt,
    {
        let table = self.inner.read();

        let command = find_command(&table, args)?;

        Some(command.clone())
    }

    /// Removes the command registered under `ident`. If a path is
    /// provided, it names the parent command to remove from.
    pub fn remove_command(&self, ident: &str, path: Option<&str>) -> Result<(), Error> {
        let mut table = self.inner.write();

        let table = match path {
            None => &mut *table,
            Some(path) => command_at_path_mut(&mut table, path)
                .ok_or(Error::InvalidPath)?
                .sub_commands_mut(),
        };

        match table.remove_command(ident) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidPath),
        }
    }

    /// Removes a single alias. The command stays reachable under
    /// its remaining aliases.
    pub fn remove_alias(&self, alias: &str, path: Option<&str>) -> Result<(), Error> {
        let mut table = self.inner.write();

        let table = match path {
            None => &mut *table,
            Some(path) => command_at_path_mut(&mut table, path)
                .ok_or(Error::InvalidPath)?
                .sub_commands_mut(),
        };

        match table.remove_alias(alias) {
            true => Ok(()),
            false => Err(Error::InvalidPath),
        }
    }

    /// Returns all top-level commands.
    pub fn commands(&self) -> Vec<LoadedCommand> {
        self.inner.read().iter().cloned().collect()
    }
}

fn command_at_path_mut<'a>(
    table: &'a mut AliasTable,
    path: &str,
) -> Option<&'a mut LoadedCommand> {
    let mut tokens = path.split_whitespace();

    let mut command = table.get_mut(tokens.next()?)?;
    for token in tokens {
        command = command.sub_commands_mut().get_mut(token)?;
    }

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandRegistry};
    use crate::router::parse_args;
    use crate::Error;

    use herald::arguments::CommandArguments;

    fn registry() -> CommandRegistry {
        let registry = CommandRegistry::new();

        let mut ban = Command::new("ban");
        ban.add_alias("b");

        let mut moderation = Command::new("mod");
        moderation.add_alias("moderation");
        moderation.add_sub_command(ban);

        registry.load_command(moderation, None).unwrap();
        registry
    }

    fn resolve(registry: &CommandRegistry, input: &str) -> Option<(String, CommandArguments)> {
        let mut args = CommandArguments::from(parse_args(input));
        let command = registry.get_command(&mut args)?;
        Some((command.name().to_owned(), args))
    }

    #[test]
    fn test_alias_resolution() {
        let registry = registry();

        for input in ["mod", "moderation", "MOD", "Moderation"] {
            let (name, _) = resolve(&registry, input).unwrap();
            assert_eq!(name, "mod");
        }

        for input in ["mod ban", "moderation b", "MOD BAN"] {
            let (name, _) = resolve(&registry, input).unwrap();
            assert_eq!(name, "ban");
        }

        assert!(resolve(&registry, "ban").is_none());
        assert!(resolve(&registry, "unknown").is_none());
    }

    #[test]
    fn test_unconsumed_arguments_remain() {
        let registry = registry();

        let (name, args) = resolve(&registry, "mod ban @alice spamming").unwrap();
        assert_eq!(name, "ban");
        assert_eq!(args, vec!["@alice", "spamming"]);
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let registry = registry();

        let mut command = Command::new("music");
        command.add_alias("MOD");

        let err = registry.load_command(command, None).unwrap_err();
        assert_eq!(err, Error::DuplicateAlias(String::from("mod")));
    }

    #[test]
    fn test_duplicate_alias_rejected_at_sub_level() {
        let registry = registry();

        let err = registry
            .load_command(Command::new("b"), Some("mod"))
            .unwrap_err();
        assert_eq!(err, Error::DuplicateAlias(String::from("b")));

        // The same name is fine on another level.
        registry.load_command(Command::new("b"), None).unwrap();
    }

    #[test]
    fn test_duplicate_alias_within_command_rejected() {
        let registry = CommandRegistry::new();

        let mut command = Command::new("ping");
        command.add_alias("ping");

        let err = registry.load_command(command, None).unwrap_err();
        assert_eq!(err, Error::DuplicateAlias(String::from("ping")));
    }

    #[test]
    fn test_load_at_invalid_path() {
        let registry = registry();

        let err = registry
            .load_command(Command::new("kick"), Some("unknown"))
            .unwrap_err();
        assert_eq!(err, Error::InvalidPath);
    }

    #[test]
    fn test_load_at_path_extends_chain() {
        let registry = registry();

        registry
            .load_command(Command::new("temp"), Some("mod ban"))
            .unwrap();

        let (name, _) = resolve(&registry, "mod b temp").unwrap();
        assert_eq!(name, "temp");
    }

    #[test]
    fn test_usage_base() {
        let registry = registry();

        let mut args = CommandArguments::from(parse_args("mod ban"));
        let command = registry.get_command(&mut args).unwrap();

        assert_eq!(command.usage_base("!"), "!mod ban");
        assert_eq!(command.parent_name(), Some("mod"));

        let mut args = CommandArguments::from(parse_args("mod"));
        let command = registry.get_command(&mut args).unwrap();

        assert_eq!(command.usage_base("!"), "!mod");
        assert_eq!(command.parent_name(), None);
    }

    #[test]
    fn test_remove_command() {
        let registry = registry();

        registry.remove_command("ban", Some("mod")).unwrap();

        // Resolution stops at the parent, the former subcommand
        // token stays an argument.
        let (name, args) = resolve(&registry, "mod ban").unwrap();
        assert_eq!(name, "mod");
        assert_eq!(args, vec!["ban"]);

        let err = registry.remove_command("ban", Some("mod")).unwrap_err();
        assert_eq!(err, Error::InvalidPath);

        registry.remove_command("moderation", None).unwrap();
        assert!(resolve(&registry, "mod").is_none());
    }

    #[test]
    fn test_remove_alias() {
        let registry = registry();

        registry.remove_alias("moderation", None).unwrap();
        assert!(resolve(&registry, "moderation").is_none());

        // The primary name keeps working.
        let (name, _) = resolve(&registry, "mod").unwrap();
        assert_eq!(name, "mod");

        // Removing the last alias removes the command.
        registry.remove_alias("mod", None).unwrap();
        assert!(resolve(&registry, "mod").is_none());
        assert!(registry.commands().is_empty());
    }
}
