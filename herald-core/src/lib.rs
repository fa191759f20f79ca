pub mod client;
pub mod command;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod events;
pub mod executor;
pub mod permissions;
pub mod prefix;
pub mod router;

pub use herald;

use thiserror::Error;

/// A configuration error raised while building a client or
/// mutating its command registry. These are never deferred to
/// dispatch time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A command was registered under an alias that is already
    /// taken at the same tree level.
    #[error("duplicate alias `{0}`")]
    DuplicateAlias(String),
    /// A command path did not lead to a registered command.
    #[error("invalid command path")]
    InvalidPath,
    /// The client was built without an information provider.
    #[error("missing information provider")]
    MissingInformationProvider,
}
