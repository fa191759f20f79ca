use std::{
    error,
    fmt::{self, Display, Formatter},
    result,
};

/// The result type returned by command bodies.
pub type Result = result::Result<(), Error>;

#[derive(Debug)]
pub enum Error {
    /// The caller provided arguments the command cannot
    /// work with. Dispatchers may react by displaying the
    /// usage string of the command.
    InvalidCommandUsage,
    /// Indicates that the executor dropped before
    /// sending a response. This likely means that
    /// the executing task panicked.
    NoResponse,
    BoxError(Box<dyn error::Error + Send + Sync + 'static>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidCommandUsage => write!(f, "invalid command usage"),
            Self::NoResponse => write!(f, "no response"),
            Self::BoxError(err) => err.fmt(f),
        }
    }
}

impl<T> From<T> for Error
where
    T: error::Error + Send + Sync + 'static,
{
    fn from(err: T) -> Self {
        Self::BoxError(Box::new(err))
    }
}
