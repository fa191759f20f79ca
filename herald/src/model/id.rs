use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid format")]
    InvalidFormat,
    #[error(transparent)]
    ParseIntError(#[from] ParseIntError),
}

macro_rules! id_type {
    ($($t:ident),*$(,)?) => {
        $(
            #[derive(
                Copy,
                Clone,
                Debug,
                Default,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                Serialize,
                Deserialize,
            )]
            pub struct $t(pub u64);

            impl From<u64> for $t {
                fn from(id: u64) -> Self {
                    Self(id)
                }
            }

            impl Display for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    Display::fmt(&self.0, f)
                }
            }
        )*
    };
}

id_type! {
    ChannelId,
    GuildId,
    MessageId,
    RoleId,
    UserId,
}

impl FromStr for ChannelId {
    type Err = ParseError;

    /// Parses a `ChannelId` from its mention format `<#{id}>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_prefix("<#")
            .and_then(|s| s.strip_suffix('>'))
            .ok_or(ParseError::InvalidFormat)?;

        let id = s.parse()?;
        Ok(Self(id))
    }
}

impl FromStr for RoleId {
    type Err = ParseError;

    /// Parses a `RoleId` from its mention format `<@&{id}>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_prefix("<@&")
            .and_then(|s| s.strip_suffix('>'))
            .ok_or(ParseError::InvalidFormat)?;

        let id = s.parse()?;
        Ok(Self(id))
    }
}

impl FromStr for UserId {
    type Err = ParseError;

    /// Parses a `UserId` from its mention format `<@{id}>` or `<@!{id}>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut s = s
            .strip_prefix("<@")
            .and_then(|s| s.strip_suffix('>'))
            .ok_or(ParseError::InvalidFormat)?;

        // A role mention shares the `<@` head.
        if s.starts_with('&') {
            return Err(ParseError::InvalidFormat);
        }

        s = match s.strip_prefix('!') {
            Some(s) => s,
            None => s,
        };

        let id = s.parse()?;
        Ok(Self(id))
    }
}
