//! Resolution of user-provided tokens into platform entities.
//!
//! A single token taken from a command argument may refer to an
//! entity in three ways: by mention syntax, by raw id or by name.
//! [`resolve_entity`] tries these in order against caller-provided
//! lookups and never performs I/O itself.

use crate::model::id::{ChannelId, RoleId, UserId};

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("input must not be blank")]
    BlankInput,
}

/// The mention syntax an input token is matched against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MentionKind {
    /// `<@{id}>` or `<@!{id}>`
    User,
    /// `<#{id}>`
    Channel,
    /// `<@&{id}>`
    Role,
}

impl MentionKind {
    /// Extracts the id embedded in a mention of this kind. Returns
    /// `None` if `input` is not a mention of this kind.
    fn extract_id(self, input: &str) -> Option<u64> {
        match self {
            Self::User => input.parse::<UserId>().ok().map(|id| id.0),
            Self::Channel => input.parse::<ChannelId>().ok().map(|id| id.0),
            Self::Role => input.parse::<RoleId>().ok().map(|id| id.0),
        }
    }
}

/// Resolves `input` to an entity using the given lookups.
///
/// The input is matched in order:
/// 1. If `input` is a mention of the given `kind`, the embedded id
///    decides alone, the name lookup is never consulted.
/// 2. If `input` consists entirely of decimal digits, it is tried
///    as an id first and falls through to the name lookup on a
///    miss.
/// 3. Otherwise `input` is resolved by name. If multiple entities
///    share the name, the first one in collection order wins.
///
/// `ignore_case` is forwarded to the name lookup. A blank `input`
/// is an error.
pub fn resolve_entity<T, I, N>(
    input: &str,
    kind: MentionKind,
    id_lookup: I,
    name_lookup: N,
    ignore_case: bool,
) -> Result<Option<T>, ResolveError>
where
    I: Fn(u64) -> Option<T>,
    N: Fn(&str, bool) -> Vec<T>,
{
    if input.trim().is_empty() {
        return Err(ResolveError::BlankInput);
    }

    if let Some(id) = kind.extract_id(input) {
        return Ok(id_lookup(id));
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = input.parse() {
            if let Some(entity) = id_lookup(id) {
                return Ok(Some(entity));
            }
        }
    }

    Ok(name_lookup(input, ignore_case).into_iter().next())
}

/// Resolves a user by mention, id or name. See [`resolve_entity`].
pub fn resolve_user<T, I, N>(
    input: &str,
    id_lookup: I,
    name_lookup: N,
    ignore_case: bool,
) -> Result<Option<T>, ResolveError>
where
    I: Fn(u64) -> Option<T>,
    N: Fn(&str, bool) -> Vec<T>,
{
    resolve_entity(input, MentionKind::User, id_lookup, name_lookup, ignore_case)
}

/// Resolves a channel by mention, id or name. See [`resolve_entity`].
pub fn resolve_channel<T, I, N>(
    input: &str,
    id_lookup: I,
    name_lookup: N,
    ignore_case: bool,
) -> Result<Option<T>, ResolveError>
where
    I: Fn(u64) -> Option<T>,
    N: Fn(&str, bool) -> Vec<T>,
{
    resolve_entity(
        input,
        MentionKind::Channel,
        id_lookup,
        name_lookup,
        ignore_case,
    )
}

/// Resolves a role by mention, id or name. See [`resolve_entity`].
pub fn resolve_role<T, I, N>(
    input: &str,
    id_lookup: I,
    name_lookup: N,
    ignore_case: bool,
) -> Result<Option<T>, ResolveError>
where
    I: Fn(u64) -> Option<T>,
    N: Fn(&str, bool) -> Vec<T>,
{
    resolve_entity(input, MentionKind::Role, id_lookup, name_lookup, ignore_case)
}
