use serde::{Deserialize, Serialize};

use std::ops::{BitOr, BitOrAssign};

/// A set of platform capabilities, represented as a bitmask.
///
/// The concrete meaning of a bit is owned by the gateway
/// implementation, only the constants defined here are
/// interpreted by the client itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub bits: u64,
}

impl Capabilities {
    pub const NONE: Self = Self { bits: 0 };
    pub const ADMINISTRATOR: Self = Self { bits: 1 << 3 };
    pub const MANAGE_CHANNELS: Self = Self { bits: 1 << 4 };
    pub const MANAGE_GUILD: Self = Self { bits: 1 << 5 };
    pub const KICK_MEMBERS: Self = Self { bits: 1 << 1 };
    pub const BAN_MEMBERS: Self = Self { bits: 1 << 2 };
    pub const MANAGE_MESSAGES: Self = Self { bits: 1 << 13 };
    pub const MANAGE_ROLES: Self = Self { bits: 1 << 28 };

    /// Returns `true` if `self` contains all capabilities of `other`.
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Returns `true` if no capability is set.
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// The permission requirement attached to a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Everyone can execute the command.
    pub public: bool,
    /// Only a bot owner can execute the command.
    pub owner_exclusive: bool,
    /// Only someone who manages the server can execute the command.
    pub server_owner_exclusive: bool,
    /// A display name for the requirement, shown in help messages.
    pub node: String,
    /// The capabilities the caller must have in the current channel.
    pub capabilities: Option<Capabilities>,
}

impl Permissions {
    /// Everyone can execute the command.
    pub fn public() -> Self {
        Self {
            public: true,
            owner_exclusive: false,
            server_owner_exclusive: false,
            node: String::from("public"),
            capabilities: None,
        }
    }

    /// Only a bot owner can execute the command.
    pub fn bot_owner() -> Self {
        Self {
            public: false,
            owner_exclusive: true,
            server_owner_exclusive: false,
            node: String::from("botOwner"),
            capabilities: None,
        }
    }

    /// Only someone with [`Capabilities::MANAGE_GUILD`] can execute
    /// the command.
    pub fn server_owner() -> Self {
        Self {
            public: false,
            owner_exclusive: false,
            server_owner_exclusive: true,
            node: String::from("serverOwner"),
            capabilities: None,
        }
    }

    /// Only callers with all given `capabilities` can execute the
    /// command.
    pub fn capabilities(capabilities: Capabilities) -> Self {
        Self {
            public: false,
            owner_exclusive: false,
            server_owner_exclusive: false,
            node: format!("capabilities({})", capabilities.bits),
            capabilities: Some(capabilities),
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::public()
    }
}

#[cfg(test)]
mod tests {
    use super::Capabilities;

    #[test]
    fn test_capabilities_contains() {
        let caps = Capabilities::MANAGE_GUILD | Capabilities::KICK_MEMBERS;

        assert!(caps.contains(Capabilities::MANAGE_GUILD));
        assert!(caps.contains(Capabilities::NONE));
        assert!(!caps.contains(Capabilities::BAN_MEMBERS));
        assert!(!Capabilities::NONE.contains(caps));
    }
}
