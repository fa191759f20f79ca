use crate::context::MessageContext;

/// The permission gate consulted before a command executes.
///
/// `is_covered` is a pure decision over the invocation context, it
/// never errors and never performs I/O. Returning `false` makes
/// the dispatcher report a permission violation, it is not an
/// exceptional outcome. Custom handlers are plugged in at client
/// build time.
pub trait PermissionHandler: Send + Sync {
    /// Returns `true` if the invoker satisfies the permission
    /// requirement of the resolved command.
    fn is_covered(&self, ctx: &MessageContext) -> bool;
}

/// The default permission policy.
///
/// Public commands are always allowed. If owner bypass is enabled,
/// bot owners are allowed unconditionally. Owner-exclusive
/// commands require the invoker to be a bot owner, server-owner
/// exclusive commands require the manage-guild capability, and
/// capability-bound commands are checked against the gateway's
/// permission cache for the current channel.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultPermissionHandler;

impl PermissionHandler for DefaultPermissionHandler {
    fn is_covered(&self, ctx: &MessageContext) -> bool {
        use herald::model::permissions::Capabilities;

        let permissions = ctx.command.permissions();

        if permissions.public {
            return true;
        }

        let author = ctx.event.author.id;

        if ctx.config.owner_bypass() && ctx.config.is_owner(author) {
            return true;
        }

        if permissions.owner_exclusive {
            return ctx.config.is_owner(author);
        }

        if permissions.server_owner_exclusive {
            return ctx
                .gateway
                .has_permission(author, ctx.event.channel_id, Capabilities::MANAGE_GUILD);
        }

        if let Some(capabilities) = permissions.capabilities {
            return ctx
                .gateway
                .has_permission(author, ctx.event.channel_id, capabilities);
        }

        // A requirement that names nothing covers nobody.
        false
    }
}
