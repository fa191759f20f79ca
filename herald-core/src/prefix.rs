use crate::config::Config;

use herald::model::id::UserId;

/// Decides whether `content` starts with an accepted command
/// prefix and strips it.
///
/// The effective prefix is the per-guild `custom_prefix` if one is
/// configured and [`Config::always_default_prefix`] is off,
/// otherwise the default prefix. If mention prefixes are accepted,
/// a leading mention of `self_user_id` also counts. The first
/// matching rule wins.
///
/// Returns the remaining content after the prefix, or `None` if
/// the message is not a command invocation. Pure function, the
/// decision has no side effects.
pub fn strip_prefix<'a>(
    content: &'a str,
    custom_prefix: Option<&str>,
    config: &Config,
    self_user_id: UserId,
) -> Option<&'a str> {
    let prefix = match custom_prefix {
        Some(custom) if !config.always_default_prefix() => custom,
        _ => config.prefix(),
    };

    if let Some(rest) = content.strip_prefix(prefix) {
        return Some(rest);
    }

    if config.accept_mention_prefix() {
        for mention in [
            format!("<@{}>", self_user_id),
            format!("<@!{}>", self_user_id),
        ] {
            if let Some(rest) = content.strip_prefix(&mention) {
                return Some(rest.trim_start_matches(' '));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::strip_prefix;
    use crate::config::ConfigBuilder;

    use herald::model::id::UserId;

    const SELF_ID: UserId = UserId(400);

    #[test]
    fn test_default_prefix() {
        let config = ConfigBuilder::new().build();

        assert_eq!(strip_prefix("!ping", None, &config, SELF_ID), Some("ping"));
        assert_eq!(strip_prefix("ping", None, &config, SELF_ID), None);
        assert_eq!(strip_prefix("?ping", None, &config, SELF_ID), None);
    }

    #[test]
    fn test_custom_prefix_overrides_default() {
        let config = ConfigBuilder::new().build();

        assert_eq!(
            strip_prefix("?ping", Some("?"), &config, SELF_ID),
            Some("ping")
        );
        assert_eq!(strip_prefix("!ping", Some("?"), &config, SELF_ID), None);
    }

    #[test]
    fn test_always_default_prefix() {
        let mut builder = ConfigBuilder::new();
        builder.always_default_prefix(true);
        let config = builder.build();

        assert_eq!(
            strip_prefix("!ping", Some("?"), &config, SELF_ID),
            Some("ping")
        );
        assert_eq!(strip_prefix("?ping", Some("?"), &config, SELF_ID), None);
    }

    #[test]
    fn test_mention_prefix() {
        let config = ConfigBuilder::new().build();

        assert_eq!(
            strip_prefix("<@400> ping", None, &config, SELF_ID),
            Some("ping")
        );
        assert_eq!(
            strip_prefix("<@!400> ping", None, &config, SELF_ID),
            Some("ping")
        );

        // A mention of someone else is not a prefix.
        assert_eq!(strip_prefix("<@401> ping", None, &config, SELF_ID), None);
    }

    #[test]
    fn test_mention_prefix_disabled() {
        let mut builder = ConfigBuilder::new();
        builder.accept_mention_prefix(false);
        let config = builder.build();

        assert_eq!(strip_prefix("<@400> ping", None, &config, SELF_ID), None);
        assert_eq!(strip_prefix("!ping", None, &config, SELF_ID), Some("ping"));
    }
}
