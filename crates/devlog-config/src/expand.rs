//! Environment variable and `~` expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` - expands to the home directory

use crate::ConfigError;

/// Expand braced variable references, then a leading `~`, in a config value.
///
/// Bare `$VAR` is left alone, so a literal `$` needs no escaping. `field`
/// names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = if value.contains("${") {
        let braced = braced_refs(value);
        shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
            let Some(&(_, has_default)) = braced.iter().find(|(name, _)| *name == var) else {
                return Ok(None);
            };
            match std::env::var(var) {
                Ok(val) => Ok(Some(val)),
                Err(_) if has_default => Ok(None),
                Err(_) => Err(LookupError {
                    var_name: var.to_owned(),
                }),
            }
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.var_name),
        })?
        .into_owned()
    } else {
        value.to_owned()
    };
    Ok(shellexpand::tilde(&expanded).into_owned())
}

/// Names referenced as `${NAME}` or `${NAME:-default}`, with whether a
/// default is given.
fn braced_refs(value: &str) -> Vec<(&str, bool)> {
    value
        .split("${")
        .skip(1)
        .filter_map(|rest| {
            let end = rest.find(['}', ':'])?;
            Some((&rest[..end], rest[end..].starts_with(":-")))
        })
        .collect()
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(
            expand_env("devlog/index.html", "page.output").unwrap(),
            "devlog/index.html"
        );
    }

    #[test]
    fn test_default_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DEVLOG_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${DEVLOG_EXPAND_UNSET:-Devlog}", "page.title").unwrap(),
            "Devlog"
        );
    }

    #[test]
    fn test_missing_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DEVLOG_EXPAND_MISSING");
        }
        let err = expand_env("${DEVLOG_EXPAND_MISSING}/page.html", "page.output").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DEVLOG_EXPAND_MISSING"));
        assert!(msg.contains("page.output"));
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        assert_eq!(
            expand_env("Earned $100 on launch", "page.title").unwrap(),
            "Earned $100 on launch"
        );
        assert_eq!(expand_env("$HOME", "page.title").unwrap(), "$HOME");
    }

    #[test]
    fn test_braced_var_next_to_bare_dollar() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DEVLOG_EXPAND_GAME", "Moonfall");
        }
        assert_eq!(
            expand_env("${DEVLOG_EXPAND_GAME} made $5", "page.title").unwrap(),
            "Moonfall made $5"
        );
        unsafe {
            std::env::remove_var("DEVLOG_EXPAND_GAME");
        }
    }

    #[test]
    fn test_tilde_only_when_leading() {
        assert_eq!(expand_env("a~b", "page.output").unwrap(), "a~b");
    }

    #[test]
    fn test_braced_refs() {
        assert_eq!(
            braced_refs("${A}/$B/${C:-x}/${"),
            vec![("A", false), ("C", true)]
        );
    }
}
