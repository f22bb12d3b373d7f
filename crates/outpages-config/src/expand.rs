//! Environment variable expansion for config values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `field` names the config field for error messages.
pub(crate) fn expand_value(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = shellexpand::env_with_context(value, |var: &str| {
        let (name, default) = match var.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (var, None),
        };
        match std::env::var(name) {
            Ok(found) => Ok(Some(found)),
            Err(_) => match default {
                Some(default) => Ok(Some(default.to_owned())),
                None => Err(ConfigError::EnvVar {
                    field: field.to_owned(),
                    message: format!("${{{name}}} not set"),
                }),
            },
        }
    })
    .map_err(|err| err.cause)?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_values_pass_through() {
        assert_eq!(expand_value("no-vars-here", "f").unwrap(), "no-vars-here");
    }

    #[test]
    fn set_variable_expands() {
        // PATH is set in any test environment.
        let expanded = expand_value("${PATH}", "f").unwrap();
        assert!(!expanded.contains("${"));
    }

    #[test]
    fn default_applies_when_unset() {
        assert_eq!(
            expand_value("${OUTPAGES_SURELY_UNSET:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn unset_without_default_is_an_error() {
        let err = expand_value("${OUTPAGES_SURELY_UNSET}", "field.name").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { field, .. } if field == "field.name"));
    }

    #[test]
    fn expansion_composes_with_literal_text() {
        assert_eq!(
            expand_value("prefix-${OUTPAGES_SURELY_UNSET:-x}-suffix", "f").unwrap(),
            "prefix-x-suffix"
        );
    }
}
