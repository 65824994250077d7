//! Variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Variables are looked up in the [`EnvOverrides`] table handed to the
//! resolver, never in the live process environment.

use crate::{ConfigError, EnvOverrides};

/// Expand variable references in a string against `env`.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(
    value: &str,
    field: &str,
    env: &EnvOverrides,
) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        env.get(var)
            .map(|val| Some(val.to_owned()))
            .ok_or_else(|| LookupError {
                var_name: var.to_owned(),
            })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when a variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvOverrides {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_expand_simple_var() {
        let result = expand_env("${HOST}", "url", &env(&[("HOST", "example.com")])).unwrap();
        assert_eq!(result, "example.com");
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        let env = env(&[("ORG", "jordanleeevans")]);
        let result = expand_env("${ORG:-someone}", "url", &env).unwrap();
        assert_eq!(result, "jordanleeevans");
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        let result = expand_env("${ORG:-someone}", "url", &EnvOverrides::default()).unwrap();
        assert_eq!(result, "someone");
    }

    #[test]
    fn test_expand_missing_var_error() {
        let result = expand_env("${MISSING_HOST}", "docs.edit_url", &EnvOverrides::default());

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_HOST"));
        assert!(err.to_string().contains("docs.edit_url"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("https://github.com", "url", &EnvOverrides::default()).unwrap();
        assert_eq!(result, "https://github.com");
    }

    #[test]
    fn test_expand_embedded_vars() {
        let env = env(&[("OWNER", "jordanleeevans"), ("REPO", "debrief")]);
        let result = expand_env(
            "https://github.com/${OWNER}/${REPO}/tree/main/docs/",
            "docs.edit_url",
            &env,
        )
        .unwrap();
        assert_eq!(result, "https://github.com/jordanleeevans/debrief/tree/main/docs/");
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "url", &EnvOverrides::default());
        assert_eq!(result.unwrap(), "https://example.com/$path");
    }
}
