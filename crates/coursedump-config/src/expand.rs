//! Environment variable expansion for configuration values.
//!
//! Credential fields may reference the environment:
//!
//! - `${VAR}` expands to the value of `VAR`, errors if unset
//! - `${VAR:-default}` expands to `VAR` if set, otherwise the default
//!
//! Substitution itself is `shellexpand`'s; only the `:-` default handling
//! lives in the lookup context given to it.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error messages. Text that is not a
/// variable reference passes through unchanged.
///
/// # Errors
///
/// [`ConfigError::EnvVar`] when a referenced variable without a default is
/// unset.
pub(crate) fn expand_env_vars(value: &str, field: &str) -> Result<String, ConfigError> {
    let context = |reference: &str| -> Result<Option<String>, String> {
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };
        match std::env::var(name) {
            Ok(var_value) => Ok(Some(var_value)),
            Err(_) => match default {
                Some(default) => Ok(Some(default.to_owned())),
                None => Err(format!("${{{name}}} not set")),
            },
        }
    };

    shellexpand::env_with_context(value, context)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: err.cause,
        })
}
