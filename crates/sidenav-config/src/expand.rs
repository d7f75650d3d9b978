//! Environment variable and home directory expansion for config strings.

use crate::ConfigError;

/// Expand `~`, `$VAR` and `${VAR}` references in a configuration value.
///
/// `field` names the config key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })
}
