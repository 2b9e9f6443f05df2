//! Validation helpers for settings payloads.

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppSettings, ServerProfile};

fn invalid(
    field: &str,
    value: Option<String>,
    reason: &'static str,
) -> ConfigError {
    ConfigError::InvalidField {
        section: "servers".to_owned(),
        field: field.to_owned(),
        value,
        reason,
    }
}

/// Validate a single connection profile.
pub(crate) fn validate_profile(profile: &ServerProfile) -> ConfigResult<()> {
    if profile.name.trim().is_empty() {
        return Err(invalid("name", None, "must not be empty"));
    }
    if profile.host.trim().is_empty() || profile.host.contains(char::is_whitespace) {
        return Err(invalid(
            "host",
            Some(profile.host.clone()),
            "must be a host name or address without whitespace",
        ));
    }
    if profile.port == 0 {
        return Err(invalid("port", Some(profile.port.to_string()), "must be non-zero"));
    }
    if profile.poll.active_ms == 0 || profile.poll.inactive_ms == 0 {
        return Err(invalid("poll", None, "intervals must be non-zero"));
    }
    if profile.poll.active_ms > profile.poll.inactive_ms {
        return Err(invalid(
            "poll",
            None,
            "active interval must not exceed inactive interval",
        ));
    }
    Ok(())
}

/// Validate the whole settings document: every profile, name uniqueness,
/// and the default-server reference.
pub(crate) fn validate_settings(settings: &AppSettings) -> ConfigResult<()> {
    let mut seen = std::collections::HashSet::new();
    for profile in &settings.servers {
        validate_profile(profile)?;
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::DuplicateServer {
                name: profile.name.clone(),
            });
        }
    }
    if let Some(name) = &settings.default_server {
        if settings.server(name).is_none() {
            return Err(ConfigError::UnknownServer { name: name.clone() });
        }
    }
    Ok(())
}
