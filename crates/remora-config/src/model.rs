//! Typed settings models.
//!
//! # Design
//! - Pure data carriers used by the settings service and the hosting shell.
//! - Connection profiles mirror what the remote shell needs to reach a
//!   daemon; they carry no torrent state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Polling cadence for a daemon connection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollIntervals {
    /// Milliseconds between polls while the window is focused.
    pub active_ms: u64,
    /// Milliseconds between polls while the window is in the background.
    pub inactive_ms: u64,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            active_ms: 5_000,
            inactive_ms: 30_000,
        }
    }
}

/// Connection profile for one daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerProfile {
    /// Stable identity of the profile, independent of renames.
    pub id: Uuid,
    /// Display name, unique across profiles.
    pub name: String,
    /// Daemon host name or address.
    pub host: String,
    /// Daemon RPC port.
    pub port: u16,
    /// Whether to connect over TLS.
    #[serde(default)]
    pub tls: bool,
    /// Optional RPC username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional RPC password.
    #[serde(default)]
    pub password: Option<String>,
    /// Polling cadence for this connection.
    #[serde(default)]
    pub poll: PollIntervals,
}

impl ServerProfile {
    /// Create a profile with a fresh identity and default polling.
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            host: host.into(),
            port,
            tls: false,
            username: None,
            password: None,
            poll: PollIntervals::default(),
        }
    }

    /// Full RPC endpoint URL for this profile.
    #[must_use]
    pub fn rpc_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}/transmission/rpc", self.host, self.port)
    }
}

/// Root settings document persisted to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Known daemon connection profiles.
    #[serde(default)]
    pub servers: Vec<ServerProfile>,
    /// Name of the profile to connect on startup.
    #[serde(default)]
    pub default_server: Option<String>,
    /// Structured telemetry configuration (JSON object).
    #[serde(default)]
    pub telemetry: serde_json::Value,
}

impl AppSettings {
    /// Look up a profile by display name.
    #[must_use]
    pub fn server(&self, name: &str) -> Option<&ServerProfile> {
        self.servers.iter().find(|profile| profile.name == name)
    }
}
