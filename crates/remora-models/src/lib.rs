#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Wire-facing snapshot types for a Transmission-compatible daemon.
//!
//! These types are re-used by the session core and by whichever RPC client
//! feeds it, so the field spellings stay a single source of truth: torrent
//! fields keep the daemon's camelCase names, session fields keep the
//! kebab-case names. Everything on [`SessionInfo`] is optional because the
//! remote publishes fields lazily; a default value means "not yet loaded",
//! never "feature disabled".

use serde::{Deserialize, Serialize};

/// Stable identifier the daemon assigns to each torrent.
pub type TorrentId = i64;

/// Lifecycle state of a torrent, using the daemon's numeric wire codes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Torrent is paused or finished (code 0).
    #[default]
    Stopped,
    /// Queued for a local data check (code 1).
    QueuedVerify,
    /// Checking local data (code 2).
    Verifying,
    /// Queued for download (code 3).
    QueuedDownload,
    /// Actively downloading (code 4).
    Downloading,
    /// Queued for seeding (code 5).
    QueuedSeed,
    /// Actively seeding (code 6).
    Seeding,
}

impl From<i64> for TorrentStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::QueuedVerify,
            2 => Self::Verifying,
            3 => Self::QueuedDownload,
            4 => Self::Downloading,
            5 => Self::QueuedSeed,
            6 => Self::Seeding,
            // Unknown codes degrade to Stopped rather than rejecting the
            // whole snapshot.
            _ => Self::Stopped,
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::QueuedVerify => 1,
            TorrentStatus::Verifying => 2,
            TorrentStatus::QueuedDownload => 3,
            TorrentStatus::Downloading => 4,
            TorrentStatus::QueuedSeed => 5,
            TorrentStatus::Seeding => 6,
        }
    }
}

impl TorrentStatus {
    /// Whether the torrent is paused.
    #[must_use]
    pub const fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Whether the torrent is actively fetching payload data.
    #[must_use]
    pub const fn is_downloading(self) -> bool {
        matches!(self, Self::Downloading)
    }

    /// Whether the torrent is actively seeding.
    #[must_use]
    pub const fn is_seeding(self) -> bool {
        matches!(self, Self::Seeding)
    }

    /// Whether the torrent sits in one of the daemon's wait queues.
    #[must_use]
    pub const fn is_queued(self) -> bool {
        matches!(
            self,
            Self::QueuedVerify | Self::QueuedDownload | Self::QueuedSeed
        )
    }

    /// Whether the torrent is verifying local data or waiting to.
    #[must_use]
    pub const fn is_checking(self) -> bool {
        matches!(self, Self::Verifying | Self::QueuedVerify)
    }
}

/// Tracker entry attached to a torrent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tracker {
    /// Announce URL for the tracker.
    pub announce: String,
    /// Tier the tracker belongs to.
    #[serde(default)]
    pub tier: i64,
}

/// Immutable-per-poll snapshot of a single torrent.
///
/// Owned by the daemon; the client replaces the whole list on every poll
/// rather than patching entries in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Torrent {
    /// Daemon-assigned identifier, stable for the daemon's lifetime.
    pub id: TorrentId,
    /// Display name.
    pub name: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: TorrentStatus,
    /// User labels attached to the torrent.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Total size of the torrent payload in bytes.
    #[serde(default)]
    pub total_size: u64,
    /// Bytes wanted once the current file selection completes.
    #[serde(default)]
    pub size_when_done: u64,
    /// Bytes downloaded and verified against checksums.
    #[serde(default)]
    pub have_valid: u64,
    /// Bytes still missing from the wanted selection.
    #[serde(default)]
    pub left_until_done: u64,
    /// Current download rate in bytes per second.
    #[serde(default)]
    pub rate_download: u64,
    /// Current upload rate in bytes per second.
    #[serde(default)]
    pub rate_upload: u64,
    /// Daemon error code; zero means no error.
    #[serde(default)]
    pub error: i64,
    /// Human-readable error description; empty means no error.
    #[serde(default)]
    pub error_string: String,
    /// Trackers announced for this torrent.
    #[serde(default)]
    pub trackers: Vec<Tracker>,
}

impl Torrent {
    /// Whether the wanted selection finished downloading and the torrent
    /// stopped afterwards.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status.is_stopped()
            && self.size_when_done > 0
            && self.size_when_done.saturating_sub(self.have_valid) == 0
    }

    /// Whether the daemon reported any error for this torrent.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error != 0 || !self.error_string.is_empty()
    }

    /// Host component of the first announce URL, used to group torrents by
    /// tracker.
    #[must_use]
    pub fn main_tracker_host(&self) -> Option<String> {
        let announce = &self.trackers.first()?.announce;
        let rest = announce
            .split_once("://")
            .map_or(announce.as_str(), |(_, rest)| rest);
        let authority = rest.split(['/', '?']).next()?;
        let host = authority.split(':').next()?;
        if host.is_empty() {
            None
        } else {
            Some(host.to_owned())
        }
    }
}

/// Session-wide fields published by the daemon.
///
/// Every field is optional: the remote answers session queries lazily and
/// a client may render before the first response lands. Consumers must
/// treat `None` as "unknown", not as a disabled feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    /// Daemon version string.
    #[serde(default)]
    pub version: Option<String>,
    /// Default download directory.
    #[serde(default, rename = "download-dir")]
    pub download_dir: Option<String>,
    /// Free space in the download directory, in bytes.
    #[serde(default, rename = "download-dir-free-space")]
    pub download_dir_free_space: Option<i64>,
    /// Whether the global download limit is enforced.
    #[serde(default, rename = "speed-limit-down-enabled")]
    pub speed_limit_down_enabled: Option<bool>,
    /// Global download limit in kilobytes per second.
    #[serde(default, rename = "speed-limit-down")]
    pub speed_limit_down: Option<i64>,
    /// Whether the global upload limit is enforced.
    #[serde(default, rename = "speed-limit-up-enabled")]
    pub speed_limit_up_enabled: Option<bool>,
    /// Global upload limit in kilobytes per second.
    #[serde(default, rename = "speed-limit-up")]
    pub speed_limit_up: Option<i64>,
    /// Whether the alternate speed limits are active.
    #[serde(default, rename = "alt-speed-enabled")]
    pub alt_speed_enabled: Option<bool>,
    /// Alternate download limit in kilobytes per second.
    #[serde(default, rename = "alt-speed-down")]
    pub alt_speed_down: Option<i64>,
    /// Alternate upload limit in kilobytes per second.
    #[serde(default, rename = "alt-speed-up")]
    pub alt_speed_up: Option<i64>,
}

/// Full state retrieved from the daemon in one poll cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DaemonSnapshot {
    /// All torrents known to the daemon, in daemon order.
    #[serde(default)]
    pub torrents: Vec<Torrent>,
    /// Session-wide fields as of this poll.
    #[serde(default)]
    pub session: SessionInfo,
}
