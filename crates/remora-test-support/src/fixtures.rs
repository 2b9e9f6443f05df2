//! Snapshot builders shared by unit and integration tests.

use remora_models::{DaemonSnapshot, SessionInfo, Torrent, TorrentId, TorrentStatus, Tracker};

/// Build a downloading torrent with the given id and name and no payload
/// metrics.
#[must_use]
pub fn torrent(id: TorrentId, name: &str) -> Torrent {
    Torrent {
        id,
        name: name.to_owned(),
        status: TorrentStatus::Downloading,
        labels: Vec::new(),
        total_size: 0,
        size_when_done: 0,
        have_valid: 0,
        left_until_done: 0,
        rate_download: 0,
        rate_upload: 0,
        error: 0,
        error_string: String::new(),
        trackers: Vec::new(),
    }
}

/// Build a torrent in the given lifecycle state.
#[must_use]
pub fn torrent_with_status(id: TorrentId, name: &str, status: TorrentStatus) -> Torrent {
    let mut t = torrent(id, name);
    t.status = status;
    t
}

/// Build a torrent carrying the given labels.
#[must_use]
pub fn labeled_torrent(id: TorrentId, name: &str, labels: &[&str]) -> Torrent {
    let mut t = torrent(id, name);
    t.labels = labels.iter().map(|&l| l.to_owned()).collect();
    t
}

/// Build a torrent announcing to a single tracker.
#[must_use]
pub fn tracked_torrent(id: TorrentId, name: &str, announce: &str) -> Torrent {
    let mut t = torrent(id, name);
    t.trackers = vec![Tracker {
        announce: announce.to_owned(),
        tier: 0,
    }];
    t
}

/// Session as a freshly connected daemon reports it: loaded, no limits
/// enforced.
#[must_use]
pub fn session_loaded() -> SessionInfo {
    SessionInfo {
        version: Some("4.0.5".to_owned()),
        download_dir: Some("/var/lib/transmission/downloads".to_owned()),
        download_dir_free_space: Some(50_000_000_000),
        speed_limit_down_enabled: Some(false),
        speed_limit_down: Some(500),
        speed_limit_up_enabled: Some(false),
        speed_limit_up: Some(100),
        alt_speed_enabled: Some(false),
        alt_speed_down: Some(50),
        alt_speed_up: Some(10),
    }
}

/// Wrap torrents in a snapshot with a loaded session.
#[must_use]
pub fn snapshot(torrents: Vec<Torrent>) -> DaemonSnapshot {
    DaemonSnapshot {
        torrents,
        session: session_loaded(),
    }
}
