//! Summary statistics over the visible subset and the selection.
//!
//! Everything here is derived and recomputed on demand; nothing is
//! persisted. Missing numeric session fields sum as zero, but limit
//! enablement stays a tri-state: a session that has not loaded yet must
//! not read as "limits disabled".

use remora_models::{SessionInfo, Torrent};
use serde::Serialize;

use crate::selection::SelectionSet;

/// Effective rate cap after resolving the daemon's limit precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimit {
    /// The session has not published enough fields to tell.
    #[default]
    Unknown,
    /// Limiting is switched off.
    Unlimited,
    /// Capped at this many kilobytes per second.
    Limited(i64),
}

impl RateLimit {
    /// Resolve a cap from the session's limit fields.
    ///
    /// Precedence: limiting disabled wins outright; otherwise the
    /// alternate limit applies while alt-speed mode is on, else the
    /// regular limit. Absent enablement or an absent chosen value resolves
    /// to `Unknown`, never to a limit state.
    #[must_use]
    pub const fn resolve(
        enabled: Option<bool>,
        alt_enabled: Option<bool>,
        alt_limit: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        match enabled {
            None => Self::Unknown,
            Some(false) => Self::Unlimited,
            Some(true) => {
                let chosen = match alt_enabled {
                    Some(true) => alt_limit,
                    _ => limit,
                };
                match chosen {
                    Some(value) => Self::Limited(value),
                    None => Self::Unknown,
                }
            }
        }
    }

    /// Wire representation used by the daemon's status surfaces: `-1`
    /// means unlimited, any other value is the cap. `Unknown` has no wire
    /// value.
    #[must_use]
    pub const fn as_rpc_value(self) -> Option<i64> {
        match self {
            Self::Unknown => None,
            Self::Unlimited => Some(-1),
            Self::Limited(value) => Some(value),
        }
    }
}

/// Figures the status bar renders, derived from (visible subset,
/// selection, session).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSummary {
    /// Torrents surviving filter and search.
    pub visible_count: usize,
    /// Visible torrents that are selected.
    pub selected_count: usize,
    /// Aggregate download rate over the visible subset, bytes per second.
    pub down_rate: u64,
    /// Aggregate upload rate over the visible subset, bytes per second.
    pub up_rate: u64,
    /// Effective download cap.
    pub down_limit: RateLimit,
    /// Effective upload cap.
    pub up_limit: RateLimit,
    /// Free space in the daemon's download directory, when known.
    pub free_space: Option<i64>,
    /// Daemon version, when known.
    pub daemon_version: Option<String>,
    /// Wanted bytes across the visible subset.
    pub size_total: u64,
    /// Wanted bytes across visible and selected torrents.
    pub size_selected: u64,
    /// Verified bytes across visible and selected torrents.
    pub size_done: u64,
    /// Missing bytes across visible and selected torrents.
    pub size_left: u64,
}

/// Compute the summary for the given visible subset and selection.
///
/// The selection is expected to be reconciled already; identifiers not in
/// the visible subset simply contribute nothing.
#[must_use]
pub fn summarize(
    visible: &[&Torrent],
    selection: &SelectionSet,
    session: &SessionInfo,
) -> StatusSummary {
    let mut summary = StatusSummary {
        visible_count: visible.len(),
        down_limit: RateLimit::resolve(
            session.speed_limit_down_enabled,
            session.alt_speed_enabled,
            session.alt_speed_down,
            session.speed_limit_down,
        ),
        up_limit: RateLimit::resolve(
            session.speed_limit_up_enabled,
            session.alt_speed_enabled,
            session.alt_speed_up,
            session.speed_limit_up,
        ),
        free_space: session.download_dir_free_space,
        daemon_version: session.version.clone(),
        ..StatusSummary::default()
    };

    for torrent in visible {
        summary.down_rate += torrent.rate_download;
        summary.up_rate += torrent.rate_upload;
        summary.size_total += torrent.size_when_done;
        if selection.contains(torrent.id) {
            summary.selected_count += 1;
            summary.size_selected += torrent.size_when_done;
            summary.size_done += torrent.have_valid;
            summary.size_left += torrent.left_until_done;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_models::SessionInfo;
    use remora_test_support::fixtures::{session_loaded, torrent};

    const MB: u64 = 1_000_000;

    fn sized(id: i64, size_when_done: u64, have_valid: u64) -> Torrent {
        let mut t = torrent(id, &format!("t{id}"));
        t.size_when_done = size_when_done;
        t.have_valid = have_valid;
        t.left_until_done = size_when_done.saturating_sub(have_valid);
        t
    }

    #[test]
    fn size_sums_match_the_scenario() {
        // Visible {1: 100MB done 50MB, 2: 200MB done 200MB}, both selected.
        let a = sized(1, 100 * MB, 50 * MB);
        let b = sized(2, 200 * MB, 200 * MB);
        let visible = vec![&a, &b];
        let selection: SelectionSet = [1, 2].into_iter().collect();

        let summary = summarize(&visible, &selection, &session_loaded());
        assert_eq!(summary.size_total, 300 * MB);
        assert_eq!(summary.size_done, 250 * MB);
        assert_eq!(summary.size_selected, 300 * MB);
        assert_eq!(summary.size_left, 50 * MB);
    }

    #[test]
    fn empty_selection_sums_to_zero() {
        let a = sized(1, 100 * MB, 50 * MB);
        let visible = vec![&a];
        let summary = summarize(&visible, &SelectionSet::new(), &session_loaded());
        assert_eq!(summary.selected_count, 0);
        assert_eq!(summary.size_selected, 0);
        assert_eq!(summary.size_done, 0);
        assert_eq!(summary.size_left, 0);
        // Visible totals are unaffected by the selection.
        assert_eq!(summary.size_total, 100 * MB);
    }

    #[test]
    fn full_selection_equals_visible_total() {
        let a = sized(1, 100 * MB, 0);
        let b = sized(2, 200 * MB, 0);
        let visible = vec![&a, &b];
        let selection: SelectionSet = [1, 2].into_iter().collect();
        let summary = summarize(&visible, &selection, &session_loaded());
        assert_eq!(summary.size_selected, summary.size_total);
    }

    #[test]
    fn rates_sum_over_visible_only() {
        let mut a = torrent(1, "a");
        a.rate_download = 1_000;
        a.rate_upload = 10;
        let mut b = torrent(2, "b");
        b.rate_download = 500;
        b.rate_upload = 20;
        let visible = vec![&a, &b];

        let summary = summarize(&visible, &SelectionSet::new(), &SessionInfo::default());
        assert_eq!(summary.down_rate, 1_500);
        assert_eq!(summary.up_rate, 30);
    }

    #[test]
    fn disabled_limiting_is_unlimited_regardless_of_other_fields() {
        let session = SessionInfo {
            speed_limit_down_enabled: Some(false),
            speed_limit_down: Some(500),
            alt_speed_enabled: Some(true),
            alt_speed_down: Some(50),
            ..SessionInfo::default()
        };
        let summary = summarize(&[], &SelectionSet::new(), &session);
        assert_eq!(summary.down_limit, RateLimit::Unlimited);
        assert_eq!(summary.down_limit.as_rpc_value(), Some(-1));
    }

    #[test]
    fn alt_speed_mode_takes_precedence_over_the_regular_limit() {
        let session = SessionInfo {
            speed_limit_down_enabled: Some(true),
            speed_limit_down: Some(500),
            alt_speed_enabled: Some(true),
            alt_speed_down: Some(50),
            ..SessionInfo::default()
        };
        let summary = summarize(&[], &SelectionSet::new(), &session);
        assert_eq!(summary.down_limit, RateLimit::Limited(50));

        let session = SessionInfo {
            alt_speed_enabled: Some(false),
            ..session
        };
        let summary = summarize(&[], &SelectionSet::new(), &session);
        assert_eq!(summary.down_limit, RateLimit::Limited(500));
    }

    #[test]
    fn unloaded_session_is_unknown_not_unlimited() {
        let summary = summarize(&[], &SelectionSet::new(), &SessionInfo::default());
        assert_eq!(summary.down_limit, RateLimit::Unknown);
        assert_eq!(summary.up_limit, RateLimit::Unknown);
        assert_eq!(summary.down_limit.as_rpc_value(), None);
        assert_eq!(summary.free_space, None);
        assert_eq!(summary.daemon_version, None);
    }

    #[test]
    fn enabled_limit_without_a_value_stays_unknown() {
        assert_eq!(
            RateLimit::resolve(Some(true), Some(false), None, None),
            RateLimit::Unknown
        );
        assert_eq!(
            RateLimit::resolve(Some(true), Some(true), None, Some(500)),
            RateLimit::Unknown
        );
        // Unknown alt-speed mode falls back to the regular limit.
        assert_eq!(
            RateLimit::resolve(Some(true), None, Some(50), Some(500)),
            RateLimit::Limited(500)
        );
    }
}
