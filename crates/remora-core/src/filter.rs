//! Structural and free-text filtering over the torrent snapshot.
//!
//! Filtering is a pure function of (snapshot, filter, query): it never
//! reorders, so the visible subset is always an order-preserving
//! subsequence of the daemon's list.

use remora_models::{Torrent, TorrentId};
use serde::{Deserialize, Serialize};

/// Structural predicate over a torrent's lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every torrent passes.
    #[default]
    All,
    /// Actively downloading.
    Downloading,
    /// Actively seeding.
    Seeding,
    /// Paused, including finished torrents.
    Stopped,
    /// Verifying local data or queued to.
    Checking,
    /// Waiting in one of the daemon's queues.
    Queued,
    /// Download complete and stopped.
    Finished,
    /// Reporting an error.
    Errored,
}

impl StatusFilter {
    /// Whether `torrent` satisfies this predicate.
    #[must_use]
    pub fn matches(self, torrent: &Torrent) -> bool {
        match self {
            Self::All => true,
            Self::Downloading => torrent.status.is_downloading(),
            Self::Seeding => torrent.status.is_seeding(),
            Self::Stopped => torrent.status.is_stopped(),
            Self::Checking => torrent.status.is_checking(),
            Self::Queued => torrent.status.is_queued(),
            Self::Finished => torrent.is_finished(),
            Self::Errored => torrent.has_error(),
        }
    }
}

/// Structural filter: status class, label membership, tracker host.
/// Criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFilter {
    /// Lifecycle predicate.
    pub status: StatusFilter,
    /// Required label, if any.
    pub label: Option<String>,
    /// Required tracker host, if any.
    pub tracker: Option<String>,
}

impl TorrentFilter {
    /// Filter matching every torrent.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `torrent` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, torrent: &Torrent) -> bool {
        if !self.status.matches(torrent) {
            return false;
        }
        if let Some(label) = &self.label {
            if !torrent.labels.iter().any(|l| l == label) {
                return false;
            }
        }
        if let Some(tracker) = &self.tracker {
            if torrent.main_tracker_host().as_deref() != Some(tracker.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Free-text query matched against torrent names.
///
/// An empty query is vacuously true; otherwise every term must appear in
/// the lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Parse raw search input: split on whitespace, lowercase each term,
    /// drop empties.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self {
            terms: input
                .split_whitespace()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    /// The parsed lowercase terms.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether the query has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether every term occurs in `name`, case-insensitively.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.terms.iter().all(|term| name.contains(term))
    }
}

/// Compute the visible subset: torrents satisfying the structural filter
/// and every search term, in snapshot order.
#[must_use]
pub fn visible<'a>(
    torrents: &'a [Torrent],
    filter: &TorrentFilter,
    query: &SearchQuery,
) -> Vec<&'a Torrent> {
    torrents
        .iter()
        .filter(|t| filter.matches(t) && query.matches(&t.name))
        .collect()
}

/// Identifiers of the visible subset, in snapshot order.
#[must_use]
pub fn visible_ids(
    torrents: &[Torrent],
    filter: &TorrentFilter,
    query: &SearchQuery,
) -> Vec<TorrentId> {
    visible(torrents, filter, query)
        .into_iter()
        .map(|t| t.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_test_support::fixtures::{
        labeled_torrent, torrent, torrent_with_status, tracked_torrent,
    };

    #[test]
    fn search_parse_splits_trims_and_lowercases() {
        let query = SearchQuery::parse("  Ubuntu   ISO\t22.04 ");
        assert_eq!(query.terms(), ["ubuntu", "iso", "22.04"]);

        assert!(SearchQuery::parse("   ").is_empty());
        assert!(SearchQuery::parse("").is_empty());
    }

    #[test]
    fn empty_query_is_vacuously_true() {
        assert!(SearchQuery::default().matches("anything"));
        assert!(SearchQuery::parse("").matches(""));
    }

    #[test]
    fn every_term_must_match() {
        let query = SearchQuery::parse("ubuntu 22.04");
        assert!(query.matches("Ubuntu-22.04-desktop-amd64.iso"));
        assert!(!query.matches("Ubuntu-20.04-desktop-amd64.iso"));
    }

    #[test]
    fn visible_preserves_snapshot_order() {
        let torrents = vec![
            torrent(3, "fedora"),
            torrent(1, "ubuntu"),
            torrent(2, "debian"),
        ];
        let ids = visible_ids(&torrents, &TorrentFilter::all(), &SearchQuery::default());
        assert_eq!(ids, vec![3, 1, 2]);

        let query = SearchQuery::parse("d");
        let ids = visible_ids(&torrents, &TorrentFilter::all(), &query);
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn status_classes_partition_the_snapshot() {
        use remora_models::TorrentStatus::{Downloading, Seeding, Stopped, Verifying};
        let torrents = vec![
            torrent_with_status(1, "a", Downloading),
            torrent_with_status(2, "b", Seeding),
            torrent_with_status(3, "c", Stopped),
            torrent_with_status(4, "d", Verifying),
        ];

        let by = |status: StatusFilter| {
            let filter = TorrentFilter {
                status,
                ..TorrentFilter::default()
            };
            visible_ids(&torrents, &filter, &SearchQuery::default())
        };

        assert_eq!(by(StatusFilter::Downloading), vec![1]);
        assert_eq!(by(StatusFilter::Seeding), vec![2]);
        assert_eq!(by(StatusFilter::Stopped), vec![3]);
        assert_eq!(by(StatusFilter::Checking), vec![4]);
        assert_eq!(by(StatusFilter::All), vec![1, 2, 3, 4]);
    }

    #[test]
    fn finished_filter_requires_complete_payload() {
        let mut done = torrent_with_status(1, "done", remora_models::TorrentStatus::Stopped);
        done.size_when_done = 100;
        done.have_valid = 100;
        let paused = torrent_with_status(2, "paused", remora_models::TorrentStatus::Stopped);

        let filter = TorrentFilter {
            status: StatusFilter::Finished,
            ..TorrentFilter::default()
        };
        let ids = visible_ids(&[done, paused], &filter, &SearchQuery::default());
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn label_and_tracker_criteria_are_anded() {
        let mut t = labeled_torrent(1, "tagged", &["linux", "iso"]);
        t.trackers = tracked_torrent(1, "tagged", "https://tracker.example.org/announce").trackers;
        let other = labeled_torrent(2, "other", &["linux"]);
        let torrents = vec![t, other];

        let filter = TorrentFilter {
            status: StatusFilter::All,
            label: Some("linux".to_owned()),
            tracker: Some("tracker.example.org".to_owned()),
        };
        let ids = visible_ids(&torrents, &filter, &SearchQuery::default());
        assert_eq!(ids, vec![1]);

        let filter = TorrentFilter {
            label: Some("video".to_owned()),
            ..TorrentFilter::default()
        };
        assert!(visible_ids(&torrents, &filter, &SearchQuery::default()).is_empty());
    }
}
