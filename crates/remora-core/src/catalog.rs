//! Label and tracker rollups over the snapshot.

use std::collections::BTreeMap;

use remora_models::Torrent;
use serde::Serialize;

use crate::selection::SelectionSet;

/// Every label in use across the unfiltered snapshot, sorted and
/// de-duplicated. Feeds the filter sidebar and the label editor's
/// suggestions.
#[must_use]
pub fn all_labels(torrents: &[Torrent]) -> Vec<String> {
    let mut labels: Vec<String> = torrents
        .iter()
        .flat_map(|t| t.labels.iter().cloned())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// Labels attached to the selected visible torrents, in first-seen order.
/// Feeds the label editor's initial state.
#[must_use]
pub fn selected_labels(visible: &[&Torrent], selection: &SelectionSet) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for torrent in visible.iter().filter(|t| selection.contains(t.id)) {
        for label in &torrent.labels {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
    }
    labels
}

/// Per-tracker aggregate used by the tracker dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackerRollup {
    /// Torrents announcing to this tracker.
    pub count: usize,
    /// Aggregate download rate across those torrents, bytes per second.
    pub down_rate: u64,
}

/// Group the snapshot by main tracker host. Torrents without a resolvable
/// host are skipped. Keys iterate in sorted order.
#[must_use]
pub fn tracker_rollup(torrents: &[Torrent]) -> BTreeMap<String, TrackerRollup> {
    let mut rollup: BTreeMap<String, TrackerRollup> = BTreeMap::new();
    for torrent in torrents {
        if let Some(host) = torrent.main_tracker_host() {
            let entry = rollup.entry(host).or_default();
            entry.count += 1;
            entry.down_rate += torrent.rate_download;
        }
    }
    rollup
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_test_support::fixtures::{labeled_torrent, torrent, tracked_torrent};

    #[test]
    fn all_labels_sorted_and_deduped() {
        let torrents = vec![
            labeled_torrent(1, "a", &["linux", "iso"]),
            labeled_torrent(2, "b", &["iso", "archive"]),
            torrent(3, "c"),
        ];
        assert_eq!(all_labels(&torrents), ["archive", "iso", "linux"]);
        assert!(all_labels(&[]).is_empty());
    }

    #[test]
    fn selected_labels_keep_first_seen_order() {
        let a = labeled_torrent(1, "a", &["linux", "iso"]);
        let b = labeled_torrent(2, "b", &["archive", "iso"]);
        let c = labeled_torrent(3, "c", &["video"]);
        let visible = vec![&a, &b, &c];
        let selection: SelectionSet = [1, 2].into_iter().collect();

        assert_eq!(
            selected_labels(&visible, &selection),
            ["linux", "iso", "archive"]
        );
        assert!(selected_labels(&visible, &SelectionSet::new()).is_empty());
    }

    #[test]
    fn tracker_rollup_groups_by_host() {
        let mut a = tracked_torrent(1, "a", "https://alpha.example.org/announce");
        a.rate_download = 100;
        let mut b = tracked_torrent(2, "b", "udp://alpha.example.org:6969/announce");
        b.rate_download = 50;
        let c = tracked_torrent(3, "c", "https://beta.example.org/announce");
        let untracked = torrent(4, "d");

        let rollup = tracker_rollup(&[a, b, c, untracked]);
        assert_eq!(rollup.len(), 2);
        assert_eq!(
            rollup["alpha.example.org"],
            TrackerRollup {
                count: 2,
                down_rate: 150
            }
        );
        assert_eq!(rollup["beta.example.org"].count, 1);
    }
}
