//! Resolution of bulk-action targets to identifier lists.
//!
//! Toolbar actions operate either on the selection or on a structural
//! slice of the whole snapshot ("pause all", "start finished", "pause
//! errored"). Resolution is pure; the resulting id list is what gets
//! handed to the RPC collaborator.

use remora_models::{Torrent, TorrentId};
use serde::{Deserialize, Serialize};

use crate::selection::SelectionSet;

/// Which torrents a bulk action applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTarget {
    /// The current selection. Resolves to nothing when empty, so actions
    /// stay inert without a selection.
    Selected,
    /// Stopped torrents, the ones a "start all" affects.
    Startable,
    /// Non-stopped torrents, the ones a "pause all" affects.
    Stoppable,
    /// Torrents that finished downloading and stopped.
    Finished,
    /// Torrents reporting an error.
    Errored,
    /// Torrents actively downloading.
    Downloading,
}

impl ActionTarget {
    /// Resolve to an identifier list against the unfiltered snapshot.
    /// Structural targets yield snapshot order; `Selected` yields
    /// ascending id order.
    #[must_use]
    pub fn resolve(self, torrents: &[Torrent], selection: &SelectionSet) -> Vec<TorrentId> {
        let pick = |keep: fn(&Torrent) -> bool| -> Vec<TorrentId> {
            torrents.iter().filter(|t| keep(t)).map(|t| t.id).collect()
        };
        match self {
            Self::Selected => selection.ids(),
            Self::Startable => pick(|t| t.status.is_stopped()),
            Self::Stoppable => pick(|t| !t.status.is_stopped()),
            Self::Finished => pick(Torrent::is_finished),
            Self::Errored => pick(Torrent::has_error),
            Self::Downloading => pick(|t| t.status.is_downloading()),
        }
    }
}
