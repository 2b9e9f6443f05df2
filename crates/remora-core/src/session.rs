//! The owning context that applies state transitions sequentially.
//!
//! A [`ServerSession`] holds the snapshot, filter, search, and selection
//! for one daemon connection. All transitions happen through `&mut self`
//! methods, so the surrounding event loop serialises them without locks.
//! Whenever the visible subset recomputes, the selection is reconciled
//! against it before any summary can be derived; stale identifiers never
//! reach the aggregate sums.

use remora_events::{Event, EventBus};
use remora_models::{DaemonSnapshot, SessionInfo, Torrent, TorrentId};
use tracing::{debug, info};

use crate::catalog::{self, TrackerRollup};
use crate::filter::{SearchQuery, TorrentFilter, visible, visible_ids};
use crate::selection::{SelectionAction, SelectionSet};
use crate::stats::{StatusSummary, summarize};

/// Token tying an in-flight poll to the connection it was issued for.
///
/// Obtained before starting a fetch and presented together with the
/// result; a ticket from a superseded connection is refused wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTicket {
    epoch: u64,
}

/// Whether a snapshot was applied or refused as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// The snapshot replaced the session state.
    Applied,
    /// The snapshot belonged to a superseded connection and was dropped.
    Discarded,
}

/// State for one daemon connection.
pub struct ServerSession {
    name: String,
    torrents: Vec<Torrent>,
    session: SessionInfo,
    filter: TorrentFilter,
    query: SearchQuery,
    selection: SelectionSet,
    epoch: u64,
    bus: EventBus,
}

impl ServerSession {
    /// Create an empty session for the named connection profile.
    #[must_use]
    pub fn new(name: impl Into<String>, bus: EventBus) -> Self {
        Self {
            name: name.into(),
            torrents: Vec::new(),
            session: SessionInfo::default(),
            filter: TorrentFilter::default(),
            query: SearchQuery::default(),
            selection: SelectionSet::new(),
            epoch: 0,
            bus,
        }
    }

    /// Name of the active connection profile.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bus carrying this session's state-change events.
    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Issue a ticket for a poll starting now.
    #[must_use]
    pub const fn poll_ticket(&self) -> PollTicket {
        PollTicket { epoch: self.epoch }
    }

    /// Replace the snapshot with a completed poll's result.
    ///
    /// A ticket issued before a server switch is refused: the whole
    /// snapshot is dropped and the session state stays untouched.
    pub fn apply_snapshot(
        &mut self,
        ticket: PollTicket,
        snapshot: DaemonSnapshot,
    ) -> SnapshotOutcome {
        if ticket.epoch != self.epoch {
            debug!(
                stale_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "dropping snapshot from superseded connection"
            );
            self.bus.publish(Event::SnapshotDiscarded {
                stale_epoch: ticket.epoch,
            });
            return SnapshotOutcome::Discarded;
        }

        let alt_speed_before = self.session.alt_speed_enabled;
        self.torrents = snapshot.torrents;
        self.session = snapshot.session;
        self.reconcile();

        if let Some(enabled) = self.session.alt_speed_enabled {
            if alt_speed_before != Some(enabled) {
                self.bus.publish(Event::AltSpeedChanged { enabled });
            }
        }
        self.bus.publish(Event::SnapshotApplied {
            torrent_count: self.torrents.len(),
            visible_count: self.visible().len(),
        });
        SnapshotOutcome::Applied
    }

    /// Replace the structural filter and reconcile.
    pub fn set_filter(&mut self, filter: TorrentFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.reconcile();
        self.bus.publish(Event::FilterChanged {
            visible_count: self.visible().len(),
        });
    }

    /// Parse and install new search input, then reconcile.
    pub fn set_search(&mut self, input: &str) {
        let query = SearchQuery::parse(input);
        if self.query == query {
            return;
        }
        self.query = query;
        self.reconcile();
        self.bus.publish(Event::FilterChanged {
            visible_count: self.visible().len(),
        });
    }

    /// Apply a user selection action.
    ///
    /// Reconciliation verbs arrive here too (the table dispatches them
    /// with the visible ids); either way the reduction is pure and the
    /// previous set is dropped only after the new one is in place.
    pub fn dispatch(&mut self, action: &SelectionAction) {
        let next = self.selection.reduce(action);
        if next != self.selection {
            self.selection = next;
            self.publish_selection();
        }
    }

    /// Switch to a different connection profile.
    ///
    /// Atomically supersedes any in-flight poll, clears the snapshot, and
    /// resets the selection with an empty `set`.
    pub fn switch_server(&mut self, name: impl Into<String>) {
        self.epoch += 1;
        self.name = name.into();
        self.torrents.clear();
        self.session = SessionInfo::default();
        self.filter = TorrentFilter::default();
        self.query = SearchQuery::default();
        let cleared = self.selection.reduce(&SelectionAction::clear());
        let selection_changed = cleared != self.selection;
        self.selection = cleared;
        info!(server = %self.name, "switched daemon connection");
        if selection_changed {
            self.publish_selection();
        }
        self.bus.publish(Event::ServerSwitched {
            name: self.name.clone(),
        });
    }

    /// Torrents surviving the current filter and search, in daemon order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Torrent> {
        visible(&self.torrents, &self.filter, &self.query)
    }

    /// The full unfiltered snapshot.
    #[must_use]
    pub fn torrents(&self) -> &[Torrent] {
        &self.torrents
    }

    /// Session fields from the latest poll.
    #[must_use]
    pub const fn session_info(&self) -> &SessionInfo {
        &self.session
    }

    /// The current structural filter.
    #[must_use]
    pub const fn filter(&self) -> &TorrentFilter {
        &self.filter
    }

    /// The current search query.
    #[must_use]
    pub const fn search(&self) -> &SearchQuery {
        &self.query
    }

    /// The reconciled selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Status-bar figures for the current state. The selection is always
    /// reconciled before this reads it.
    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        summarize(&self.visible(), &self.selection, &self.session)
    }

    /// Every label across the unfiltered snapshot, sorted.
    #[must_use]
    pub fn all_labels(&self) -> Vec<String> {
        catalog::all_labels(&self.torrents)
    }

    /// Labels on the selected visible torrents, in first-seen order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<String> {
        catalog::selected_labels(&self.visible(), &self.selection)
    }

    /// Snapshot grouped by main tracker host.
    #[must_use]
    pub fn tracker_rollup(&self) -> std::collections::BTreeMap<String, TrackerRollup> {
        catalog::tracker_rollup(&self.torrents)
    }

    /// Intersect the selection with the current visible ids. Runs after
    /// every change to the visible subset and before any summary read, so
    /// stale identifiers are pruned silently rather than surfacing as
    /// errors.
    fn reconcile(&mut self) {
        let ids = visible_ids(&self.torrents, &self.filter, &self.query);
        let next = self.selection.retained(&ids);
        if next != self.selection {
            self.selection = next;
            self.publish_selection();
        }
    }

    fn publish_selection(&self) {
        self.bus.publish(Event::SelectionChanged {
            selected: self.selection.ids(),
        });
    }
}
