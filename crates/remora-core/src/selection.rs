//! Selection state machine.
//!
//! The selection is an ordered set of torrent identifiers driven by four
//! verbs. Reduction is pure: it returns a new set and never mutates the
//! receiver, so repeated dispatches observe consistent state regardless of
//! how often the surrounding view re-renders.

use std::collections::BTreeSet;

use remora_models::TorrentId;
use serde::{Deserialize, Serialize};

/// Verb of a selection action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionVerb {
    /// Replace the selection with the given identifiers.
    Set,
    /// Add the given identifiers to the selection.
    Add,
    /// Keep only selected identifiers present in the given list. This is
    /// the reconciliation verb dispatched whenever the visible subset
    /// recomputes.
    Filter,
    /// Flip membership of a single identifier.
    Toggle,
}

/// One transition of the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionAction {
    /// How to combine `ids` with the current selection.
    pub verb: SelectionVerb,
    /// Identifiers the verb operates on.
    pub ids: Vec<TorrentId>,
}

impl SelectionAction {
    /// Replace the selection with `ids`.
    #[must_use]
    pub fn set(ids: impl Into<Vec<TorrentId>>) -> Self {
        Self {
            verb: SelectionVerb::Set,
            ids: ids.into(),
        }
    }

    /// Clear the selection entirely.
    #[must_use]
    pub fn clear() -> Self {
        Self::set(Vec::new())
    }

    /// Add `ids` to the selection.
    #[must_use]
    pub fn add(ids: impl Into<Vec<TorrentId>>) -> Self {
        Self {
            verb: SelectionVerb::Add,
            ids: ids.into(),
        }
    }

    /// Intersect the selection with `ids`.
    #[must_use]
    pub fn filter(ids: impl Into<Vec<TorrentId>>) -> Self {
        Self {
            verb: SelectionVerb::Filter,
            ids: ids.into(),
        }
    }

    /// Flip membership of `id`.
    #[must_use]
    pub fn toggle(id: TorrentId) -> Self {
        Self {
            verb: SelectionVerb::Toggle,
            ids: vec![id],
        }
    }
}

/// Ordered set of selected torrent identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<TorrentId>);

impl SelectionSet {
    /// The empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: TorrentId) -> bool {
        self.0.contains(&id)
    }

    /// Iterate the selected identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TorrentId> + '_ {
        self.0.iter().copied()
    }

    /// Selected identifiers as a vector, in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<TorrentId> {
        self.0.iter().copied().collect()
    }

    /// Apply `action`, returning the resulting selection. The receiver is
    /// left untouched.
    ///
    /// `Set` with an empty list clears the selection; `Filter` intersects,
    /// so an empty list also clears (nothing is visible, nothing stays
    /// selected); an empty list is a no-op for `Add` and `Toggle`.
    /// `Toggle` expects exactly one identifier; passing more is a caller
    /// bug surfaced by a debug assertion, and only the first identifier is
    /// honoured.
    #[must_use]
    pub fn reduce(&self, action: &SelectionAction) -> Self {
        match action.verb {
            SelectionVerb::Set => Self(action.ids.iter().copied().collect()),
            SelectionVerb::Add => {
                let mut next = self.0.clone();
                next.extend(action.ids.iter().copied());
                Self(next)
            }
            SelectionVerb::Filter => {
                let keep: BTreeSet<TorrentId> = action.ids.iter().copied().collect();
                Self(self.0.intersection(&keep).copied().collect())
            }
            SelectionVerb::Toggle => {
                debug_assert!(
                    action.ids.len() == 1,
                    "toggle expects exactly one identifier, got {}",
                    action.ids.len()
                );
                let mut next = self.0.clone();
                if let Some(&id) = action.ids.first() {
                    if !next.remove(&id) {
                        next.insert(id);
                    }
                }
                Self(next)
            }
        }
    }

    /// Keep only identifiers present in `universe`, pruning the rest.
    #[must_use]
    pub fn retained(&self, universe: &[TorrentId]) -> Self {
        self.reduce(&SelectionAction::filter(universe.to_vec()))
    }
}

impl FromIterator<TorrentId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = TorrentId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(ids: &[TorrentId]) -> SelectionSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn set_replaces_regardless_of_current_state() {
        let current = selection(&[1, 2, 3]);
        let next = current.reduce(&SelectionAction::set(vec![7, 8, 7]));
        assert_eq!(next, selection(&[7, 8]));

        let next = SelectionSet::new().reduce(&SelectionAction::set(vec![7, 8]));
        assert_eq!(next, selection(&[7, 8]));
    }

    #[test]
    fn set_with_empty_ids_clears_all() {
        let current = selection(&[1, 2, 3]);
        assert!(current.reduce(&SelectionAction::clear()).is_empty());
    }

    #[test]
    fn add_is_union() {
        let current = selection(&[1, 2]);
        let next = current.reduce(&SelectionAction::add(vec![2, 3]));
        assert_eq!(next, selection(&[1, 2, 3]));
    }

    #[test]
    fn filter_is_intersection() {
        let current = selection(&[1, 2, 3]);
        let next = current.reduce(&SelectionAction::filter(vec![1, 3, 9]));
        assert_eq!(next, selection(&[1, 3]));
    }

    #[test]
    fn empty_add_is_a_no_op_but_empty_filter_clears() {
        let current = selection(&[1, 2]);
        assert_eq!(current.reduce(&SelectionAction::add(vec![])), current);
        // Intersection with the empty visible set leaves nothing selected.
        assert!(current.reduce(&SelectionAction::filter(vec![])).is_empty());
    }

    #[test]
    fn toggle_is_an_involution() {
        let current = selection(&[1, 2]);
        let once = current.reduce(&SelectionAction::toggle(3));
        assert!(once.contains(3));
        let twice = once.reduce(&SelectionAction::toggle(3));
        assert_eq!(twice, current);

        let removed = current.reduce(&SelectionAction::toggle(1));
        assert!(!removed.contains(1));
    }

    #[test]
    fn reduce_never_mutates_the_receiver() {
        let current = selection(&[1, 2, 3]);
        let snapshot = current.clone();
        let _ = current.reduce(&SelectionAction::clear());
        let _ = current.reduce(&SelectionAction::add(vec![9]));
        let _ = current.reduce(&SelectionAction::toggle(1));
        assert_eq!(current, snapshot);
    }

    #[test]
    fn reconciliation_prunes_stale_ids() {
        // Selection {1,2,3}, new visible list [1,3] after a poll.
        let current = selection(&[1, 2, 3]);
        let next = current.retained(&[1, 3]);
        assert_eq!(next, selection(&[1, 3]));
    }

    #[test]
    fn ids_are_reported_in_ascending_order() {
        let current = SelectionSet::new().reduce(&SelectionAction::set(vec![5, 1, 3]));
        assert_eq!(current.ids(), vec![1, 3, 5]);
    }
}
