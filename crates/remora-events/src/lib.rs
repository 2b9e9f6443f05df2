//! Event bus for the Remora session core.
//!
//! The bus carries a typed event enum with sequential identifiers and
//! supports replaying recent events when a subscriber attaches late (e.g.
//! a view that mounts after the first poll already landed). Internally it
//! uses `tokio::broadcast` with a bounded buffer; when the channel
//! overflows, the oldest events are dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use remora_models::TorrentId;
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

pub mod registry;

pub use registry::{AppCommand, CommandRegistry};

/// Identifier assigned to each event emitted by the session core.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Typed state-change events surfaced to the presentation layer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A daemon poll was applied to the session state.
    SnapshotApplied {
        /// Torrents in the unfiltered snapshot.
        torrent_count: usize,
        /// Torrents surviving the current filter and search.
        visible_count: usize,
    },
    /// A daemon poll arrived for a superseded connection and was dropped.
    SnapshotDiscarded {
        /// Epoch the stale poll was issued under.
        stale_epoch: u64,
    },
    /// The filter or search changed and the visible subset was recomputed.
    FilterChanged {
        /// Torrents surviving the new filter and search.
        visible_count: usize,
    },
    /// The selection set changed, through user action or reconciliation.
    SelectionChanged {
        /// The selected identifiers after the change, in ascending order.
        selected: Vec<TorrentId>,
    },
    /// The daemon toggled its alternate speed limits.
    AltSpeedChanged {
        /// Whether the alternate limits are now active.
        enabled: bool,
    },
    /// The session switched to a different daemon connection.
    ServerSwitched {
        /// Name of the newly active connection profile.
        name: String,
    },
}

impl Event {
    /// Machine-friendly discriminator for log and stream consumers.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::SnapshotApplied { .. } => "snapshot_applied",
            Event::SnapshotDiscarded { .. } => "snapshot_discarded",
            Event::FilterChanged { .. } => "filter_changed",
            Event::SelectionChanged { .. } => "selection_changed",
            Event::AltSpeedChanged { .. } => "alt_speed_changed",
            Event::ServerSwitched { .. } => "server_switched",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct EventEnvelope {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub event: Event,
}

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    buffer: Arc<Mutex<VecDeque<EventEnvelope>>>,
    next_id: Arc<std::sync::atomic::AtomicU64>,
    replay_capacity: usize,
}

impl EventBus {
    /// Construct a new bus with the provided broadcast capacity.
    ///
    /// The broadcast channel uses the same capacity as the in-memory replay
    /// buffer, so dropped events impact both structures consistently.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "event bus capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            next_id: Arc::new(std::sync::atomic::AtomicU64::new(1)),
            replay_capacity: capacity,
        }
    }

    /// Construct a bus with the default in-memory buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish a new event to the bus, assigning it a sequential identifier.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    pub fn publish(&self, event: Event) -> EventId {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };

        {
            let mut buffer = self.buffer.lock().expect("event buffer mutex poisoned");
            if buffer.len() == self.replay_capacity {
                buffer.pop_front();
            }
            buffer.push_back(envelope.clone());
        }

        let _ = self.sender.send(envelope);
        id
    }

    /// Subscribe to the bus, replaying any buffered events newer than `since_id`.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    #[must_use]
    pub fn subscribe(&self, since_id: Option<EventId>) -> EventStream {
        let mut backlog = VecDeque::new();
        if let Some(since) = since_id {
            let buffer = self.buffer.lock().expect("event buffer mutex poisoned");
            for item in buffer.iter() {
                if item.id > since {
                    backlog.push_back(item.clone());
                }
            }
        }

        let receiver = self.sender.subscribe();
        EventStream { backlog, receiver }
    }

    /// Returns the last assigned identifier, if any events have been published.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        let buffer = self.buffer.lock().expect("event buffer mutex poisoned");
        buffer.back().map(|event| event.id)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper that yields events either from the replay backlog or from
/// the live broadcast channel.
pub struct EventStream {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event, respecting the replay backlog first.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }

        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(_)) => self.receiver.recv().await.ok(),
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Drain any events that are already available without waiting.
    pub fn drain_ready(&mut self) -> Vec<EventEnvelope> {
        let mut ready: Vec<EventEnvelope> = self.backlog.drain(..).collect();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => ready.push(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => break,
            }
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection_event(id: usize) -> Event {
        Event::SelectionChanged {
            selected: vec![id as TorrentId],
        }
    }

    #[tokio::test]
    async fn sequential_ids_and_replay() {
        let bus = EventBus::with_capacity(16);

        let mut last_id = 0;
        for i in 0..5 {
            last_id = bus.publish(sample_selection_event(i));
        }
        assert_eq!(last_id, 5);

        let mut stream = bus.subscribe(Some(2));
        let mut received = Vec::new();
        for _ in 0..3 {
            if let Some(event) = stream.next().await {
                received.push(event);
            }
        }

        assert_eq!(received.len(), 3);
        assert_eq!(received.first().unwrap().id, 3);
        assert_eq!(received.last().unwrap().id, 5);
    }

    #[tokio::test]
    async fn replay_ring_drops_oldest_events() {
        let bus = EventBus::with_capacity(4);
        for i in 0..8 {
            bus.publish(sample_selection_event(i));
        }

        let mut stream = bus.subscribe(Some(0));
        let replayed = stream.drain_ready();
        assert_eq!(replayed.len(), 4);
        assert_eq!(replayed.first().unwrap().id, 5);
        assert_eq!(bus.last_event_id(), Some(8));
    }

    #[test]
    fn event_kinds_are_stable() {
        let event = Event::SnapshotApplied {
            torrent_count: 3,
            visible_count: 2,
        };
        assert_eq!(event.kind(), "snapshot_applied");

        let json = serde_json::to_value(&event).expect("event should serialize");
        assert_eq!(json["type"], "snapshot_applied");
        assert_eq!(json["torrent_count"], 3);
    }
}
