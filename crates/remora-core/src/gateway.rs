//! Trait seam toward the RPC client that talks to the daemon.
//!
//! The session core never performs I/O itself; whichever transport crate
//! hosts it implements [`DaemonGateway`]. Optional capabilities default to
//! reporting lack of support so partial clients stay usable.

use anyhow::bail;
use async_trait::async_trait;
use remora_models::{DaemonSnapshot, TorrentId};

/// Bulk torrent commands forwarded to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentCommand {
    /// Start the torrents, honouring queue limits.
    Start,
    /// Start the torrents immediately, bypassing the queue.
    StartNow,
    /// Stop the torrents.
    Stop,
    /// Re-check local data.
    Verify,
    /// Re-announce to trackers.
    Reannounce,
    /// Move the torrents up in the queue.
    QueueMoveUp,
    /// Move the torrents down in the queue.
    QueueMoveDown,
}

impl TorrentCommand {
    /// RPC method name the daemon expects for this command.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Start => "torrent-start",
            Self::StartNow => "torrent-start-now",
            Self::Stop => "torrent-stop",
            Self::Verify => "torrent-verify",
            Self::Reannounce => "torrent-reannounce",
            Self::QueueMoveUp => "queue-move-up",
            Self::QueueMoveDown => "queue-move-down",
        }
    }
}

/// Transport-side contract the session core depends on.
#[async_trait]
pub trait DaemonGateway: Send + Sync {
    /// Retrieve a full snapshot of torrents and session fields.
    async fn fetch_snapshot(&self) -> anyhow::Result<DaemonSnapshot>;

    /// Apply a bulk command to the given torrents; default implementation
    /// reports lack of support.
    async fn torrent_action(
        &self,
        command: TorrentCommand,
        ids: &[TorrentId],
    ) -> anyhow::Result<()> {
        let _ = (command, ids);
        bail!("torrent actions not supported by this gateway");
    }

    /// Toggle the daemon's alternate speed limits; default implementation
    /// reports lack of support.
    async fn set_alt_speed(&self, enabled: bool) -> anyhow::Result<()> {
        let _ = enabled;
        bail!("alternate speed toggle not supported by this gateway");
    }

    /// Replace the labels on the given torrents; default implementation
    /// reports lack of support.
    async fn set_labels(&self, ids: &[TorrentId], labels: &[String]) -> anyhow::Result<()> {
        let _ = (ids, labels);
        bail!("label updates not supported by this gateway");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubGateway;

    #[async_trait]
    impl DaemonGateway for StubGateway {
        async fn fetch_snapshot(&self) -> anyhow::Result<DaemonSnapshot> {
            Ok(DaemonSnapshot::default())
        }
    }

    #[tokio::test]
    async fn gateway_default_methods_error() {
        let gateway = StubGateway;
        assert!(gateway.fetch_snapshot().await.is_ok());
        assert!(
            gateway
                .torrent_action(TorrentCommand::Start, &[1])
                .await
                .is_err()
        );
        assert!(gateway.set_alt_speed(true).await.is_err());
        assert!(
            gateway
                .set_labels(&[1], &["linux".to_owned()])
                .await
                .expect_err("labels should error")
                .to_string()
                .contains("label")
        );
    }

    #[test]
    fn method_names_match_the_daemon_vocabulary() {
        assert_eq!(TorrentCommand::Start.method_name(), "torrent-start");
        assert_eq!(TorrentCommand::StartNow.method_name(), "torrent-start-now");
        assert_eq!(TorrentCommand::Stop.method_name(), "torrent-stop");
        assert_eq!(TorrentCommand::QueueMoveUp.method_name(), "queue-move-up");
    }
}
