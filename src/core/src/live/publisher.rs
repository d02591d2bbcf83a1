use crate::live::session::LiveSnapshot;
use log::debug;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("live channel of match {0} is closed")]
    Closed(u32),
    #[error("publishing match {match_id} failed: {reason}")]
    Failed { match_id: u32, reason: String },
}

/// Pushes live snapshots to whoever is watching. Must not block: one slow
/// subscriber may never hold up other matches.
pub trait SnapshotPublisher: Send + Sync {
    fn publish(&self, snapshot: &LiveSnapshot) -> Result<(), PublishError>;

    /// The match is over, no more snapshots will follow.
    fn close(&self, _match_id: u32) {}
}

/// One broadcast channel per live match. Receivers that fall behind lose the
/// oldest snapshots instead of slowing the sender down.
pub struct LiveChannels {
    channels: RwLock<HashMap<u32, broadcast::Sender<LiveSnapshot>>>,
    capacity: usize,
}

impl LiveChannels {
    pub fn new(capacity: usize) -> Self {
        LiveChannels {
            channels: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, match_id: u32) -> broadcast::Receiver<LiveSnapshot> {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);

        channels
            .entry(match_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    pub fn subscribers(&self, match_id: u32) -> usize {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels
            .get(&match_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl SnapshotPublisher for LiveChannels {
    fn publish(&self, snapshot: &LiveSnapshot) -> Result<(), PublishError> {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);

        let Some(sender) = channels.get(&snapshot.match_id) else {
            return Ok(());
        };

        // No receivers is not a failure, nobody is watching
        if sender.send(snapshot.clone()).is_err() {
            debug!("match {}: no live subscribers", snapshot.match_id);
        }

        Ok(())
    }

    fn close(&self, match_id: u32) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels.remove(&match_id);
    }
}
