use crate::r#match::MatchSummary;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("user {0} has no open notification channel")]
    NoSubscriber(u32),
    #[error("notification to user {user_id} failed: {reason}")]
    Failed { user_id: u32, reason: String },
}

/// Delivers finished-simulation results to the users controlling a club.
pub trait UserNotifier: Send + Sync {
    fn notify(&self, user_id: u32, summary: &MatchSummary) -> Result<(), NotifyError>;
}

/// One broadcast channel per user, opened on first subscription.
pub struct NotificationHub {
    capacity: usize,
    channels: RwLock<HashMap<u32, broadcast::Sender<MatchSummary>>>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        NotificationHub {
            capacity: capacity.max(1),
            channels: RwLock::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self, user_id: u32) -> broadcast::Receiver<MatchSummary> {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);

        channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }
}

impl UserNotifier for NotificationHub {
    fn notify(&self, user_id: u32, summary: &MatchSummary) -> Result<(), NotifyError> {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);

        let sender = channels
            .get(&user_id)
            .ok_or(NotifyError::NoSubscriber(user_id))?;

        sender
            .send(summary.clone())
            .map(|_| ())
            .map_err(|_| NotifyError::NoSubscriber(user_id))
    }
}
