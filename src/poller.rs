// ABOUTME: Message poller — re-fetches a room's messages on a fixed interval.
// ABOUTME: At most one poll task is alive; each fetch result goes to the app as a PollEvent.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::{ChatApi, Message, RoomId};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One completed fetch. Replaces the whole message list in the view.
#[derive(Debug)]
pub struct PollEvent {
    pub room_id: RoomId,
    pub messages: Vec<Message>,
}

enum PollState {
    Idle,
    Polling { room_id: RoomId, task: JoinHandle<()> },
}

pub struct MessagePoller {
    api: Arc<dyn ChatApi>,
    tx: mpsc::Sender<PollEvent>,
    interval: Duration,
    state: PollState,
}

impl MessagePoller {
    pub fn new(api: Arc<dyn ChatApi>, tx: mpsc::Sender<PollEvent>, interval: Duration) -> Self {
        Self {
            api,
            tx,
            interval,
            state: PollState::Idle,
        }
    }

    /// Fetch now, then every interval. Any previous poll task is aborted first.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, room_id: RoomId) {
        self.abort_current();
        tracing::info!(room_id, "start message polling");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let period = self.interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match api.get_messages(room_id).await {
                    Ok(messages) => {
                        if tx.send(PollEvent { room_id, messages }).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(room_id, error = %e, "error fetching messages"),
                }
            }
        });

        self.state = PollState::Polling { room_id, task };
    }

    /// Stop polling. A no-op when idle.
    pub fn stop(&mut self) {
        if let Some(room_id) = self.active_room() {
            tracing::info!(room_id, "stop message polling");
        }
        self.abort_current();
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.state, PollState::Polling { .. })
    }

    pub fn active_room(&self) -> Option<RoomId> {
        match self.state {
            PollState::Polling { room_id, .. } => Some(room_id),
            PollState::Idle => None,
        }
    }

    fn abort_current(&mut self) {
        if let PollState::Polling { task, .. } = std::mem::replace(&mut self.state, PollState::Idle)
        {
            task.abort();
        }
    }
}

impl Drop for MessagePoller {
    fn drop(&mut self) {
        self.abort_current();
    }
}
