// ── Chat polling ──
//
// One background task per open conversation. Each refresh posts the full
// conversation (or the error) back over a channel. Stopping cancels the
// timer only: a request already in flight finishes and its result is
// discarded.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use hostelio_api::ApiClient;

use crate::error::CoreError;
use crate::model::ChatMessage;

const EVENT_CHANNEL_SIZE: usize = 16;

/// Anything that can list a conversation.
pub trait MessageSource: Send + Sync + 'static {
    fn conversation(
        &self,
        other_user_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, CoreError>> + Send;
}

impl MessageSource for ApiClient {
    async fn conversation(&self, other_user_id: &str) -> Result<Vec<ChatMessage>, CoreError> {
        let records = self.conversation_with(other_user_id).await?;
        Ok(records.into_iter().map(ChatMessage::from).collect())
    }
}

#[derive(Debug)]
pub enum ChatEvent {
    Messages {
        messages: Vec<ChatMessage>,
        fetched_at: DateTime<Utc>,
    },
    Error(CoreError),
}

/// Spawns conversation refreshers.
pub struct ChatPoller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: MessageSource> ChatPoller<S> {
    pub fn new(source: Arc<S>, interval: Duration) -> Self {
        Self { source, interval }
    }

    pub fn start(&self, other_user_id: impl Into<String>) -> ChatSubscription {
        let other = other_user_id.into();
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(chat_poll_task(
            Arc::clone(&self.source),
            other,
            self.interval,
            tx,
            cancel.clone(),
        ));
        ChatSubscription {
            rx,
            cancel,
            task: Some(task),
        }
    }
}

async fn chat_poll_task<S: MessageSource>(
    source: Arc<S>,
    other: String,
    period: Duration,
    tx: mpsc::Sender<ChatEvent>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let result = source.conversation(&other).await;
                if cancel.is_cancelled() {
                    debug!(other = %other, "chat refresh finished after stop, dropping");
                    break;
                }
                let event = match result {
                    Ok(messages) => ChatEvent::Messages {
                        messages,
                        fetched_at: Utc::now(),
                    },
                    Err(e) => {
                        warn!(other = %other, error = %e, "chat refresh failed");
                        ChatEvent::Error(e)
                    }
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Receiving end of a running chat poller. Dropping it stops the poller.
pub struct ChatSubscription {
    rx: mpsc::Receiver<ChatEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ChatSubscription {
    /// Next refresh result, or `None` once stopped.
    pub async fn recv(&mut self) -> Option<ChatEvent> {
        self.rx.recv().await
    }

    pub async fn stop(mut self) {
        self.cancel.cancel();
        self.rx.close();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ChatSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
