// ── Chat domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Option<EntityId>,
    pub sender: EntityId,
    pub receiver: EntityId,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}
