//! Broadcast history model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::MessengerType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub messenger_type: MessengerType,
    pub total_contacts: u64,
    pub successful_sends: u64,
    pub failed_sends: u64,
    pub status: BroadcastStatus,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl BroadcastLog {
    /// Sends not yet accounted for as delivered or failed
    pub fn pending_sends(&self) -> u64 {
        self.total_contacts
            .saturating_sub(self.successful_sends)
            .saturating_sub(self.failed_sends)
    }
}
