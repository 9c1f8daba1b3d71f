use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health-worker follow-up on a citizen. `status` is kept as the raw
/// stored text; see `FollowUpStatus::from_loose` for interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: Uuid,
    pub citizen_name: Option<String>,
    pub citizen_contact: Option<String>,
    pub health_worker_name: Option<String>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}
