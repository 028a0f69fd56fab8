use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One immutable ledger entry for a leave-request transition. Rows are only
/// ever inserted; the BIGSERIAL id makes read order match write order.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub leave_id: Uuid,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
