use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a redraft task.
///
/// `Processing` is the initial state; `Completed` and `Failed` are terminal.
/// A task transitions exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Completed,
    Failed,
}

/// One tracked unit of redraft work.
///
/// Invariant: `result_html` is populated if and only if the status is
/// `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RedraftTask {
    pub id: Uuid,
    pub status: TaskStatus,
    pub result_html: Option<String>,
    pub error_detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RedraftTask {
    pub fn is_download_ready(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedraftRequest {
    /// Original contract in HTML form.
    pub html: Option<String>,
    /// Free-text redrafting instructions.
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedraftAccepted {
    pub message: String,
    pub task_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedraftStatusResponse {
    pub status: TaskStatus,
    pub download_ready: bool,
}
