//! In-memory task store owning the redraft state machine.

use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use uuid::Uuid;

use super::models::{RedraftTask, TaskStatus};

/// Retention window for finished and in-flight tasks. Eviction keeps the
/// table bounded; an evicted task behaves like an unknown id and the client
/// resubmits.
const TASK_TTL: Duration = Duration::from_secs(60 * 60);
const TASK_CAPACITY: u64 = 10_000;

/// Process-wide table of redraft tasks.
///
/// Concurrent reads come from the status and download handlers; after
/// creation the spawned worker is the only writer. Every transition inserts
/// a whole record, so readers never observe a half-written task.
#[derive(Clone)]
pub struct TaskStore {
    tasks: Cache<Uuid, RedraftTask>,
}

impl TaskStore {
    pub fn new() -> Self {
        let tasks = Cache::builder()
            .time_to_live(TASK_TTL)
            .max_capacity(TASK_CAPACITY)
            .build();
        Self { tasks }
    }

    /// Insert a fresh task in the `processing` state and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let task = RedraftTask {
            id,
            status: TaskStatus::Processing,
            result_html: None,
            error_detail: None,
            created_at: Utc::now(),
        };
        self.tasks.insert(id, task).await;
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<RedraftTask> {
        self.tasks.get(&id).await
    }

    /// Terminal transition: processing -> completed.
    pub async fn complete(&self, id: Uuid, result_html: String) {
        if let Some(mut task) = self.tasks.get(&id).await {
            task.status = TaskStatus::Completed;
            task.result_html = Some(result_html);
            task.error_detail = None;
            self.tasks.insert(id, task).await;
        } else {
            log::warn!("redraft task {} finished after eviction, dropping result", id);
        }
    }

    /// Terminal transition: processing -> failed.
    pub async fn fail(&self, id: Uuid, error_detail: String) {
        if let Some(mut task) = self.tasks.get(&id).await {
            task.status = TaskStatus::Failed;
            task.result_html = None;
            task.error_detail = Some(error_detail);
            self.tasks.insert(id, task).await;
        } else {
            log::warn!("redraft task {} failed after eviction, dropping error detail", id);
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_task_is_processing() {
        let store = TaskStore::new();
        let id = store.create().await;

        let task = store.get(id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Processing);
        assert!(!task.is_download_ready());
        assert!(task.result_html.is_none());
        assert!(task.error_detail.is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent() {
        let store = TaskStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_complete_transition() {
        let store = TaskStore::new();
        let id = store.create().await;
        store.complete(id, "<html>redrafted</html>".to_string()).await;

        let task = store.get(id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.is_download_ready());
        assert_eq!(task.result_html.as_deref(), Some("<html>redrafted</html>"));
        assert!(task.error_detail.is_none());
    }

    #[tokio::test]
    async fn test_fail_transition() {
        let store = TaskStore::new();
        let id = store.create().await;
        store.fail(id, "connection refused".to_string()).await;

        let task = store.get(id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Failed);
        assert!(!task.is_download_ready());
        assert!(task.result_html.is_none());
        assert_eq!(task.error_detail.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_result_populated_iff_completed() {
        let store = TaskStore::new();
        let completed = store.create().await;
        let failed = store.create().await;
        store.complete(completed, "<p>done</p>".to_string()).await;
        store.fail(failed, "upstream 503".to_string()).await;

        for id in [completed, failed] {
            let task = store.get(id).await.unwrap();
            assert_eq!(
                task.result_html.is_some(),
                task.status == TaskStatus::Completed
            );
        }
    }

    #[tokio::test]
    async fn test_tasks_get_distinct_ids() {
        let store = TaskStore::new();
        let first = store.create().await;
        let second = store.create().await;
        assert_ne!(first, second);
    }
}
