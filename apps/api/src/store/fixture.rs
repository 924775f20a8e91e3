use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::fixtures::DataProvider;
use crate::models::worker::NormalizedWorker;
use crate::normalizer::normalize_company;
use crate::store::completion::{apply_completions, Completion, CompletionLedger};
use crate::store::WorkerStore;

/// Mock-mode store: normalizes the company fixture on every read and overlays
/// completions recorded since startup.
#[derive(Clone)]
pub struct FixtureWorkerStore {
    provider: Arc<dyn DataProvider>,
    ledger: CompletionLedger,
}

impl FixtureWorkerStore {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            ledger: CompletionLedger::new(),
        }
    }
}

#[async_trait]
impl WorkerStore for FixtureWorkerStore {
    fn mode(&self) -> &'static str {
        "mock"
    }

    async fn list_workers(&self) -> Result<Vec<NormalizedWorker>, AppError> {
        let workers = normalize_company(&self.provider.company_data().workers);
        if self.ledger.is_empty() {
            return Ok(workers);
        }
        Ok(workers
            .into_iter()
            .map(|w| {
                let completions = self.ledger.for_worker(&w.id);
                apply_completions(w, &completions)
            })
            .collect())
    }

    async fn complete_course(
        &self,
        worker_id: &str,
        course_id: &str,
        score: Option<f64>,
    ) -> Result<NormalizedWorker, AppError> {
        let worker = self
            .find_worker(worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Worker {worker_id} not found")))?;
        if !worker.learning_path.courses.iter().any(|c| c.id == course_id) {
            return Err(AppError::NotFound(format!(
                "Course {course_id} not found for worker {worker_id}"
            )));
        }

        self.ledger.record(
            worker_id,
            course_id,
            Completion {
                score,
                completed_on: Utc::now().date_naive(),
            },
        );
        info!("Recorded completion of course {course_id} for worker {worker_id}");

        let completions = self.ledger.for_worker(worker_id);
        Ok(apply_completions(worker, &completions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureProvider;
    use crate::models::worker::CourseStatus;

    fn store() -> FixtureWorkerStore {
        FixtureWorkerStore::new(Arc::new(FixtureProvider::embedded().unwrap()))
    }

    #[tokio::test]
    async fn test_lists_every_fixture_worker() {
        let workers = store().list_workers().await.unwrap();
        let ids: Vec<_> = workers.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w-001", "w-002", "w-003", "w-004"]);
    }

    #[tokio::test]
    async fn test_find_worker_by_either_shape_id() {
        let store = store();
        assert_eq!(store.find_worker("w-003").await.unwrap().unwrap().name, "Raj Patel");
        assert_eq!(store.find_worker("w-004").await.unwrap().unwrap().name, "Ann Lee");
        assert!(store.find_worker("w-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_completion_visible_on_later_reads() {
        let store = store();
        let updated = store.complete_course("w-002", "c-201", Some(77.0)).await.unwrap();
        assert_eq!(updated.learning_path.status, CourseStatus::Completed);
        assert_eq!(updated.learning_path.progress, 100);

        let reread = store.find_worker("w-002").await.unwrap().unwrap();
        assert_eq!(reread.learning_path.courses[0].score, Some(77.0));
        assert_eq!(reread.learning_path.courses[0].status, CourseStatus::Completed);
    }

    #[tokio::test]
    async fn test_completion_unknown_targets() {
        let store = store();
        assert!(matches!(
            store.complete_course("w-999", "c-201", None).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.complete_course("w-002", "c-999", None).await,
            Err(AppError::NotFound(_))
        ));
    }
}
