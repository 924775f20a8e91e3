//! Worker storage backends. Every backend hands out normalized workers only.

pub mod completion;
pub mod fixture;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::worker::NormalizedWorker;

/// Carried in `AppState` as `Arc<dyn WorkerStore>`; mock and live variants swap
/// at startup via `DATA_MODE`.
#[async_trait]
pub trait WorkerStore: Send + Sync {
    /// "mock" or "live", reported by `/health`.
    fn mode(&self) -> &'static str;

    async fn list_workers(&self) -> Result<Vec<NormalizedWorker>, AppError>;

    async fn find_worker(&self, id: &str) -> Result<Option<NormalizedWorker>, AppError> {
        Ok(self
            .list_workers()
            .await?
            .into_iter()
            .find(|w| w.id == id))
    }

    /// Moves a course to Completed and returns the updated worker.
    async fn complete_course(
        &self,
        worker_id: &str,
        course_id: &str,
        score: Option<f64>,
    ) -> Result<NormalizedWorker, AppError>;
}
