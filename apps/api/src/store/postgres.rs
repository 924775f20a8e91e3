use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::worker::NormalizedWorker;
use crate::normalizer::{normalize_company, normalize_worker};
use crate::store::WorkerStore;

/// Builds each worker as a legacy-shape JSON document so rows go through the
/// same normalizer as fixtures. `$1` optionally restricts to one worker id.
const WORKER_DOCUMENTS_SQL: &str = r#"
SELECT jsonb_build_object(
    'id', w.id,
    'name', w.name,
    'email', w.email,
    'department', w.department,
    'position', w.position,
    'hireDate', w.hire_date,
    'lastAssessment', w.last_assessment_date,
    'learningPath', (
        SELECT jsonb_build_object(
            'id', lp.id,
            'name', lp.title,
            'startDate', lp.created_at,
            'estimatedCompletion', lp.estimated_completion,
            'courses', COALESCE((
                SELECT jsonb_agg(jsonb_build_object(
                    'id', c.id,
                    'title', c.title,
                    'status', c.status,
                    'score', c.score,
                    'completedDate', c.completed_at,
                    'duration', c.duration
                ) ORDER BY c.position, c.id)
                FROM courses c
                WHERE c.learning_path_id = lp.id
            ), '[]'::jsonb)
        )
        FROM learning_paths lp
        WHERE lp.worker_id = w.id
        ORDER BY lp.created_at DESC
        LIMIT 1
    ),
    'skillGaps', COALESCE((
        SELECT jsonb_agg(jsonb_build_object(
            'skill', g.skill_name,
            'status', g.status,
            'priority', g.priority
        ) ORDER BY g.created_at, g.id)
        FROM skill_gaps g
        WHERE g.worker_id = w.id
    ), '[]'::jsonb)
) AS worker
FROM workers w
WHERE $1::text IS NULL OR w.id = $1
ORDER BY w.name, w.id
"#;

/// Live-mode store backed by PostgreSQL.
#[derive(Clone)]
pub struct PgWorkerStore {
    pool: PgPool,
}

impl PgWorkerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn worker_documents(&self, id: Option<&str>) -> Result<Vec<Value>, AppError> {
        Ok(sqlx::query_scalar::<_, Value>(WORKER_DOCUMENTS_SQL)
            .bind(id)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl WorkerStore for PgWorkerStore {
    fn mode(&self) -> &'static str {
        "live"
    }

    async fn list_workers(&self) -> Result<Vec<NormalizedWorker>, AppError> {
        let docs = self.worker_documents(None).await?;
        Ok(normalize_company(&docs))
    }

    async fn find_worker(&self, id: &str) -> Result<Option<NormalizedWorker>, AppError> {
        let docs = self.worker_documents(Some(id)).await?;
        Ok(docs
            .first()
            .map(normalize_worker)
            .filter(|w| !w.id.is_empty()))
    }

    async fn complete_course(
        &self,
        worker_id: &str,
        course_id: &str,
        score: Option<f64>,
    ) -> Result<NormalizedWorker, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE courses c
            SET status = 'completed',
                score = COALESCE($3, c.score),
                completed_at = NOW()
            FROM learning_paths lp
            WHERE c.learning_path_id = lp.id
              AND lp.worker_id = $1
              AND c.id = $2
            "#,
        )
        .bind(worker_id)
        .bind(course_id)
        .bind(score)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Course {course_id} not found for worker {worker_id}"
            )));
        }

        sqlx::query(
            "INSERT INTO assessments (worker_id, course_id, score, passed) VALUES ($1, $2, $3, TRUE)",
        )
        .bind(worker_id)
        .bind(course_id)
        .bind(score)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE workers SET last_assessment_date = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(worker_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Course {course_id} completed for worker {worker_id}");

        self.find_worker(worker_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Worker {worker_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::models::worker::CourseStatus;
    use uuid::Uuid;

    // DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_documents_and_completion_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = create_pool(&url).await.unwrap();

        let tag = Uuid::new_v4().simple().to_string();
        let worker_id = format!("w-{tag}");
        let path_id = format!("lp-{tag}");
        let first = format!("c1-{tag}");
        let second = format!("c2-{tag}");

        sqlx::query(
            "INSERT INTO workers (id, name, department, hire_date) \
             VALUES ($1, 'Ann Lee', 'Data', DATE '2021-03-15')",
        )
        .bind(&worker_id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO learning_paths (id, worker_id, title) VALUES ($1, $2, 'Data Path')")
            .bind(&path_id)
            .bind(&worker_id)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO courses (id, learning_path_id, title, status, position) \
             VALUES ($1, $3, 'SQL Basics', 'in_progress', 0), ($2, $3, 'Pandas', 'not_started', 1)",
        )
        .bind(&first)
        .bind(&second)
        .bind(&path_id)
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO skill_gaps (worker_id, skill_name, priority) VALUES ($1, 'Statistics', 'high')")
            .bind(&worker_id)
            .execute(&pool)
            .await
            .unwrap();

        let store = PgWorkerStore::new(pool.clone());
        let worker = store.find_worker(&worker_id).await.unwrap().unwrap();
        assert_eq!(worker.email, "ann.lee@example.com");
        assert_eq!(worker.department, "Data");
        assert_eq!(worker.hire_date.as_deref(), Some("2021-03-15"));
        assert_eq!(worker.learning_path.id, path_id);
        assert_eq!(worker.learning_path.name, "Data Path");
        let ids: Vec<_> = worker.learning_path.courses.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, [first.clone(), second.clone()]);
        assert_eq!(worker.learning_path.progress, 30);
        assert_eq!(worker.skill_gaps[0].skill, "Statistics");
        assert!(store
            .list_workers()
            .await
            .unwrap()
            .iter()
            .any(|w| w.id == worker_id));

        let updated = store.complete_course(&worker_id, &second, Some(75.0)).await.unwrap();
        let course = &updated.learning_path.courses[1];
        assert_eq!(course.status, CourseStatus::Completed);
        assert_eq!(course.score, Some(75.0));
        assert!(course.completed_date.is_some());
        assert_eq!(updated.learning_path.progress, 80);
        assert!(updated.last_assessment.is_some());

        let missing = store.complete_course(&worker_id, "no-such-course", None).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let assessments: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assessments WHERE worker_id = $1")
                .bind(&worker_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(assessments, 1);

        sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(&worker_id)
            .execute(&pool)
            .await
            .unwrap();
    }
}
