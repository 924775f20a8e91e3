//! Axum route handlers for the Workers API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::worker::NormalizedWorker;
use crate::normalizer::search_workers;
use crate::state::AppState;
use crate::validation::{require_query, validate_score, OptionalJsonBody};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerListResponse {
    pub user_type: &'static str,
    pub company: CompanyRef,
    pub workers: Vec<NormalizedWorker>,
    pub analytics: Value,
}

#[derive(Debug, Serialize)]
pub struct WorkerSearchResponse {
    pub workers: Vec<NormalizedWorker>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteCourseRequest {
    pub score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfileResponse {
    pub user_type: &'static str,
    pub user: Value,
    pub learning_path: Value,
    pub skill_gaps: Vec<Value>,
    pub achievements: Vec<Value>,
}

/// GET /api/workers
pub async fn handle_list_workers(
    State(state): State<AppState>,
) -> Result<Json<WorkerListResponse>, AppError> {
    let workers = state.store.list_workers().await?;
    let company = state.fixtures.company_data();
    Ok(Json(WorkerListResponse {
        user_type: "company",
        company: CompanyRef {
            id: company.company_id.clone(),
            name: company.company_name.clone(),
        },
        workers,
        analytics: company.company_analytics.clone(),
    }))
}

/// GET /api/workers/search?q=
pub async fn handle_search_workers(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<WorkerSearchResponse>, AppError> {
    let q = require_query(params.q.as_deref())?;
    let workers = state.store.list_workers().await?;
    Ok(Json(WorkerSearchResponse {
        workers: search_workers(&workers, &q),
    }))
}

/// GET /api/workers/:id
pub async fn handle_get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NormalizedWorker>, AppError> {
    state
        .store
        .find_worker(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Worker {id} not found")))
}

/// POST /api/workers/:id/courses/:course_id/complete
pub async fn handle_complete_course(
    State(state): State<AppState>,
    Path((id, course_id)): Path<(String, String)>,
    OptionalJsonBody(req): OptionalJsonBody<CompleteCourseRequest>,
) -> Result<Json<NormalizedWorker>, AppError> {
    let score = validate_score(req.score)?;
    let worker = state.store.complete_course(&id, &course_id, score).await?;
    Ok(Json(worker))
}

/// GET /api/workers/learner/profile
pub async fn handle_learner_profile(
    State(state): State<AppState>,
) -> Result<Json<LearnerProfileResponse>, AppError> {
    let learner = state.fixtures.learner_data();
    Ok(Json(LearnerProfileResponse {
        user_type: "learner",
        user: learner.user.clone(),
        learning_path: serde_json::to_value(&learner.learning_path)
            .map_err(anyhow::Error::from)?,
        skill_gaps: learner.skill_gaps.clone(),
        achievements: learner.achievements.clone(),
    }))
}
