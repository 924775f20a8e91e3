//! Axum route handlers for the Skill Gaps API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::worker::SkillGap;
use crate::state::AppState;
use crate::views::skill_gaps::{flatten_skill_gaps, WorkerSkillGap};

/// GET /api/skill-gaps
pub async fn handle_list_skill_gaps(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkerSkillGap>>, AppError> {
    let workers = state.store.list_workers().await?;
    Ok(Json(flatten_skill_gaps(&workers)))
}

/// GET /api/skill-gaps/worker/:worker_id
pub async fn handle_worker_skill_gaps(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Result<Json<Vec<SkillGap>>, AppError> {
    state
        .store
        .find_worker(&worker_id)
        .await?
        .map(|w| Json(w.skill_gaps))
        .ok_or_else(|| AppError::NotFound(format!("Worker {worker_id} not found")))
}

/// GET /api/skill-gaps/learner/my-gaps
pub async fn handle_learner_skill_gaps(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "userType": "learner",
        "skillGaps": state.fixtures.learner_data().skill_gaps
    }))
}
