//! Axum route handlers for the Learning Paths API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::worker::CourseSearchHit;
use crate::normalizer::search_courses;
use crate::routes::workers::SearchQuery;
use crate::state::AppState;
use crate::validation::require_query;
use crate::views::learning_paths::{
    find_learning_path, learning_path_summaries, LearningPathSummary, LearningPathView,
};

/// GET /api/learning-paths
pub async fn handle_list_learning_paths(
    State(state): State<AppState>,
) -> Result<Json<Vec<LearningPathSummary>>, AppError> {
    let workers = state.store.list_workers().await?;
    Ok(Json(learning_path_summaries(&workers)))
}

/// GET /api/learning-paths/courses/search?q=
pub async fn handle_search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<CourseSearchHit>>, AppError> {
    let q = require_query(params.q.as_deref())?;
    let workers = state.store.list_workers().await?;
    Ok(Json(search_courses(&workers, &q)))
}

/// GET /api/learning-paths/:id
pub async fn handle_get_learning_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LearningPathView>, AppError> {
    let workers = state.store.list_workers().await?;
    find_learning_path(&workers, &id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Learning path {id} not found")))
}

/// GET /api/learning-paths/learner/my-path
pub async fn handle_learner_path(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let learner = state.fixtures.learner_data();
    let mut path = serde_json::to_value(&learner.learning_path).map_err(anyhow::Error::from)?;
    if let Some(obj) = path.as_object_mut() {
        obj.insert("user".to_string(), learner.user.clone());
    }
    Ok(Json(json!({
        "userType": "learner",
        "learningPath": path
    })))
}
