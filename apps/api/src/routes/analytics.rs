use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::views::learner_progress::{learner_progress, LearnerProgress};

/// GET /api/analytics
/// Company analytics are served as stored in the company document.
pub async fn handle_company_analytics(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "userType": "company",
        "analytics": state.fixtures.company_data().company_analytics
    }))
}

/// GET /api/analytics/learner/progress
pub async fn handle_learner_progress(State(state): State<AppState>) -> Json<LearnerProgress> {
    Json(learner_progress(state.fixtures.learner_data()))
}
