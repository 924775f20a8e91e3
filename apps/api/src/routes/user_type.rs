use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserTypeQuery {
    #[serde(rename = "type")]
    pub user_type: Option<String>,
}

/// GET /api/user-type?type=learner|company
/// Anything other than `company` is treated as a learner.
pub async fn handle_user_type(
    State(state): State<AppState>,
    Query(params): Query<UserTypeQuery>,
) -> Result<Json<Value>, AppError> {
    if params.user_type.as_deref() == Some("company") {
        let company = state.fixtures.company_data();
        let workers = state.store.list_workers().await?;
        return Ok(Json(json!({
            "userType": "company",
            "data": {
                "companyId": company.company_id,
                "companyName": company.company_name,
                "workers": workers,
                "companyAnalytics": company.company_analytics
            }
        })));
    }

    Ok(Json(json!({
        "userType": "learner",
        "data": state.fixtures.learner_data()
    })))
}
