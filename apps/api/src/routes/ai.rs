//! Canned AI responses. Nothing here calls a model; payloads are fixed templates
//! filled from the request and the learner document.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::worker::CourseStatus;
use crate::state::AppState;
use crate::validation::{require_field, JsonBody};

const MAX_NEXT_STEPS: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePathRequest {
    pub worker_id: Option<String>,
    #[serde(default)]
    pub skill_gaps: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandMaterialsRequest {
    pub course_id: Option<String>,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerRecommendations {
    pub user_type: &'static str,
    pub recommendations: Vec<Value>,
    pub next_steps: Vec<String>,
}

/// POST /api/ai/generate-path
pub async fn handle_generate_path(
    JsonBody(req): JsonBody<GeneratePathRequest>,
) -> Result<Json<Value>, AppError> {
    let worker_id = require_field("workerId", req.worker_id.as_deref())?;
    let gaps = req
        .skill_gaps
        .iter()
        .filter_map(skill_label)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Json(json!({
        "id": format!("lp-ai-{}", Uuid::new_v4()),
        "name": format!("AI Generated Path for Worker {worker_id}"),
        "description": format!("Personalized learning path to address skill gaps: {gaps}"),
        "modules": [
            {
                "id": "module-1",
                "title": "Foundation Skills",
                "description": "Build fundamental knowledge",
                "estimatedDuration": "2 weeks",
                "lessons": ["Basic Concepts", "Practice Exercises"]
            },
            {
                "id": "module-2",
                "title": "Advanced Topics",
                "description": "Dive deeper into specialized areas",
                "estimatedDuration": "3 weeks",
                "lessons": ["Advanced Concepts", "Real-world Projects"]
            }
        ],
        "status": "Suggested",
        "generatedBy": "AI",
        "generatedDate": Utc::now().to_rfc3339(),
        "estimatedCompletion": "6 weeks"
    })))
}

/// POST /api/ai/expand-materials
pub async fn handle_expand_materials(
    JsonBody(req): JsonBody<ExpandMaterialsRequest>,
) -> Result<Json<Value>, AppError> {
    let course_id = require_field("courseId", req.course_id.as_deref())?;
    Ok(Json(json!({
        "courseId": course_id,
        "expandedContent": format!(
            "AI-enhanced content for {course_id}:\n\nBased on the context: {}\n\n\
             This includes:\n\
             - Detailed explanations with examples\n\
             - Interactive exercises\n\
             - Real-world case studies\n\
             - Assessment quizzes\n\
             - Additional resources and references",
            req.context
        ),
        "aiRecommendations": [
            "Focus on practical applications",
            "Practice with real projects",
            "Review related concepts"
        ],
        "estimatedStudyTime": "4-6 hours",
        "difficultyLevel": "Intermediate"
    })))
}

/// GET /api/ai/learner/recommendations
pub async fn handle_learner_recommendations(
    State(state): State<AppState>,
) -> Json<LearnerRecommendations> {
    let path = &state.fixtures.learner_data().learning_path;
    let next_steps = path
        .modules
        .iter()
        .flat_map(|m| m.lessons.iter())
        .filter(|l| CourseStatus::parse_lenient(&l.status) != CourseStatus::Completed)
        .take(MAX_NEXT_STEPS)
        .map(|l| format!("Complete the {} lesson", l.title))
        .collect();

    Json(LearnerRecommendations {
        user_type: "learner",
        recommendations: path.ai_recommendations.clone(),
        next_steps,
    })
}

/// Skill gaps arrive either as plain strings or as `{ skill | skill_name }` objects.
fn skill_label(gap: &Value) -> Option<String> {
    match gap {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("skill_name")
            .or_else(|| obj.get("skill"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_label_shapes() {
        assert_eq!(skill_label(&json!("Rust")).as_deref(), Some("Rust"));
        assert_eq!(skill_label(&json!({ "skill_name": "SQL" })).as_deref(), Some("SQL"));
        assert_eq!(skill_label(&json!({ "skill": "Go" })).as_deref(), Some("Go"));
        assert_eq!(skill_label(&json!(7)), None);
    }
}
