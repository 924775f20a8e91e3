pub mod ai;
pub mod analytics;
pub mod auth;
pub mod health;
pub mod learning_paths;
pub mod skill_gaps;
pub mod user_type;
pub mod workers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/user-type", get(user_type::handle_user_type))
        // Auth (demo stubs)
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/me", get(auth::handle_me))
        // Workers
        .route("/api/workers", get(workers::handle_list_workers))
        .route("/api/workers/search", get(workers::handle_search_workers))
        .route(
            "/api/workers/learner/profile",
            get(workers::handle_learner_profile),
        )
        .route("/api/workers/:id", get(workers::handle_get_worker))
        .route(
            "/api/workers/:id/courses/:course_id/complete",
            post(workers::handle_complete_course),
        )
        // Learning paths
        .route(
            "/api/learning-paths",
            get(learning_paths::handle_list_learning_paths),
        )
        .route(
            "/api/learning-paths/courses/search",
            get(learning_paths::handle_search_courses),
        )
        .route(
            "/api/learning-paths/learner/my-path",
            get(learning_paths::handle_learner_path),
        )
        .route(
            "/api/learning-paths/:id",
            get(learning_paths::handle_get_learning_path),
        )
        // Skill gaps
        .route("/api/skill-gaps", get(skill_gaps::handle_list_skill_gaps))
        .route(
            "/api/skill-gaps/worker/:worker_id",
            get(skill_gaps::handle_worker_skill_gaps),
        )
        .route(
            "/api/skill-gaps/learner/my-gaps",
            get(skill_gaps::handle_learner_skill_gaps),
        )
        // Analytics
        .route("/api/analytics", get(analytics::handle_company_analytics))
        .route(
            "/api/analytics/learner/progress",
            get(analytics::handle_learner_progress),
        )
        // AI (canned)
        .route("/api/ai/generate-path", post(ai::handle_generate_path))
        .route("/api/ai/expand-materials", post(ai::handle_expand_materials))
        .route(
            "/api/ai/learner/recommendations",
            get(ai::handle_learner_recommendations),
        )
        .with_state(state)
}
