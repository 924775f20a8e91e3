//! Demo-only auth. Every call succeeds with the same user.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DemoUser {
    pub id: &'static str,
    pub email: &'static str,
    #[serde(rename = "type")]
    pub user_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub user: DemoUser,
}

const DEMO_USER: DemoUser = DemoUser {
    id: "mock-user",
    email: "demo@example.com",
    user_type: "learner",
};

fn respond(message: Option<&'static str>) -> Json<AuthResponse> {
    Json(AuthResponse {
        success: true,
        message,
        user: DEMO_USER,
    })
}

/// POST /api/auth/login
pub async fn handle_login() -> Json<AuthResponse> {
    respond(Some("Mock login successful"))
}

/// POST /api/auth/register
pub async fn handle_register() -> Json<AuthResponse> {
    respond(Some("Mock registration successful"))
}

/// GET /api/auth/me
pub async fn handle_me() -> Json<AuthResponse> {
    respond(None)
}
