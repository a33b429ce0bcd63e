//! 健康检查 API
//!
//! 包含 /health, /status 端点，供外部编排器做存活/就绪探测

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::config::env::constants::VERSION;
use crate::state::AppState;

/// 健康检查响应
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
    started_at: String,
    workouts: usize,
    logs: usize,
    scheduled: usize,
    coach_enabled: bool,
    auth_enabled: bool,
}

/// 创建健康检查路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(health_check))
}

/// 健康检查 - 返回状态、版本和存储计数
///
/// GET /health, GET /status
/// 无需认证
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = state.store.counts().await;

    Json(HealthResponse {
        status: "ok",
        service: "workout-coach",
        version: VERSION,
        timestamp: chrono::Utc::now().to_rfc3339(),
        started_at: state.started_at.to_rfc3339(),
        workouts: counts.workouts,
        logs: counts.logs,
        scheduled: counts.scheduled,
        coach_enabled: state.coach.is_enabled(),
        auth_enabled: state.config.api_key.is_some(),
    })
}
