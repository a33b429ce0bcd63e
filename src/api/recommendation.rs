//! 训练建议 API
//!
//! 包含 /api/recommendation 端点

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::config::env::constants::HISTORY_WINDOW;
use crate::state::AppState;

/// 创建训练建议路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/recommendation", get(get_recommendation))
}

/// 获取基于近期历史的训练建议
///
/// GET /api/recommendation
/// 教练不可用时返回说明性文本，端点本身不报错
async fn get_recommendation(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let history = state.store.recent_history(HISTORY_WINDOW).await;
    let recommendation = state.coach.recommend(&history).await;
    Json(serde_json::json!({ "recommendation": recommendation }))
}
