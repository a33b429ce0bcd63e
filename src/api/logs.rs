//! 训练记录 API
//!
//! 包含 /api/logs 端点

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::middleware::RequireApiKey;
use crate::state::AppState;

/// 创建训练记录请求
#[derive(Debug, Deserialize)]
pub struct NewLogRequest {
    pub workout_id: Option<i64>,
    /// 完成情况，必须是 JSON 对象
    pub log_data: Option<Value>,
    pub comment: Option<String>,
    /// 缺省为当天
    pub date: Option<NaiveDate>,
}

/// 创建训练记录路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/logs", get(list_logs).post(create_log))
}

/// 列出记录（最新在前，含训练项目字段）
///
/// GET /api/logs
async fn list_logs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_logs().await)
}

/// 记录一次完成的训练
///
/// POST /api/logs
/// 需要 API Key 认证（如已配置）
async fn create_log(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewLogRequest>,
) -> ApiResult<impl IntoResponse> {
    let (workout_id, log_data) = match (request.workout_id, request.log_data) {
        (Some(workout_id), Some(log_data)) if log_data.is_object() => (workout_id, log_data),
        _ => return Err(ApiError::bad_request("Invalid log entry")),
    };

    let date = request
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    state
        .store
        .create_log(workout_id, date, log_data, request.comment)
        .await?;
    Ok(Json(serde_json::json!({ "status": "logged" })))
}
