//! 训练计划 API
//!
//! 包含 /api/schedule 端点

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::middleware::RequireApiKey;
use crate::state::AppState;

/// 设置计划请求中的单个条目
///
/// date 和 workout_id 任一缺失的条目会被跳过
#[derive(Debug, Deserialize)]
pub struct ScheduleItemRequest {
    pub date: Option<NaiveDate>,
    pub workout_id: Option<i64>,
}

/// 创建训练计划路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/schedule",
        get(get_schedule).post(set_schedule).delete(clear_schedule),
    )
}

/// 获取计划（按日期排序，含训练项目字段）
///
/// GET /api/schedule
async fn get_schedule(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_schedule().await)
}

/// 设置计划
///
/// POST /api/schedule
/// 同一天的已有条目被请求中的条目整体替换；需要 API Key 认证（如已配置）
async fn set_schedule(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Json(items): Json<Vec<ScheduleItemRequest>>,
) -> ApiResult<impl IntoResponse> {
    let entries: Vec<(NaiveDate, i64)> = items
        .into_iter()
        .filter_map(|item| match (item.date, item.workout_id) {
            (Some(date), Some(workout_id)) => Some((date, workout_id)),
            _ => None,
        })
        .collect();

    state.store.replace_schedule(entries).await?;
    Ok(Json(serde_json::json!({ "status": "scheduled" })))
}

/// 清空计划
///
/// DELETE /api/schedule
/// 需要 API Key 认证（如已配置）
async fn clear_schedule(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    state.store.clear_schedule().await?;
    Ok(Json(serde_json::json!({ "status": "cleared" })))
}
