//! 训练项目 API
//!
//! 包含 /api/workouts 端点

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::workout::{Workout, WorkoutPatch, WorkoutType};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequireApiKey;
use crate::state::AppState;

/// 创建训练项目请求
///
/// name 和 type 必填，其余字段按训练类型可选
#[derive(Debug, Deserialize)]
pub struct NewWorkoutRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

/// 更新训练项目请求（部分更新）
#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

/// 创建训练项目路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

/// 列出所有训练项目
///
/// GET /api/workouts
async fn list_workouts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list_workouts().await)
}

/// 创建训练项目
///
/// POST /api/workouts
/// 需要 API Key 认证（如已配置）
async fn create_workout(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewWorkoutRequest>,
) -> ApiResult<impl IntoResponse> {
    let (name, type_str) = match (request.name, request.workout_type) {
        (Some(name), Some(type_str)) if !name.is_empty() => (name, type_str),
        _ => return Err(ApiError::bad_request("Invalid workout definition")),
    };

    let workout_type = WorkoutType::parse(&type_str)
        .ok_or_else(|| ApiError::bad_request("Type must be strength or cardio"))?;

    let workout = Workout {
        id: 0, // 由存储层分配
        name,
        workout_type,
        sets: request.sets,
        reps: request.reps,
        weight: request.weight,
        distance: request.distance,
        duration: request.duration,
    };

    let id = state.store.create_workout(workout).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}

/// 获取单个训练项目
///
/// GET /api/workouts/{id}
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let workout = state
        .store
        .get_workout(id)
        .await
        .ok_or_else(|| ApiError::not_found("Workout"))?;
    Ok(Json(workout))
}

/// 部分更新训练项目
///
/// PUT /api/workouts/{id}
/// 需要 API Key 认证（如已配置）
async fn update_workout(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateWorkoutRequest>,
) -> ApiResult<impl IntoResponse> {
    let workout_type = match request.workout_type {
        Some(type_str) => Some(
            WorkoutType::parse(&type_str)
                .ok_or_else(|| ApiError::bad_request("Type must be strength or cardio"))?,
        ),
        None => None,
    };

    let patch = WorkoutPatch {
        name: request.name,
        workout_type,
        sets: request.sets,
        reps: request.reps,
        weight: request.weight,
        distance: request.distance,
        duration: request.duration,
    };

    if patch.is_empty() {
        return Err(ApiError::bad_request("No valid fields provided"));
    }

    state.store.update_workout(id, patch).await?;
    Ok(Json(serde_json::json!({ "status": "updated" })))
}

/// 删除训练项目（级联删除记录和计划）
///
/// DELETE /api/workouts/{id}
/// 需要 API Key 认证（如已配置）
async fn delete_workout(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    state.store.delete_workout(id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
