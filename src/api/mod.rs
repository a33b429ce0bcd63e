//! API 模块
//!
//! HTTP handlers 和路由组装

pub mod health;
pub mod logs;
pub mod pages;
pub mod recommendation;
pub mod schedule;
pub mod workouts;

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// 构建完整的 API 路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // HTML pages & static assets
        .merge(pages::router())
        // Health & Status
        .merge(health::router())
        // Workouts
        .merge(workouts::router())
        // Schedule
        .merge(schedule::router())
        // Logs
        .merge(logs::router())
        // Recommendation
        .merge(recommendation::router())
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
