//! HTML 页面
//!
//! 页面和静态资源在编译期嵌入二进制，容器内无需额外文件

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

/// 创建页面路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/workouts", get(workouts_page))
        .route("/schedule", get(schedule_page))
        .route("/history", get(history_page))
        .route("/static/style.css", get(style_css))
        .route("/static/app.js", get(app_js))
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

async fn workouts_page() -> Html<&'static str> {
    Html(include_str!("../../assets/workouts.html"))
}

async fn schedule_page() -> Html<&'static str> {
    Html(include_str!("../../assets/schedule.html"))
}

async fn history_page() -> Html<&'static str> {
    Html(include_str!("../../assets/history.html"))
}

async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../../assets/style.css"),
    )
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../../assets/app.js"),
    )
}
