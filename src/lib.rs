//! Workout Coach - 自托管健身追踪与教练服务
//!
//! 模块化的库入口

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod middleware;
pub mod services;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::env::constants::VERSION;
use crate::config::EnvConfig;
use crate::state::AppState;

/// 运行时配置（命令行覆盖项）
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub port_override: Option<u16>,
    pub data_dir_override: Option<PathBuf>,
}

/// 初始化日志、加载配置并运行服务直到收到退出信号
pub async fn init_and_run(runtime: RuntimeConfig) -> anyhow::Result<()> {
    init_tracing();

    let mut config = EnvConfig::from_env();
    if let Some(port) = runtime.port_override {
        config.port = port;
    }
    if let Some(dir) = runtime.data_dir_override {
        config.data_dir = Some(dir);
    }
    let port = config.port;

    let state = Arc::new(AppState::new(config).await);
    let router = api::router(state);

    let addr = format!("0.0.0.0:{}", port);
    // 端口被占用等绑定失败直接向上传播为致命错误
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, version = VERSION, "Workout coach listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// 初始化 tracing 订阅器，默认 info 级别，可用 RUST_LOG 覆盖
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// 等待 Ctrl-C 或全局 shutdown token
async fn shutdown_signal() {
    let token = state::get_shutdown_token();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down");
            state::trigger_shutdown();
        }
        _ = token.cancelled() => {
            tracing::info!("Shutdown requested");
        }
    }
}
