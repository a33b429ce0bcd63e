//! 应用状态

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::config::EnvConfig;
use crate::infra::CoachClient;
use crate::state::store::WorkoutStore;

/// 全局 shutdown token，用于优雅关闭
static GLOBAL_SHUTDOWN: std::sync::OnceLock<CancellationToken> = std::sync::OnceLock::new();

/// 获取全局 shutdown token
pub fn get_shutdown_token() -> CancellationToken {
    GLOBAL_SHUTDOWN.get_or_init(CancellationToken::new).clone()
}

/// 触发全局 shutdown
pub fn trigger_shutdown() {
    if let Some(token) = GLOBAL_SHUTDOWN.get() {
        token.cancel();
    }
}

/// 应用状态
pub struct AppState {
    /// 环境配置
    pub config: EnvConfig,
    /// 训练数据存储
    pub store: WorkoutStore,
    /// AI 教练客户端
    pub coach: CoachClient,
    /// 服务启动时间
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 创建新的应用状态并加载存储
    pub async fn new(config: EnvConfig) -> Self {
        let store = WorkoutStore::open(config.data_dir.as_deref()).await;
        let coach = CoachClient::new(config.coach.clone());

        tracing::info!(
            port = config.port,
            auth_enabled = config.api_key.is_some(),
            coach_enabled = config.coach.is_enabled(),
            coach_model = %config.coach.model,
            data_file = %store.data_file().display(),
            "Loaded configuration"
        );

        Self {
            config,
            store,
            coach,
            started_at: Utc::now(),
        }
    }
}
