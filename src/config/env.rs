//! 环境变量配置加载

use std::env;
use std::path::PathBuf;

use crate::config::env::constants::{DEFAULT_COACH_TIMEOUT_SECS, DEFAULT_PORT};

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// API 密钥（未设置时服务开放访问）
    pub api_key: Option<String>,
    /// 服务监听端口
    pub port: u16,
    /// 数据目录（未设置时由存储层自行解析）
    pub data_dir: Option<PathBuf>,
    /// AI 教练配置
    pub coach: CoachConfig,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let api_key = env::var("WORKOUT_API_KEY").ok().filter(|s| !s.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = env::var("WORKOUT_DATA_DIR").ok().map(PathBuf::from);

        let coach = CoachConfig::from_env();

        Self {
            api_key,
            port,
            data_dir,
            coach,
        }
    }
}

/// AI 教练（OpenAI Chat Completions）配置
#[derive(Clone, Debug)]
pub struct CoachConfig {
    /// OpenAI API 密钥（未设置时推荐功能降级为提示信息）
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API 基础 URL（可覆盖，用于自建网关和测试）
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl CoachConfig {
    /// 从环境变量加载教练配置
    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty());

        let model = env::var("WORKOUT_COACH_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let base_url = env::var("WORKOUT_COACH_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let timeout_secs = env::var("WORKOUT_COACH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_COACH_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        }
    }

    /// 是否配置了 API 密钥
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// 常量
pub mod constants {
    /// 默认监听端口（与 Dockerfile 中 EXPOSE 的端口一致）
    pub const DEFAULT_PORT: u16 = 5000;

    /// 教练请求默认超时（秒）
    pub const DEFAULT_COACH_TIMEOUT_SECS: u64 = 30;

    /// 推荐时回看的历史记录条数
    pub const HISTORY_WINDOW: usize = 10;

    /// 数据文件名
    pub const DATA_FILE_NAME: &str = "workouts.json";

    /// 教练请求采样温度
    pub const COACH_TEMPERATURE: f64 = 0.5;

    /// 教练响应最大 token 数
    pub const COACH_MAX_TOKENS: u32 = 200;

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coach_config_defaults() {
        let config = CoachConfig {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: constants::DEFAULT_COACH_TIMEOUT_SECS,
        };
        assert!(!config.is_enabled());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_port_parsing() {
        env::set_var("PORT", "not-a-port");
        let config = EnvConfig::from_env();
        assert_eq!(config.port, constants::DEFAULT_PORT);

        env::set_var("PORT", "8123");
        let config = EnvConfig::from_env();
        assert_eq!(config.port, 8123);

        env::remove_var("PORT");
    }

    #[test]
    fn test_dockerfile_exposes_default_port() {
        let dockerfile = concat!(env!("CARGO_MANIFEST_DIR"), "/Dockerfile");
        let content = std::fs::read_to_string(dockerfile).expect("Dockerfile missing");

        let exposed: Vec<u16> = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("EXPOSE "))
            .filter_map(|port| port.trim().parse().ok())
            .collect();

        assert_eq!(exposed, vec![constants::DEFAULT_PORT]);
    }
}
