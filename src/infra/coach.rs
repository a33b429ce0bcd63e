//! OpenAI Chat Completions HTTP Client
//!
//! 封装与 OpenAI API 的交互，复用连接池。推荐获取失败不向上传播
//! 错误，而是降级为说明性文本，保证推荐端点始终可用

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::env::constants::{COACH_MAX_TOKENS, COACH_TEMPERATURE};
use crate::config::CoachConfig;
use crate::domain::log::HistoryEntry;
use crate::services::coach::{build_user_message, SYSTEM_PROMPT};

/// AI 教练客户端
#[derive(Clone)]
pub struct CoachClient {
    client: Client,
    config: CoachConfig,
}

impl CoachClient {
    /// 创建新的教练客户端
    pub fn new(config: CoachConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// 是否配置了 API 密钥
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// 根据训练历史请求训练建议
    ///
    /// 任何失败（未配置密钥、网络错误、响应异常）都返回说明性文本
    pub async fn recommend(&self, history: &[HistoryEntry]) -> String {
        let api_key = match &self.config.api_key {
            Some(key) => key,
            None => {
                return "OpenAI API key not set. Please set the OPENAI_API_KEY environment \
                        variable to receive recommendations."
                    .to_string();
            }
        };

        let user_message = build_user_message(history);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: COACH_TEMPERATURE,
            max_tokens: COACH_MAX_TOKENS,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = match self.client.post(&url).bearer_auth(api_key).json(&request).send().await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to reach OpenAI API");
                return format!("Error requesting recommendation: {}", e);
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "OpenAI API returned non-success status");
                return format!("Error requesting recommendation: {}", e);
            }
        };

        match response.json::<ChatResponse>().await {
            Ok(data) => match data.choices.first() {
                Some(choice) => {
                    info!(
                        model = %self.config.model,
                        history_len = history.len(),
                        "Received recommendation"
                    );
                    choice.message.content.trim().to_string()
                }
                None => "No recommendation available.".to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Failed to parse OpenAI response");
                format!("Error requesting recommendation: {}", e)
            }
        }
    }
}

/// Chat Completions 请求体
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

/// 对话消息
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat Completions 响应体
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
