//! API Key 认证中间件
//!
//! 提供 `RequireApiKey` extractor，替代每个 handler 中重复的 API key 校验逻辑。
//! 未配置 `WORKOUT_API_KEY` 时服务开放访问，配置后写操作必须携带 `x-api-key` header

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderMap, request::Parts},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// API Key 认证 Extractor
///
/// 在需要认证的 handler 中使用此 extractor，自动验证 `x-api-key` header
///
/// # Example
///
/// ```ignore
/// async fn protected_handler(
///     _auth: RequireApiKey,
///     State(state): State<Arc<AppState>>,
/// ) -> impl IntoResponse {
///     // handler 逻辑...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireApiKey;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        verify_api_key(&parts.headers, state.config.api_key.as_deref())
    }
}

/// 验证 API Key
///
/// expected_key 为 None 时不启用认证，所有请求放行
pub fn verify_api_key(
    headers: &HeaderMap,
    expected_key: Option<&str>,
) -> Result<RequireApiKey, ApiError> {
    let expected = match expected_key {
        Some(key) => key,
        None => return Ok(RequireApiKey),
    };

    let provided_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());

    match provided_key {
        Some(key) if key == expected => Ok(RequireApiKey),
        Some(_) => {
            tracing::warn!("Invalid API key provided");
            Err(ApiError::unauthorized())
        }
        None => {
            tracing::warn!("Missing x-api-key header");
            Err(ApiError::unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_verify_api_key_success() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("test-key"));

        assert!(verify_api_key(&headers, Some("test-key")).is_ok());
    }

    #[test]
    fn test_verify_api_key_wrong_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("wrong-key"));

        assert!(verify_api_key(&headers, Some("test-key")).is_err());
    }

    #[test]
    fn test_verify_api_key_missing() {
        let headers = HeaderMap::new();

        assert!(verify_api_key(&headers, Some("test-key")).is_err());
    }

    #[test]
    fn test_verify_api_key_disabled() {
        // 未配置 key 时放行，带不带 header 都一样
        let headers = HeaderMap::new();
        assert!(verify_api_key(&headers, None).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("anything"));
        assert!(verify_api_key(&headers, None).is_ok());
    }
}
