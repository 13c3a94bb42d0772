//! Translation provider boundary: an opaque text-in/text-out remote call.
//!
//! The [`Translator`] trait is the seam the merge engine depends on;
//! [`HttpTranslator`] is the production implementation against a
//! LibreTranslate-compatible JSON endpoint.

use std::future::Future;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::i18n::TranslationValidator;
use crate::retry::{with_retry_if, RetryConfig};

/// A failed translate call. Any variant aborts the current language's merge.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response from translation service: {0}")]
    Response(String),
}

impl TranslateError {
    /// Whether a retry could plausibly succeed: network problems, rate
    /// limiting, and server errors yes; other client errors no.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslateError::Http(_) => true,
            TranslateError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            // A garbled response might be a transient gateway problem
            TranslateError::Response(_) => true,
        }
    }
}

/// The single external capability the merge engine needs.
pub trait Translator {
    /// Translate `text` into the language named by `target_code`.
    fn translate(
        &self,
        text: &str,
        target_code: &str,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// Request body for a LibreTranslate-style `/translate` endpoint.
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// HTTP-backed translation provider.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    source: String,
    retry: RetryConfig,
}

impl HttpTranslator {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.translate_api_url.clone(),
            api_key: config.translate_api_key.clone(),
            source: config.source_language.clone(),
            retry: RetryConfig::api_call(),
        }
    }

    /// Override the retry policy (used by tests to avoid long backoffs).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn request(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let request = TranslateRequest {
            q: text,
            source: &self.source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Status { status, body });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Response(e.to_string()))?;

        Ok(parsed.translated_text)
    }
}

impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, TranslateError> {
        let translated = with_retry_if(
            &self.retry,
            &format!("Translation to {}", target_code),
            || async { self.request(text, target_code).await },
            |e: &TranslateError| e.is_retryable(),
        )
        .await?;

        debug!(
            "Translated \"{}\" to {} as \"{}\"",
            text, target_code, translated
        );

        let report = TranslationValidator::validate(text, &translated);
        if report.has_warnings() {
            warn!(
                "Translation validation warnings for {}: {:?}",
                target_code, report.warnings
            );
        }
        if report.has_errors() {
            warn!(
                "Translation validation errors for {}: {:?}",
                target_code, report.errors
            );
        }

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_translator(endpoint: &str) -> HttpTranslator {
        let config = Config {
            translate_api_url: endpoint.to_string(),
            translate_api_key: None,
            source_language: "en".to_string(),
        };
        HttpTranslator::new(&config)
            .with_retry(RetryConfig::new(3, Duration::from_millis(10)))
    }

    fn translate_response(text: &str) -> serde_json::Value {
        serde_json::json!({ "translatedText": text })
    }

    // ==================== Request / Response Shapes ====================

    #[test]
    fn test_request_serialization_without_api_key() {
        let request = TranslateRequest {
            q: "Hello",
            source: "en",
            target: "fr",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("\"q\":\"Hello\""));
        assert!(json.contains("\"target\":\"fr\""));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_request_serialization_with_api_key() {
        let request = TranslateRequest {
            q: "Hello",
            source: "en",
            target: "de",
            format: "text",
            api_key: Some("secret"),
        };
        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("\"api_key\":\"secret\""));
    }

    // ==================== Error Classification ====================

    #[test]
    fn test_server_error_is_retryable() {
        let error = TranslateError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(error.is_retryable());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let error = TranslateError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".to_string(),
        };
        assert!(error.is_retryable());
    }

    #[test]
    fn test_client_error_is_not_retryable() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
        ] {
            let error = TranslateError::Status {
                status,
                body: String::new(),
            };
            assert!(!error.is_retryable(), "{} should not be retried", status);
        }
    }

    #[test]
    fn test_malformed_response_is_retryable() {
        assert!(TranslateError::Response("not json".to_string()).is_retryable());
    }

    // ==================== HTTP Behavior (wiremock) ====================

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(
                serde_json::json!({"q": "Hello", "source": "en", "target": "fr"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(translate_response("Bonjour")))
            .mount(&server)
            .await;

        let translator = test_translator(&format!("{}/translate", server.uri()));
        let result = translator.translate("Hello", "fr").await.expect("Should succeed");
        assert_eq!(result, "Bonjour");
    }

    #[tokio::test]
    async fn test_translate_retries_on_500_then_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translate_response("Hallo")))
            .mount(&server)
            .await;

        let translator = test_translator(&format!("{}/translate", server.uri()));
        let result = translator.translate("Hello", "de").await;
        assert_eq!(result.expect("Should succeed after retries"), "Hallo");
    }

    #[tokio::test]
    async fn test_translate_no_retry_on_403() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Invalid API key"))
            .expect(1) // no retries
            .mount(&server)
            .await;

        let translator = test_translator(&format!("{}/translate", server.uri()));
        let result = translator.translate("Hello", "es").await;

        match result {
            Err(TranslateError::Status { status, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("Expected status error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_translate_exhausts_retries_on_persistent_500() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("still broken"))
            .expect(3) // api_call preset has 3 attempts
            .mount(&server)
            .await;

        let translator = test_translator(&format!("{}/translate", server.uri()));
        let result = translator.translate("Hello", "it").await;
        assert!(matches!(result, Err(TranslateError::Status { .. })));
    }

    #[tokio::test]
    async fn test_translate_malformed_body_is_response_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let translator = test_translator(&format!("{}/translate", server.uri()));
        let result = translator.translate("Hello", "nl").await;
        assert!(matches!(result, Err(TranslateError::Response(_))));
    }
}
