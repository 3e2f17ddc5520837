//! Ollama LLM Gateway implementation

use super::protocol::{ErrorResponse, GenerateRequest, GenerateResponse, TagsResponse};
use async_trait::async_trait;
use panel_application::ports::llm_gateway::{GatewayError, LlmGateway};
use panel_domain::{Model, ModelParams};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for the Ollama server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`
    pub base_url: String,
    /// Upper bound for a single request, generation included
    pub timeout: Duration,
}

impl OllamaConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// LLM Gateway implementation for a local Ollama server
pub struct OllamaLlmGateway {
    client: reqwest::Client,
    config: OllamaConfig,
    model: Model,
}

impl OllamaLlmGateway {
    pub fn new(model: Model, config: OllamaConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "OllamaLlmGateway initialized (url={}, model={}, timeout={:?})",
            config.base_url, model, config.timeout
        );

        Ok(Self {
            client,
            config,
            model,
        })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn transport_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout(self.config.timeout)
        } else if error.is_connect() {
            GatewayError::ModelUnavailable(format!(
                "Cannot reach Ollama at {}: {}",
                self.config.base_url, error
            ))
        } else {
            GatewayError::RequestFailed(error.to_string())
        }
    }

    async fn status_error(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        status_error(status, &body, &self.model)
    }
}

/// Map a non-success HTTP status to a gateway error
fn status_error(status: StatusCode, body: &str, model: &Model) -> GatewayError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::NOT_FOUND => {
            GatewayError::ModelUnavailable(format!("Model '{}' is not installed: {}", model, detail))
        }
        StatusCode::SERVICE_UNAVAILABLE => GatewayError::ModelUnavailable(detail),
        _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}

#[async_trait]
impl LlmGateway for OllamaLlmGateway {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn generate(&self, prompt: &str, params: &ModelParams) -> Result<String, GatewayError> {
        let request = GenerateRequest::new(self.model.as_str(), prompt, params);
        debug!(
            "Ollama generate: model={}, prompt_bytes={}, temperature={}, top_p={}",
            self.model,
            prompt.len(),
            params.temperature,
            params.top_p
        );

        let response = self
            .client
            .post(self.endpoint("/api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::RequestFailed(format!("Malformed Ollama response: {}", e))
            } else {
                self.transport_error(e)
            }
        })?;

        debug!(
            "Ollama generate finished: bytes={}, done={}",
            body.response.len(),
            body.done
        );
        Ok(body.response)
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Malformed Ollama response: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| Model::new(m.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway(base_url: &str, timeout: Duration) -> OllamaLlmGateway {
        let config = OllamaConfig::default()
            .with_base_url(base_url)
            .with_timeout(timeout);
        OllamaLlmGateway::new(Model::new("llama3.2"), config).unwrap()
    }

    // ==================== Status Mapping ====================

    #[test]
    fn test_status_error_not_found_is_unavailable() {
        let err = status_error(
            StatusCode::NOT_FOUND,
            r#"{"error":"model 'llama3.2' not found"}"#,
            &Model::new("llama3.2"),
        );
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_status_error_server_error_is_request_failure() {
        let err = status_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "out of memory",
            &Model::default(),
        );
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m.contains("500") && m.contains("out of memory")));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = gateway("http://localhost:11434/", Duration::from_secs(1));
        assert_eq!(
            gateway.endpoint("/api/generate"),
            "http://localhost:11434/api/generate"
        );
    }

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    // ==================== HTTP Round Trips ====================

    #[tokio::test]
    async fn test_generate_returns_response_text() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2",
                "prompt": "Explain ownership",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "llama3.2",
                "response": "Ownership moves values.",
                "done": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(&mock_server.uri(), Duration::from_secs(5));
        let text = gateway
            .generate("Explain ownership", &ModelParams::default())
            .await
            .unwrap();
        assert_eq!(text, "Ownership moves values.");
    }

    #[tokio::test]
    async fn test_generate_missing_model_is_unavailable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "model 'llama3.2' not found"})),
            )
            .mount(&mock_server)
            .await;

        let gateway = gateway(&mock_server.uri(), Duration::from_secs(5));
        let err = gateway
            .generate("hi", &ModelParams::default())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_generate_server_error_is_request_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
            .mount(&mock_server)
            .await;

        let gateway = gateway(&mock_server.uri(), Duration::from_secs(5));
        let err = gateway
            .generate("hi", &ModelParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(ref m) if m.contains("500")));
    }

    #[tokio::test]
    async fn test_generate_slow_server_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": "late", "done": true}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let gateway = gateway(&mock_server.uri(), Duration::from_millis(200));
        let err = gateway
            .generate("hi", &ModelParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Timeout(d) if d == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let gateway = gateway(&format!("http://{}", addr), Duration::from_secs(2));

        let err = gateway
            .generate("hi", &ModelParams::default())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_available_models() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "llama3.2:latest"}, {"name": "mistral:7b"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway(&mock_server.uri(), Duration::from_secs(5));
        let models = gateway.available_models().await.unwrap();
        assert_eq!(
            models,
            vec![Model::new("llama3.2:latest"), Model::new("mistral:7b")]
        );
    }
}
