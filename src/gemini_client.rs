use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::config::Config;

/// Persona sent as the system instruction with every request.
pub const COMPANY_CONTEXT: &str = "
You are Lumina, the AI assistant for Lumina Solutions.
Lumina Solutions is a premium technology consulting firm specializing in:
1. Generative AI Strategy (custom LLMs, RAG systems, AI workflow automation).
2. Cloud Infrastructure (AWS/Azure/GCP, Kubernetes, Serverless).
3. Custom Enterprise Software (React, Node.js, Python, Go).
4. Data Analytics & Business Intelligence.

The company was founded in 2018 by Sarah Jenkins.
We focus on mid-to-large scale digital transformation projects.
Our tone is professional, innovative, and helpful.
Keep your answers concise and always try to steer potential clients toward booking a consultation.
";

pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that request.";
pub const UNAVAILABLE_REPLY: &str =
    "I'm having a bit of trouble connecting to my brain right now. Please try again in a moment!";

pub const SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.7,
    top_p: 0.8,
    top_k: 40,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

/// Speaker of a turn, named the way the provider names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Everything a provider needs for one round trip.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_instruction: &'static str,
    pub contents: Vec<Turn>,
    pub sampling: SamplingConfig,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Runs one request/response round trip and returns the raw text output.
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    EmptyOutput,
    Unavailable,
}

impl FallbackReason {
    pub fn message(&self) -> &'static str {
        match self {
            FallbackReason::EmptyOutput => EMPTY_REPLY,
            FallbackReason::Unavailable => UNAVAILABLE_REPLY,
        }
    }
}

/// Outcome of an assistant call. Always carries text the visitor can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    Fallback(FallbackReason),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Answer(text) => text,
            Reply::Fallback(reason) => reason.message(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback(_))
    }
}

pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, api_key: &str) -> Result<Url, AssistantError> {
        let url = Url::parse_with_params(
            &format!("{}/models/{}:generateContent", self.api_base, self.model),
            &[("key", api_key)],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;
        let url = self.endpoint(api_key)?;
        let request_body = request_body(request);

        debug!(
            "Sending request to Gemini API: {}",
            serde_json::to_string_pretty(&request_body).unwrap_or_default()
        );

        let response = self.client.post(url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await?;
        debug!(
            "Received response from Gemini API: {}",
            serde_json::to_string_pretty(&response_json).unwrap_or_default()
        );

        extract_text(&response_json)
    }
}

/// Builds the `generateContent` body.
pub fn request_body(request: &CompletionRequest) -> Value {
    let contents = request
        .contents
        .iter()
        .map(|turn| {
            json!({
                "role": turn.role.as_str(),
                "parts": [{ "text": turn.content }]
            })
        })
        .collect::<Vec<_>>();

    json!({
        "contents": contents,
        "systemInstruction": {
            "parts": [{ "text": request.system_instruction }]
        },
        "generationConfig": request.sampling,
    })
}

/// Concatenates the text parts of the first candidate.
///
/// A blocked prompt or a candidate without parts is an empty answer, not an error.
pub fn extract_text(response: &Value) -> Result<String, AssistantError> {
    let Some(candidates) = response.get("candidates").and_then(Value::as_array) else {
        if let Some(reason) = response.pointer("/promptFeedback/blockReason") {
            info!("Prompt blocked by provider: {}", reason);
            return Ok(String::new());
        }
        return Err(AssistantError::Malformed("missing candidates".to_string()));
    };

    let Some(first_candidate) = candidates.first() else {
        return Ok(String::new());
    };

    let text = first_candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

/// Boundary between the chat panel and the provider. Never returns an error.
pub struct AssistantClient {
    provider: Box<dyn CompletionProvider>,
}

impl AssistantClient {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(GeminiClient::new(config)))
    }

    /// Sends `history` followed by `message` with the persona and sampling settings.
    pub async fn chat(&self, message: &str, history: &[Turn]) -> Reply {
        let mut contents = history.to_vec();
        contents.push(Turn::new(Role::User, message));

        let request = CompletionRequest {
            system_instruction: COMPANY_CONTEXT,
            contents,
            sampling: SAMPLING,
        };

        match self.provider.generate(&request).await {
            Ok(text) if text.trim().is_empty() => Reply::Fallback(FallbackReason::EmptyOutput),
            Ok(text) => Reply::Answer(text),
            Err(e) => {
                error!("Gemini chat error: {}", e);
                Reply::Fallback(FallbackReason::Unavailable)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays canned results and records every request it sees.
    pub(crate) struct ScriptedProvider {
        pub replies: Mutex<Vec<Result<String, AssistantError>>>,
        pub seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(replies: Vec<Result<String, AssistantError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn generate(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
            self.seen.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Ok(format!("echo: {}", request.contents.last().unwrap().content));
            }
            replies.remove(0)
        }
    }

    /// Fails every call, like a client built without credentials.
    pub(crate) struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn generate(&self, _request: &CompletionRequest) -> Result<String, AssistantError> {
            Err(AssistantError::Malformed("offline".to_string()))
        }
    }

    fn offline_config() -> Config {
        Config {
            api_key: None,
            model: "gemini-test".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        }
    }

    #[tokio::test]
    async fn test_chat_appends_message_after_history() {
        let provider = std::sync::Arc::new(ScriptedProvider::new(vec![Ok("We support all three.".to_string())]));
        let client = AssistantClient::new(Box::new(SharedProvider(provider.clone())));

        let history = vec![
            Turn::new(Role::Model, "Hello!"),
            Turn::new(Role::User, "Hi"),
            Turn::new(Role::Model, "How can I help?"),
        ];
        let reply = client.chat("Which clouds?", &history).await;

        assert_eq!(reply, Reply::Answer("We support all three.".to_string()));

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.contents.len(), 4);
        assert_eq!(request.contents[3], Turn::new(Role::User, "Which clouds?"));
        assert_eq!(request.contents[0].role, Role::Model);
        assert_eq!(request.system_instruction, COMPANY_CONTEXT);
        assert_eq!(request.sampling, SAMPLING);
    }

    struct SharedProvider(std::sync::Arc<ScriptedProvider>);

    #[async_trait]
    impl CompletionProvider for SharedProvider {
        async fn generate(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
            self.0.generate(request).await
        }
    }

    #[tokio::test]
    async fn test_empty_output_becomes_apology() {
        let client = AssistantClient::new(Box::new(ScriptedProvider::new(vec![Ok("  \n".to_string())])));
        let reply = client.chat("hello", &[]).await;
        assert_eq!(reply, Reply::Fallback(FallbackReason::EmptyOutput));
        assert_eq!(reply.text(), EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_provider_error_becomes_unavailable() {
        let client = AssistantClient::new(Box::new(FailingProvider));
        let reply = client.chat("hello", &[]).await;
        assert!(reply.is_fallback());
        assert_eq!(reply.text(), UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn test_missing_key_never_reaches_network() {
        let gemini = GeminiClient::new(&offline_config());
        let request = CompletionRequest {
            system_instruction: COMPANY_CONTEXT,
            contents: vec![Turn::new(Role::User, "hi")],
            sampling: SAMPLING,
        };
        let err = gemini.generate(&request).await.unwrap_err();
        assert!(matches!(err, AssistantError::MissingApiKey));

        let client = AssistantClient::from_config(&offline_config());
        assert_eq!(client.chat("hi", &[]).await.text(), UNAVAILABLE_REPLY);
    }

    #[test]
    fn test_endpoint_carries_model_and_key() {
        let mut config = offline_config();
        config.api_base = "https://generativelanguage.googleapis.com/v1beta".to_string();
        let gemini = GeminiClient::new(&config);
        let url = gemini.endpoint("secret").unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent?key=secret"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest {
            system_instruction: "persona",
            contents: vec![Turn::new(Role::Model, "greeting"), Turn::new(Role::User, "question")],
            sampling: SAMPLING,
        };
        let body = request_body(&request);

        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "question");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "persona");
        assert_eq!(body["generationConfig"]["topK"], 40);
        let top_p = body["generationConfig"]["topP"].as_f64().unwrap();
        assert!((top_p - 0.8).abs() < 1e-6);
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "there" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_text(&response).unwrap(), "Hello there");
    }

    #[test]
    fn test_extract_text_edge_cases() {
        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(extract_text(&blocked).unwrap(), "");

        let no_parts = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        assert_eq!(extract_text(&no_parts).unwrap(), "");

        let garbage = json!({ "unexpected": true });
        assert!(matches!(extract_text(&garbage), Err(AssistantError::Malformed(_))));
    }

    /// Serves one canned HTTP response on a local port and hands back the raw request.
    async fn serve_once(status: &str, body: &str) -> (Config, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        let config = Config {
            api_key: Some("test-key".to_string()),
            model: "gemini-test".to_string(),
            api_base: format!("http://{}/v1beta", addr),
        };
        (config, handle)
    }

    #[tokio::test]
    async fn test_server_error_status_falls_back_to_unavailable() {
        let (config, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = AssistantClient::from_config(&config);

        let reply = client.chat("hello", &[]).await;
        assert_eq!(reply, Reply::Fallback(FallbackReason::Unavailable));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_empty_parts_fall_back_to_apology() {
        let body = json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "" }] } }]
        })
        .to_string();
        let (config, server) = serve_once("200 OK", &body).await;
        let client = AssistantClient::from_config(&config);

        let reply = client.chat("hello", &[]).await;
        assert_eq!(reply, Reply::Fallback(FallbackReason::EmptyOutput));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_answer_round_trip() {
        let body = json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "hey" }] } }]
        })
        .to_string();
        let (config, server) = serve_once("200 OK", &body).await;
        let client = AssistantClient::from_config(&config);

        let history = vec![Turn::new(Role::Model, "Hello!")];
        let reply = client.chat("hi there", &history).await;
        assert_eq!(reply, Reply::Answer("hey".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent?key=test-key "));
        assert!(request.contains("\"systemInstruction\""));
        assert!(request.contains("hi there"));
    }
}
