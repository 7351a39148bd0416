use super::types::{GenerationError, GenerationFuture, GenerationRequest, TextGenerator};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Google Generative Language API client.
///
/// Each submission runs on its own short-lived runtime, so the HTTP client is
/// built per request; pooled connections must not outlive the runtime that
/// owns them.
#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    async fn send(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if self.config.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let url = self.config.endpoint();
        info!(
            "Sending {} ({}, {} base64 bytes) to {}",
            request.file.name,
            request.file.mime_type,
            request.file.data.len(),
            self.config.model
        );

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()?;
        let response = http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_body(&request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Generation response status {}, {} bytes", status, body.len());

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        extract_text(parsed)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: GenerationRequest) -> GenerationFuture<'_> {
        Box::pin(self.send(request))
    }
}

fn build_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text {
                    text: &request.prompt,
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &request.file.mime_type,
                        data: &request.file.data,
                    },
                },
            ],
        }],
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn status_error(status: StatusCode, body: &str) -> GenerationError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok();

    let message = match status.as_u16() {
        400 => "Bad request. The file type may not be supported by the model.".to_string(),
        401 | 403 => "API key rejected. Check GOOGLE_GENERATIVE_AI_API_KEY.".to_string(),
        404 => "Model not found. Check GEMINI_MODEL.".to_string(),
        429 => "Rate limited by the API. Try again later.".to_string(),
        _ => format!("Generation failed with status: {}", status),
    };

    GenerationError::Status {
        status: status.as_u16(),
        message: match detail {
            Some(detail) => format!("{} {}", message, detail),
            None => message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::test_server::TestServer;
    use crate::generate::EncodedFile;

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "Summarise this".to_string(),
            file: EncodedFile::encode("scan.png", "image/png", b"png-bytes"),
        }
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let config = GeminiConfig {
            base_url: "http://localhost:8080/v1beta/".to_string(),
            model: "gemini-test".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn body_carries_prompt_then_inline_file() {
        let request = request();
        let body = serde_json::to_value(build_body(&request)).unwrap();
        let parts = &body["contents"][0]["parts"];

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["text"], "Summarise this");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], request.file.data);
    }

    #[test]
    fn text_parts_of_first_candidate_are_concatenated() {
        let response: GenerateContentResponse = serde_json::from_str(
            r##"{"candidates":[
                {"content":{"parts":[{"text":"# Title\n"},{"text":"body"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"##,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "# Title\nbody");
    }

    #[test]
    fn missing_candidates_are_an_empty_response() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn status_errors_include_the_api_message() {
        let error = status_error(
            StatusCode::FORBIDDEN,
            r#"{"error":{"code":403,"message":"API key not valid."}}"#,
        );
        match error {
            GenerationError::Status { status, message } => {
                assert_eq!(status, 403);
                assert!(message.starts_with("API key rejected."));
                assert!(message.ends_with("API key not valid."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_falls_back_to_generic_message() {
        let error = status_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(
            error.to_string(),
            "Generation failed with status: 502 Bad Gateway (status 502)"
        );
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = GeminiClient::new(GeminiConfig::default());
        let result = client.generate(request()).await;
        assert!(matches!(result, Err(GenerationError::MissingApiKey)));
    }

    #[tokio::test]
    async fn generate_posts_to_the_endpoint_and_parses_the_reply() {
        let server = TestServer::start(r#"{"candidates":[{"content":{"parts":[{"text":"Hello **there**"}]}}]}"#);
        let client = GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: server.base_url(),
            ..GeminiConfig::default()
        });

        let text = client.generate(request()).await.unwrap();
        assert_eq!(text, "Hello **there**");

        let received = server.received();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0].request_line,
            "POST /v1beta/models/gemini-test:generateContent HTTP/1.1"
        );
        assert_eq!(received[0].api_key.as_deref(), Some("test-key"));
        let body: serde_json::Value = serde_json::from_str(&received[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Summarise this");
    }

    #[test]
    fn each_request_runs_on_its_own_runtime() {
        let server = TestServer::start(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#);
        let client = GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: server.base_url(),
            ..GeminiConfig::default()
        });

        for _ in 0..3 {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let text = runtime.block_on(client.generate(request())).unwrap();
            drop(runtime);
            assert_eq!(text, "ok");
        }
        assert_eq!(server.received().len(), 3);
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let config = GeminiConfig {
            api_key: "AIza-secret".to_string(),
            ..GeminiConfig::default()
        };
        assert!(!format!("{:?}", config).contains("AIza-secret"));
    }
}
