use base64::Engine;
use std::future::Future;
use std::pin::Pin;

pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;

/// External text-generation capability.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: GenerationRequest) -> GenerationFuture<'_>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub file: EncodedFile,
}

/// File content in transport-safe form.
#[derive(Clone, PartialEq)]
pub struct EncodedFile {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

impl EncodedFile {
    pub fn encode(name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

impl std::fmt::Debug for EncodedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No API key configured; set GOOGLE_GENERATIVE_AI_API_KEY")]
    MissingApiKey,
    #[error("Failed to read {name}: {source}")]
    ReadFile {
        name: String,
        source: std::io::Error,
    },
    #[error("{name} grew past the {limit_mb}MB limit after it was added")]
    FileTooLarge { name: String, limit_mb: f64 },
    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("The model returned no text")]
    EmptyResponse,
    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("Generation worker stopped without reporting a result")]
    WorkerStopped,
}
