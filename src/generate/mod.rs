mod gemini;
#[cfg(test)]
pub(crate) mod test_server;
mod types;

pub use gemini::{GeminiClient, GeminiConfig};
pub use types::{EncodedFile, GenerationError, GenerationFuture, GenerationRequest, TextGenerator};
