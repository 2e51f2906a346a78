mod base;
mod gemini;
mod ollama;
mod openai;

pub(super) use base::HttpClientBase;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;
