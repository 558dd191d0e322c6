//! Analysis backend boundary: dispatcher, Gemini client, prompts, parsing.

pub mod backend;
pub mod dispatcher;
pub mod gemini;
pub mod prompts;
pub mod response_parser;

pub use backend::{AnalysisBackend, AnalysisError, AnalysisRequest};
pub use dispatcher::AnalysisDispatcher;
pub use gemini::GeminiBackend;
