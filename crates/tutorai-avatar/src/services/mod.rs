//! Provider implementations

pub mod gemini;

// Re-exports
pub use gemini::GeminiProvider;
