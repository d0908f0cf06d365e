//! Wheel generation error types.
//!
//! Used by `WheelGenerator::generate`, prompt resolution, and the export path.
//! Unparseable completion *content* is deliberately not represented here: it is
//! recovered locally with placeholder impacts (see `llm::parse_impacts`).

use thiserror::Error;

/// Error during wheel generation or export.
///
/// Completion transport failures and template configuration errors abort the
/// run; I/O failures while writing artifacts or reading the business
/// description do the same.
#[derive(Debug, Error)]
pub enum WheelError {
    /// Completion call failed (request build, transport, or API error) after retries.
    #[error("completion failed: {0}")]
    Completion(String),

    /// Prompt template could not be rendered (unknown placeholder, stray brace,
    /// or branch count missing for a depth). A configuration error, not recovered.
    #[error("invalid prompt template: {0}")]
    Template(String),

    /// Generator configuration is inconsistent (interactive mode without a
    /// confirmation channel). Caught before any completion call is made.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Tree could not be serialized to JSON.
    #[error("serialize wheel: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading or writing a file failed (output artifacts, business description).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
