//! Completion boundary: client trait, response post-processing, bounded retry.
//!
//! The generator depends on a callable that turns one finalized prompt into
//! raw completion content; this module defines the trait, an OpenAI
//! implementation ([`OpenAiCompletion`]) and a scripted mock
//! ([`MockCompletion`]) for tests.
//!
//! Post-processing never fails: the content is expected to be a JSON object
//! with an `impacts` array of strings, truncated or padded to the requested
//! count; unparseable content is replaced by error placeholders and logged.

mod mock;
mod openai;

pub use mock::MockCompletion;
pub use openai::{OpenAiCompletion, DEFAULT_MODEL};

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::WheelError;

/// Fixed system role instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a futures thinking expert.";

/// Retry policy for transport-level completion failures: attempts and base backoff.
/// Backoff doubles per attempt; exhaustion aborts the run.
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_millis(500);

/// One completion request: system instruction, finalized user prompt,
/// sampling temperature, and the number of impacts the caller expects.
///
/// `count` is advisory for the collaborator (the prompt already names it);
/// the hard guarantee comes from [`parse_impacts`].
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    /// System role instruction.
    pub system: String,
    /// Finalized user prompt (after template rendering and variant bias).
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Requested number of impacts.
    pub count: usize,
}

impl CompletionRequest {
    /// Builds a request with the fixed system instruction.
    pub fn new(prompt: impl Into<String>, temperature: f32, count: usize) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            prompt: prompt.into(),
            temperature,
            count,
        }
    }
}

/// Completion client: given a finalized prompt, returns raw content that is
/// expected (but not guaranteed) to be a JSON object with an `impacts` array.
///
/// Implementations: [`OpenAiCompletion`] (real API), [`MockCompletion`]
/// (scripted responses for tests). Transport failures are returned as
/// `WheelError::Completion`; content-shape problems are not the client's
/// concern (see [`parse_impacts`]).
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Performs one completion call and returns the raw content string.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, WheelError>;
}

/// Calls the client with bounded retry and exponential backoff.
///
/// Transport failures are retried up to [`MAX_ATTEMPTS`] total attempts;
/// exhaustion propagates the last error and aborts the run. Content is never
/// inspected here, so a syntactically broken response is not retried.
pub(crate) async fn complete_with_retry(
    client: &dyn CompletionClient,
    request: &CompletionRequest,
) -> Result<String, WheelError> {
    let mut backoff = BACKOFF_BASE;
    let mut last_err = WheelError::Completion("no completion attempt made".to_string());
    for attempt in 1..=MAX_ATTEMPTS {
        match client.complete(request).await {
            Ok(content) => return Ok(content),
            Err(e) => {
                warn!(attempt, error = %e, "completion attempt failed");
                last_err = e;
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
    Err(last_err)
}

/// Post-processes raw completion content into exactly `count` impact strings.
///
/// - Parseable `{"impacts": [...strings]}`: truncated to `count` when longer;
///   padded with `"Impact {n} for {branch_text}"` (1-based) when shorter.
/// - Anything else (malformed JSON, missing key, non-array value): replaced
///   by `"Error generating impact {n}"` placeholders; the failure is logged
///   and generation continues.
pub fn parse_impacts(content: &str, count: usize, branch_text: &str) -> Vec<String> {
    match extract_impacts(content) {
        Some(mut impacts) => {
            if impacts.len() > count {
                impacts.truncate(count);
            } else if impacts.len() < count {
                let have = impacts.len();
                impacts
                    .extend((have..count).map(|i| format!("Impact {} for {}", i + 1, branch_text)));
            }
            impacts
        }
        None => {
            warn!(content, "unparseable completion response, substituting placeholders");
            (0..count)
                .map(|i| format!("Error generating impact {}", i + 1))
                .collect()
        }
    }
}

/// Extracts the `impacts` string array from a JSON object; `None` when the
/// content is not the expected shape. Non-string entries are skipped.
fn extract_impacts(content: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let impacts = value.get("impacts")?.as_array()?;
    Some(
        impacts
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}
