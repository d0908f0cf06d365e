//! Mock completion client for tests.
//!
//! Returns scripted content in call order (or one fixed string for every
//! call), records every request for assertions, and can fail the first N
//! calls to exercise the retry path.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::WheelError;
use crate::llm::{CompletionClient, CompletionRequest};

/// Scripted completion client: queued responses consumed in call order, or a
/// fixed response for every call. Records requests so tests can assert the
/// resolved prompts and temperature that reached the boundary.
pub struct MockCompletion {
    responses: Mutex<VecDeque<String>>,
    fixed: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
    fail_remaining: AtomicUsize,
    calls: AtomicUsize,
}

impl MockCompletion {
    /// Creates a mock that pops one scripted response per call; an exhausted
    /// queue is a completion error.
    pub fn from_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            fixed: None,
            requests: Mutex::new(Vec::new()),
            fail_remaining: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that returns the same content on every call.
    pub fn always(content: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fixed: Some(content.into()),
            requests: Mutex::new(Vec::new()),
            fail_remaining: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Makes the first `n` calls fail with a transport-style error (builder).
    pub fn with_failures(self, n: usize) -> Self {
        self.fail_remaining.store(n, Ordering::SeqCst);
        self
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Total calls made, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, WheelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        // Single RMW so concurrent callers never double-consume a failure.
        let failed = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(WheelError::Completion("mock transport failure".to_string()));
        }

        if let Some(ref fixed) = self.fixed {
            return Ok(fixed.clone());
        }
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| WheelError::Completion("mock response queue exhausted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: scripted responses come back in order; exhaustion is an error.
    #[tokio::test]
    async fn scripted_responses_in_order_then_exhausted() {
        let mock = MockCompletion::from_responses(["one", "two"]);
        let req = CompletionRequest::new("p", 0.7, 1);
        assert_eq!(mock.complete(&req).await.unwrap(), "one");
        assert_eq!(mock.complete(&req).await.unwrap(), "two");
        assert!(mock.complete(&req).await.is_err());
        assert_eq!(mock.calls(), 3);
    }

    /// **Scenario**: requests are recorded with prompt and temperature intact.
    #[tokio::test]
    async fn records_requests() {
        let mock = MockCompletion::always("{}");
        let req = CompletionRequest::new("hello prompt", 0.3, 4);
        mock.complete(&req).await.unwrap();
        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "hello prompt");
        assert_eq!(seen[0].temperature, 0.3);
        assert_eq!(seen[0].count, 4);
    }

    /// **Scenario**: with_failures makes exactly the first N calls fail.
    #[tokio::test]
    async fn fails_first_n_calls() {
        let mock = MockCompletion::always("ok").with_failures(1);
        let req = CompletionRequest::new("p", 0.7, 1);
        assert!(mock.complete(&req).await.is_err());
        assert_eq!(mock.complete(&req).await.unwrap(), "ok");
    }

    /// **Scenario**: concurrent callers consume the failure budget exactly
    /// once each; no failure is lost or double-counted.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_consume_failures_exactly() {
        use std::sync::Arc;

        let mock = Arc::new(MockCompletion::always("ok").with_failures(3));
        let req = CompletionRequest::new("p", 0.7, 1);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let mock = Arc::clone(&mock);
            let req = req.clone();
            handles.push(tokio::spawn(async move { mock.complete(&req).await }));
        }
        let mut failures = 0;
        for handle in handles {
            if handle.await.unwrap().is_err() {
                failures += 1;
            }
        }
        assert_eq!(failures, 3);
        assert_eq!(mock.calls(), 8);
    }
}
