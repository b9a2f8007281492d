use super::GenerationService;
use crate::models::GenerationRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Outcome queued on a [`MockGenerationClient`].
#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(String),
    Failure(String),
}

#[derive(Clone)]
pub struct MockGenerationClient {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Reply(response.into()));
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Failure(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        *self.last_request.lock().unwrap() = Some(request.clone());

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default mock response
            return Ok(format!("Mock reply to '{}'", request.prompt));
        }

        let index = (*count - 1) % outcomes.len();
        match &outcomes[index] {
            MockOutcome::Reply(response) => Ok(response.clone()),
            MockOutcome::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_reply_echoes_prompt() {
        let client = MockGenerationClient::new();

        let reply = client
            .generate(&GenerationRequest::text("floating apples"))
            .await
            .unwrap();
        assert!(reply.contains("floating apples"));
    }

    #[tokio::test]
    async fn test_mock_cycles_queued_responses() {
        let client = MockGenerationClient::new()
            .with_response("first")
            .with_response("second");

        let request = GenerationRequest::text("hi");
        assert_eq!(client.generate(&request).await.unwrap(), "first");
        assert_eq!(client.generate(&request).await.unwrap(), "second");

        // Should cycle back
        assert_eq!(client.generate(&request).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_failure_and_call_count() {
        let client = MockGenerationClient::new().with_failure("boom");
        assert_eq!(client.get_call_count(), 0);

        let err = client
            .generate(&GenerationRequest::text("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_last_request() {
        let client = MockGenerationClient::new();
        client
            .generate(&GenerationRequest::text("remember me"))
            .await
            .unwrap();

        assert_eq!(client.last_request().unwrap().prompt, "remember me");
    }
}
