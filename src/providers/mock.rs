/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock chat provider that simulates different behaviors:
 * - `MockProvider::working()` - Labels every numbered line, alternating two speakers
 * - `MockProvider::fenced()` - Same labels wrapped in a markdown code fence
 * - `MockProvider::garbage()` - Answers with prose instead of JSON
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::openai::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns a JSON label array for every numbered prompt line
    Working,
    /// Returns the label array inside a ```json fence with chatter around it
    Fenced,
    /// Returns text with no JSON array in it
    Garbage,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty completion
    Empty,
}

/// Mock provider for testing speaker annotation
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&ChatRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn fenced() -> Self {
        Self::new(MockBehavior::Fenced)
    }

    pub fn garbage() -> Self {
        Self::new(MockBehavior::Garbage)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&ChatRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Build a label array for every `[i]` line of the last user message,
    /// alternating between "Speaker 1" and "Speaker 2"
    pub fn generate_labels(request: &ChatRequest) -> String {
        let prompt = request.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or("");

        let labels: Vec<String> = prompt
            .lines()
            .filter_map(|line| {
                let rest = line.trim_start().strip_prefix('[')?;
                let (num, _) = rest.split_once(']')?;
                num.parse::<usize>().ok()
            })
            .map(|index| {
                format!(r#"{{"index": {}, "speaker": "Speaker {}"}}"#, index, index % 2 + 1)
            })
            .collect();

        format!("[{}]", labels.join(", "))
    }

    fn respond(request: &ChatRequest, text: String) -> ChatResponse {
        ChatResponse {
            model: request.model.clone(),
            choices: vec![ChatChoice {
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: text,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = ChatRequest;
    type Response = ChatResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        let labels = || match self.custom_response {
            Some(generator) => generator(&request),
            None => Self::generate_labels(&request),
        };

        match self.behavior {
            MockBehavior::Working => Ok(Self::respond(&request, labels())),

            MockBehavior::Fenced => {
                let text = format!("Here are the speakers:\n```json\n{}\n```\nLet me know if you need more.", labels());
                Ok(Self::respond(&request, text))
            }

            MockBehavior::Garbage => Ok(Self::respond(
                &request,
                "I could not tell the speakers apart in this transcript.".to_string(),
            )),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::respond(&request, labels()))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(Self::respond(&request, String::new())),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("mock is offline".to_string())),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}
