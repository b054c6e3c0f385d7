//! In-process `CompletionClient` for tests. Replies, failures and delays are
//! keyed by a marker substring of the prompt.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionClient, LlmError};

#[derive(Default)]
pub struct ScriptedClient {
    replies: Vec<(String, String)>,
    failures: Vec<String>,
    delays: Vec<(String, Duration)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(mut self, marker: &str, reply: &str) -> Self {
        self.replies.push((marker.to_string(), reply.to_string()));
        self
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.failures.push(marker.to_string());
        self
    }

    pub fn delaying(mut self, marker: &str, delay: Duration) -> Self {
        self.delays.push((marker.to_string(), delay));
        self
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some((_, delay)) = self.delays.iter().find(|(m, _)| prompt.contains(m.as_str())) {
            tokio::time::sleep(*delay).await;
        }

        if self.failures.iter().any(|m| prompt.contains(m.as_str())) {
            return Err(LlmError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        Ok(self
            .replies
            .iter()
            .find(|(m, _)| prompt.contains(m.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| "generated post".to_string()))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
