//! Language model service
//!
//! The bot only ever needs "prompt in, free text out". Everything that talks
//! to a model goes through the [`LanguageModel`] trait so the router can be
//! driven by a scripted model in tests.

use crate::Result;
use async_trait::async_trait;

pub mod gemini;
pub mod retry;

pub use gemini::GeminiClient;
pub use retry::{RetryPolicy, RetryingModel};

/// Trait for text completion (LLM controlled)
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: LanguageModel + ?Sized> LanguageModel for Box<T> {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::LanguageModel;
    use crate::error::BotError;
    use crate::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays queued replies in order and records every prompt it was given.
    #[derive(Clone, Default)]
    pub struct ScriptedModel {
        replies: Arc<Mutex<VecDeque<Result<String>>>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedModel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(text.to_string()));
            self
        }

        pub fn fail(self, error: BotError) -> Self {
            self.replies.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BotError::ServiceError("script exhausted".to_string())))
        }
    }
}
