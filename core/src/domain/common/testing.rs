use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, services::Service},
        food_analysis::ports::LLMClient,
    },
    infrastructure::inventory::memory::InMemoryInventoryStore,
};

#[derive(Debug, Clone)]
pub struct LLMCall {
    pub prompt: String,
    pub mime_type: Option<String>,
    pub response_schema: serde_json::Value,
}

/// LLM double that replays queued replies and records every call.
#[derive(Clone, Default)]
pub struct StubLLMClient {
    replies: Arc<Mutex<VecDeque<Result<String, CoreError>>>>,
    calls: Arc<Mutex<Vec<LLMCall>>>,
}

impl StubLLMClient {
    pub fn with_responses(replies: impl IntoIterator<Item = Result<String, CoreError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<LLMCall> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self, call: LLMCall) -> Result<String, CoreError> {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::ExternalServiceError("no reply queued".to_string())))
    }
}

impl LLMClient for StubLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        _image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.reply(LLMCall {
            prompt,
            mime_type: Some(mime_type),
            response_schema,
        })
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.reply(LLMCall {
            prompt,
            mime_type: None,
            response_schema,
        })
    }
}

pub fn memory_service() -> Service<InMemoryInventoryStore, StubLLMClient> {
    memory_service_with(StubLLMClient::default())
}

pub fn memory_service_with(llm: StubLLMClient) -> Service<InMemoryInventoryStore, StubLLMClient> {
    Service::new(InMemoryInventoryStore::new(), llm, 3)
}
