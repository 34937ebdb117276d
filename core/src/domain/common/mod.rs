use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;

#[derive(Clone, Debug)]
pub struct FoogieConfig {
    pub store: StoreConfig,
    pub llm: LLMConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    JsonBin,
    Memory,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub base_url: String,
    pub master_key: String,
    pub private_bins: bool,
    pub request_timeout: Duration,
    pub max_conflict_retries: u32,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
