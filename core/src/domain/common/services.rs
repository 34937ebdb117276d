use crate::domain::{food_analysis::ports::LLMClient, inventory::ports::InventoryStore};

/// Shared service object; every domain service trait is implemented on it.
#[derive(Clone)]
pub struct Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    pub(crate) inventory_store: S,
    pub(crate) llm_client: LLM,
    pub(crate) max_conflict_retries: u32,
}

impl<S, LLM> Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    pub fn new(inventory_store: S, llm_client: LLM, max_conflict_retries: u32) -> Self {
        Self {
            inventory_store,
            llm_client,
            max_conflict_retries,
        }
    }
}
