use crate::{
    domain::common::{FoogieConfig, services::Service},
    infrastructure::{inventory::InventoryStoreAdapter, llm::GeminiLLMClient},
};

pub type FoogieService = Service<InventoryStoreAdapter, GeminiLLMClient>;

pub fn create_service(config: FoogieConfig) -> Result<FoogieService, anyhow::Error> {
    let inventory_store = InventoryStoreAdapter::from_config(&config.store)?;
    let llm_client = GeminiLLMClient::new(&config.llm)?;

    Ok(Service::new(
        inventory_store,
        llm_client,
        config.store.max_conflict_retries,
    ))
}
