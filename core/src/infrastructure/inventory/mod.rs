pub mod jsonbin;
pub mod memory;

use crate::domain::{
    common::{StoreBackend, StoreConfig, entities::app_errors::CoreError},
    inventory::{
        entities::{BinId, DocumentVersion, InventoryDocument, StoredDocument},
        ports::InventoryStore,
    },
};

pub use jsonbin::JsonBinInventoryStore;
pub use memory::InMemoryInventoryStore;

/// Store selected at startup from [`StoreConfig::backend`].
#[derive(Debug, Clone)]
pub enum InventoryStoreAdapter {
    JsonBin(JsonBinInventoryStore),
    Memory(InMemoryInventoryStore),
}

impl InventoryStoreAdapter {
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        match config.backend {
            StoreBackend::JsonBin => Ok(Self::JsonBin(JsonBinInventoryStore::new(config)?)),
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory inventory store, data is lost on restart");
                Ok(Self::Memory(InMemoryInventoryStore::new()))
            }
        }
    }
}

impl InventoryStore for InventoryStoreAdapter {
    async fn read(&self, bin_id: BinId) -> Result<Option<StoredDocument>, CoreError> {
        match self {
            Self::JsonBin(store) => store.read(bin_id).await,
            Self::Memory(store) => store.read(bin_id).await,
        }
    }

    async fn write(
        &self,
        bin_id: BinId,
        document: InventoryDocument,
        expected_version: Option<DocumentVersion>,
    ) -> Result<Option<DocumentVersion>, CoreError> {
        match self {
            Self::JsonBin(store) => store.write(bin_id, document, expected_version).await,
            Self::Memory(store) => store.write(bin_id, document, expected_version).await,
        }
    }

    async fn create(&self, document: InventoryDocument) -> Result<BinId, CoreError> {
        match self {
            Self::JsonBin(store) => store.create(document).await,
            Self::Memory(store) => store.create(document).await,
        }
    }
}
