use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    inventory::{
        entities::{BinId, DocumentVersion, InventoryDocument, StoredDocument},
        ports::InventoryStore,
    },
};

/// Process-local store with compare-and-swap writes. Used for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryStore {
    bins: Arc<RwLock<HashMap<BinId, (InventoryDocument, DocumentVersion)>>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    #[instrument(skip(self))]
    async fn read(&self, bin_id: BinId) -> Result<Option<StoredDocument>, CoreError> {
        let bins = self.bins.read().await;

        Ok(bins.get(&bin_id).map(|(document, version)| StoredDocument {
            document: document.clone(),
            version: Some(*version),
        }))
    }

    /// `expected_version` must match the current version, `None` meaning
    /// the bin must not exist yet.
    #[instrument(skip(self, document))]
    async fn write(
        &self,
        bin_id: BinId,
        document: InventoryDocument,
        expected_version: Option<DocumentVersion>,
    ) -> Result<Option<DocumentVersion>, CoreError> {
        let mut bins = self.bins.write().await;
        let current = bins.get(&bin_id).map(|(_, version)| *version);

        if current != expected_version {
            tracing::debug!(?current, ?expected_version, "Rejecting stale write");
            return Err(CoreError::VersionConflict);
        }

        let next = DocumentVersion(current.map_or(1, |version| version.0 + 1));
        bins.insert(bin_id, (document, next));

        Ok(Some(next))
    }

    #[instrument(skip(self, document))]
    async fn create(&self, document: InventoryDocument) -> Result<BinId, CoreError> {
        let bin_id = BinId::parse(generate_uuid_v7().simple().to_string())?;
        self.bins
            .write()
            .await
            .insert(bin_id.clone(), (document, DocumentVersion(1)));

        Ok(bin_id)
    }
}
