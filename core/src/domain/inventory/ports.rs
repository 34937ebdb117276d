use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    inventory::{
        consumption::ConsumptionOutcome,
        entities::{BinId, DocumentVersion, InventoryDocument, StoredDocument},
        ranking::RankedInventory,
        value_objects::{
            AddItemsInput, AddItemsOutcome, ConsumeItemsInput, CreateBinInput, CreatedBin,
            GetInventoryInput, GetRankedInventoryInput,
        },
    },
};

/// Remote key-value store holding one inventory document per bin.
#[cfg_attr(test, mockall::automock)]
pub trait InventoryStore: Send + Sync {
    /// `Ok(None)` when the bin does not exist.
    fn read(
        &self,
        bin_id: BinId,
    ) -> impl Future<Output = Result<Option<StoredDocument>, CoreError>> + Send;

    /// Replaces the whole document. When `expected_version` is set and the
    /// store supports versions, a mismatch fails with
    /// [`CoreError::VersionConflict`] and nothing is written.
    fn write(
        &self,
        bin_id: BinId,
        document: InventoryDocument,
        expected_version: Option<DocumentVersion>,
    ) -> impl Future<Output = Result<Option<DocumentVersion>, CoreError>> + Send;

    fn create(
        &self,
        document: InventoryDocument,
    ) -> impl Future<Output = Result<BinId, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait InventoryService: Send + Sync {
    fn get_inventory(
        &self,
        input: GetInventoryInput,
    ) -> impl Future<Output = Result<InventoryDocument, CoreError>> + Send;

    fn create_bin(
        &self,
        input: CreateBinInput,
    ) -> impl Future<Output = Result<CreatedBin, CoreError>> + Send;

    fn add_items(
        &self,
        input: AddItemsInput,
    ) -> impl Future<Output = Result<AddItemsOutcome, CoreError>> + Send;

    fn consume_items(
        &self,
        input: ConsumeItemsInput,
    ) -> impl Future<Output = Result<ConsumptionOutcome, CoreError>> + Send;

    fn get_ranked_inventory(
        &self,
        input: GetRankedInventoryInput,
    ) -> impl Future<Output = Result<RankedInventory, CoreError>> + Send;
}
