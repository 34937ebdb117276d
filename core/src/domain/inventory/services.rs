use chrono::Utc;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::LLMClient,
    inventory::{
        consumption::{ConsumptionOutcome, consume},
        entities::{BinId, InventoryDocument, InventoryItem},
        merge::merge,
        ports::{InventoryService, InventoryStore},
        ranking::{RankedInventory, ranked_inventory},
        validation::{ValidatedItems, validate_scanned},
        value_objects::{
            AddItemsInput, AddItemsOutcome, ConsumeItemsInput, CreateBinInput, CreatedBin,
            GetInventoryInput, GetRankedInventoryInput,
        },
    },
};

/// Result of one pass of a read-modify-write cycle.
pub(crate) struct BinUpdate<T> {
    /// New document to store; `None` leaves the bin untouched.
    pub write: Option<InventoryDocument>,
    pub output: T,
}

impl<S, LLM> Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    /// The bin's document; a bin that was never written is empty.
    pub(crate) async fn load_document(&self, bin_id: &BinId) -> Result<InventoryDocument, CoreError> {
        let stored = self.inventory_store.read(bin_id.clone()).await?;
        Ok(stored.map(|stored| stored.document).unwrap_or_default())
    }

    pub(crate) async fn load_inventory(
        &self,
        bin_id: &BinId,
    ) -> Result<Vec<InventoryItem>, CoreError> {
        Ok(self.load_document(bin_id).await?.inventory)
    }

    /// Reads the bin, applies `mutate` and writes the result back.
    ///
    /// The whole cycle is repeated when a versioned write is rejected with
    /// [`CoreError::VersionConflict`], at most `max_conflict_retries` times.
    /// Any other error is returned as is, without retrying. `mutate` sees
    /// `None` for a bin that has never been written.
    pub(crate) async fn mutate_bin<T, F>(
        &self,
        bin_id: &BinId,
        mut mutate: F,
    ) -> Result<T, CoreError>
    where
        T: Send,
        F: FnMut(Option<InventoryDocument>) -> Result<BinUpdate<T>, CoreError> + Send,
    {
        let mut conflicts = 0;

        loop {
            let (existing, version) = match self.inventory_store.read(bin_id.clone()).await? {
                Some(stored) => (Some(stored.document), stored.version),
                None => (None, None),
            };

            let update = mutate(existing)?;
            let Some(document) = update.write else {
                return Ok(update.output);
            };

            let size = document.inventory.len();
            match self
                .inventory_store
                .write(bin_id.clone(), document, version)
                .await
            {
                Ok(_) => {
                    tracing::info!(bin_id = %bin_id, inventory_size = size, "Inventory written");
                    return Ok(update.output);
                }
                Err(CoreError::VersionConflict) if conflicts < self.max_conflict_retries => {
                    conflicts += 1;
                    tracing::warn!(
                        bin_id = %bin_id,
                        attempt = conflicts,
                        "Inventory changed while updating, retrying"
                    );
                }
                Err(e) => {
                    tracing::error!(bin_id = %bin_id, "Failed to write inventory: {}", e);
                    return Err(e);
                }
            }
        }
    }

    /// Appends already validated batches to a bin. Nothing is written when
    /// every record was rejected.
    pub(crate) async fn merge_into_bin(
        &self,
        bin_id: &BinId,
        validated: ValidatedItems,
    ) -> Result<AddItemsOutcome, CoreError> {
        self.mutate_bin(bin_id, |existing| {
            let outcome = |inventory_size| AddItemsOutcome {
                added: validated.accepted.clone(),
                rejected: validated.rejected.clone(),
                inventory_size,
            };

            if validated.accepted.is_empty() {
                let size = existing.as_ref().map_or(0, |document| document.inventory.len());
                return Ok(BinUpdate {
                    write: None,
                    output: outcome(size),
                });
            }

            let mut document = existing.unwrap_or_default();
            let current = std::mem::take(&mut document.inventory);
            document.inventory = merge(Some(current), validated.accepted.clone());

            Ok(BinUpdate {
                output: outcome(document.inventory.len()),
                write: Some(document),
            })
        })
        .await
    }
}

impl<S, LLM> InventoryService for Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    async fn get_inventory(&self, input: GetInventoryInput) -> Result<InventoryDocument, CoreError> {
        self.load_document(&input.bin_id).await
    }

    async fn create_bin(&self, input: CreateBinInput) -> Result<CreatedBin, CoreError> {
        let validated = validate_scanned(input.items);

        let bin_id = self
            .inventory_store
            .create(InventoryDocument::new(validated.accepted.clone()))
            .await?;

        tracing::info!(
            bin_id = %bin_id,
            accepted = validated.accepted.len(),
            rejected = validated.rejected.len(),
            "Inventory bin created"
        );

        Ok(CreatedBin {
            bin_id,
            inventory: validated.accepted,
            rejected: validated.rejected,
        })
    }

    async fn add_items(&self, input: AddItemsInput) -> Result<AddItemsOutcome, CoreError> {
        let validated = validate_scanned(input.items);
        self.merge_into_bin(&input.bin_id, validated).await
    }

    async fn consume_items(&self, input: ConsumeItemsInput) -> Result<ConsumptionOutcome, CoreError> {
        self.mutate_bin(&input.bin_id, |existing| {
            let mut document = existing.unwrap_or_default();
            let outcome = consume(std::mem::take(&mut document.inventory), &input.requests);

            if !outcome.shortfalls.is_empty() {
                tracing::info!(
                    bin_id = %input.bin_id,
                    shortfalls = ?outcome.shortfalls,
                    "Consumption exceeded available inventory"
                );
            }

            let write = outcome.changed.then(|| {
                document.inventory = outcome.inventory.clone();
                document
            });

            Ok(BinUpdate {
                write,
                output: outcome,
            })
        })
        .await
    }

    async fn get_ranked_inventory(
        &self,
        input: GetRankedInventoryInput,
    ) -> Result<RankedInventory, CoreError> {
        let inventory = self.load_inventory(&input.bin_id).await?;
        let today = input.today.unwrap_or_else(|| Utc::now().date_naive());

        Ok(ranked_inventory(&inventory, today))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::testing::{StubLLMClient, memory_service},
        inventory::{
            consumption::ConsumptionRequest,
            entities::{DocumentVersion, FoodType, Nutrition, Quantity, StoredDocument, Unit},
            ranking::UrgencyLevel,
        },
        meal_log::entities::MealLogEntry,
    };
    use crate::infrastructure::inventory::memory::InMemoryInventoryStore;

    fn bin() -> BinId {
        BinId::parse("kitchen").unwrap()
    }

    async fn seeded(items: Vec<InventoryItem>) -> Service<InMemoryInventoryStore, StubLLMClient> {
        let service = memory_service();
        service
            .inventory_store
            .write(bin(), InventoryDocument::new(items), None)
            .await
            .unwrap();
        service
    }

    fn apple(quantity: f64, expiry: &str) -> InventoryItem {
        InventoryItem::new("apple", FoodType::Fruit, quantity, Unit::Items, expiry)
    }

    #[tokio::test]
    async fn test_missing_bin_reads_as_empty() {
        let service = memory_service();

        let document = service
            .get_inventory(GetInventoryInput { bin_id: bin() })
            .await
            .unwrap();

        assert!(document.inventory.is_empty());
    }

    #[tokio::test]
    async fn test_add_items_merges_and_reports_rejections() {
        let service = seeded(vec![apple(3.0, "15/11/2025")]).await;

        let outcome = service
            .add_items(AddItemsInput {
                bin_id: bin(),
                items: vec![
                    json!({ "name": "apple", "type": "fruit", "quantity": 3, "unit": "items", "expected_expiry_date": "15/11/2025" }),
                    json!({ "name": "soup", "quantity": 1, "unit": "bowls" }),
                ],
            })
            .await
            .unwrap();

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.inventory_size, 2);

        let document = service
            .get_inventory(GetInventoryInput { bin_id: bin() })
            .await
            .unwrap();
        assert_eq!(document.inventory[0], document.inventory[1]);
    }

    #[tokio::test]
    async fn test_add_nothing_valid_leaves_bin_untouched() {
        let service = memory_service();

        let outcome = service
            .add_items(AddItemsInput {
                bin_id: bin(),
                items: vec![json!({ "name": "", "quantity": 1 })],
            })
            .await
            .unwrap();

        assert_eq!(outcome.inventory_size, 0);
        assert!(
            service
                .inventory_store
                .read(bin())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_consume_earliest_expiry_first_and_persists() {
        let service = seeded(vec![
            apple(3.0, "15/11/2025"),
            apple(4.0, "01/12/2025"),
            InventoryItem::new("milk", FoodType::Dairy, 1.0, Unit::Containers, "12/11/2025"),
        ])
        .await;

        let outcome = service
            .consume_items(ConsumeItemsInput {
                bin_id: bin(),
                requests: vec![ConsumptionRequest::new("Apple", 5)],
            })
            .await
            .unwrap();

        assert!(outcome.shortfalls.is_empty());
        assert_eq!(outcome.consumed.get("Apple"), Some(&5.0));

        let stored = service
            .get_inventory(GetInventoryInput { bin_id: bin() })
            .await
            .unwrap();
        assert_eq!(stored.inventory.len(), 2);
        assert_eq!(stored.inventory[0].quantity, Quantity::Amount(2.0));
        assert_eq!(stored.inventory[0].expiry_text(), Some("01/12/2025"));
        assert_eq!(stored.inventory[1].name, "milk");
    }

    #[tokio::test]
    async fn test_consume_unknown_name_does_not_write() {
        let service = seeded(vec![apple(3.0, "15/11/2025")]).await;
        let before = service.inventory_store.read(bin()).await.unwrap().unwrap();

        let outcome = service
            .consume_items(ConsumeItemsInput {
                bin_id: bin(),
                requests: vec![ConsumptionRequest::new("durian", 2)],
            })
            .await
            .unwrap();

        assert_eq!(outcome.shortfalls.get("durian"), Some(&2.0));
        let after = service.inventory_store.read(bin()).await.unwrap().unwrap();
        assert_eq!(before.version, after.version);
    }

    #[tokio::test]
    async fn test_ranked_inventory_uses_given_date() {
        let service = seeded(vec![
            apple(1.0, "30/11/2025"),
            InventoryItem::new("lettuce", FoodType::Vegetable, 1.0, Unit::Items, "09/11/2025"),
        ])
        .await;

        let ranked = service
            .get_ranked_inventory(GetRankedInventoryInput {
                bin_id: bin(),
                today: NaiveDate::from_ymd_opt(2025, 11, 10),
            })
            .await
            .unwrap();

        assert_eq!(ranked.items[0].item.name, "lettuce");
        assert_eq!(ranked.items[0].level, UrgencyLevel::High);
        assert_eq!(ranked.items[1].level, UrgencyLevel::Low);
    }

    #[tokio::test]
    async fn test_create_bin_stores_accepted_items() {
        let service = memory_service();

        let created = service
            .create_bin(CreateBinInput {
                items: vec![
                    json!({ "name": "eggs", "type": "protein", "quantity": 12, "unit": "eggs" }),
                    json!({ "name": "eggs", "quantity": -12 }),
                ],
            })
            .await
            .unwrap();

        assert_eq!(created.inventory.len(), 1);
        assert_eq!(created.rejected.len(), 1);

        let document = service
            .get_inventory(GetInventoryInput {
                bin_id: created.bin_id,
            })
            .await
            .unwrap();
        assert_eq!(document.inventory, created.inventory);
    }

    /// Store whose first `conflicts` writes fail with a version conflict.
    #[derive(Clone)]
    struct ConflictingStore {
        inner: InMemoryInventoryStore,
        conflicts: Arc<AtomicU32>,
        writes: Arc<AtomicU32>,
    }

    impl InventoryStore for ConflictingStore {
        async fn read(&self, bin_id: BinId) -> Result<Option<StoredDocument>, CoreError> {
            self.inner.read(bin_id).await
        }

        async fn write(
            &self,
            bin_id: BinId,
            document: InventoryDocument,
            expected_version: Option<DocumentVersion>,
        ) -> Result<Option<DocumentVersion>, CoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self
                .conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(CoreError::VersionConflict);
            }
            self.inner.write(bin_id, document, expected_version).await
        }

        async fn create(&self, document: InventoryDocument) -> Result<BinId, CoreError> {
            self.inner.create(document).await
        }
    }

    fn conflicting(conflicts: u32, retries: u32) -> Service<ConflictingStore, StubLLMClient> {
        Service::new(
            ConflictingStore {
                inner: InMemoryInventoryStore::new(),
                conflicts: Arc::new(AtomicU32::new(conflicts)),
                writes: Arc::new(AtomicU32::new(0)),
            },
            StubLLMClient::default(),
            retries,
        )
    }

    #[tokio::test]
    async fn test_version_conflicts_are_retried() {
        let service = conflicting(2, 3);

        let outcome = service
            .add_items(AddItemsInput {
                bin_id: bin(),
                items: vec![json!({ "name": "pear", "quantity": 2, "unit": "items" })],
            })
            .await
            .unwrap();

        assert_eq!(outcome.inventory_size, 1);
        assert_eq!(service.inventory_store.writes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_version_conflicts_give_up_after_limit() {
        let service = conflicting(10, 2);

        let result = service
            .add_items(AddItemsInput {
                bin_id: bin(),
                items: vec![json!({ "name": "pear", "quantity": 2, "unit": "items" })],
            })
            .await;

        assert_eq!(result, Err(CoreError::VersionConflict));
        assert_eq!(service.inventory_store.writes.load(Ordering::SeqCst), 3);
    }

    /// Store that is reachable for the parts of a cycle not listed as failing.
    #[derive(Clone)]
    struct UnavailableStore {
        inner: InMemoryInventoryStore,
        fail_reads: bool,
        writes: Arc<AtomicU32>,
    }

    impl InventoryStore for UnavailableStore {
        async fn read(&self, bin_id: BinId) -> Result<Option<StoredDocument>, CoreError> {
            if self.fail_reads {
                return Err(CoreError::StoreUnavailable("read timed out".to_string()));
            }
            self.inner.read(bin_id).await
        }

        async fn write(
            &self,
            _bin_id: BinId,
            _document: InventoryDocument,
            _expected_version: Option<DocumentVersion>,
        ) -> Result<Option<DocumentVersion>, CoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(CoreError::StoreUnavailable("write returned 503".to_string()))
        }

        async fn create(&self, _document: InventoryDocument) -> Result<BinId, CoreError> {
            Err(CoreError::StoreUnavailable("create returned 503".to_string()))
        }
    }

    async fn unavailable(fail_reads: bool) -> Service<UnavailableStore, StubLLMClient> {
        let inner = InMemoryInventoryStore::new();
        inner
            .write(bin(), InventoryDocument::new(vec![apple(3.0, "15/11/2025")]), None)
            .await
            .unwrap();

        Service::new(
            UnavailableStore {
                inner,
                fail_reads,
                writes: Arc::new(AtomicU32::new(0)),
            },
            StubLLMClient::default(),
            3,
        )
    }

    #[tokio::test]
    async fn test_failed_read_aborts_before_writing() {
        let service = unavailable(true).await;

        let result = service
            .consume_items(ConsumeItemsInput {
                bin_id: bin(),
                requests: vec![ConsumptionRequest::new("apple", 1)],
            })
            .await;

        assert!(matches!(
            result,
            Err(CoreError::StoreUnavailable(ref message)) if message == "read timed out"
        ));
        assert_eq!(service.inventory_store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_write_is_reported_once_and_not_retried() {
        let service = unavailable(false).await;

        let result = service
            .consume_items(ConsumeItemsInput {
                bin_id: bin(),
                requests: vec![ConsumptionRequest::new("apple", 2)],
            })
            .await;

        assert!(matches!(result, Err(CoreError::StoreUnavailable(_))));
        assert_eq!(service.inventory_store.writes.load(Ordering::SeqCst), 1);

        let stored = service.inventory_store.inner.read(bin()).await.unwrap().unwrap();
        assert_eq!(stored.document.inventory, vec![apple(3.0, "15/11/2025")]);
    }

    #[tokio::test]
    async fn test_failed_create_is_reported() {
        let service = unavailable(false).await;

        let result = service
            .create_bin(CreateBinInput {
                items: vec![json!({ "name": "pear", "quantity": 1 })],
            })
            .await;

        assert!(matches!(result, Err(CoreError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_consume_keeps_meal_log() {
        let service = memory_service();
        let meal = MealLogEntry::new(
            "Apple pie",
            2,
            Nutrition {
                calories: 900,
                ..Default::default()
            },
            NaiveDate::from_ymd_opt(2025, 11, 10),
        );
        service
            .inventory_store
            .write(
                bin(),
                InventoryDocument {
                    inventory: vec![apple(3.0, "15/11/2025")],
                    meal_log: vec![meal.clone()],
                },
                None,
            )
            .await
            .unwrap();

        service
            .consume_items(ConsumeItemsInput {
                bin_id: bin(),
                requests: vec![ConsumptionRequest::new("apple", 1)],
            })
            .await
            .unwrap();

        let document = service
            .get_inventory(GetInventoryInput { bin_id: bin() })
            .await
            .unwrap();
        assert_eq!(document.inventory[0].quantity, Quantity::Amount(2.0));
        assert_eq!(document.meal_log, vec![meal]);
    }

    #[tokio::test]
    async fn test_concurrent_consumers_do_not_lose_updates() {
        let service = Arc::new(seeded(vec![apple(10.0, "15/11/2025")]).await);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .consume_items(ConsumeItemsInput {
                        bin_id: bin(),
                        requests: vec![ConsumptionRequest::new("apple", 1)],
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let document = service
            .get_inventory(GetInventoryInput { bin_id: bin() })
            .await
            .unwrap();
        assert_eq!(document.inventory[0].quantity, Quantity::Amount(6.0));
    }
}
