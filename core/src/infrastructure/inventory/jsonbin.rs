use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::domain::{
    common::{StoreConfig, entities::app_errors::CoreError},
    inventory::{
        entities::{BinId, DocumentVersion, InventoryDocument, StoredDocument},
        ports::InventoryStore,
    },
};

/// JSONBin.io v3 backend. JSONBin has no conditional writes, so documents
/// carry no version and concurrent writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonBinInventoryStore {
    client: Client,
    base_url: String,
    master_key: String,
    private_bins: bool,
}

#[derive(Debug, Deserialize)]
struct ReadResponse {
    #[serde(default)]
    record: Value,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    metadata: CreateMetadata,
}

#[derive(Debug, Deserialize)]
struct CreateMetadata {
    id: String,
}

impl JsonBinInventoryStore {
    pub fn new(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build JSONBin client: {}", e);
                CoreError::InternalServerError
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        tracing::info!(
            base_url = %base_url,
            private_bins = config.private_bins,
            timeout_secs = config.request_timeout.as_secs(),
            "Initializing JSONBin client"
        );

        Ok(Self {
            client,
            base_url,
            master_key: config.master_key.clone(),
            private_bins: config.private_bins,
        })
    }

    fn bin_url(&self, bin_id: &BinId) -> String {
        format!("{}/{}", self.base_url, bin_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Content-Type", "application/json")
            .header("X-Master-Key", &self.master_key)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response, CoreError> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::error!("JSONBin {} timed out: {}", action, e);
                CoreError::StoreUnavailable(format!("{action} timed out"))
            } else {
                tracing::error!("JSONBin {} failed: {}", action, e);
                CoreError::StoreUnavailable(format!("{action} failed: {e}"))
            }
        })
    }
}

async fn unexpected_status(response: Response, action: &str) -> CoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!("JSONBin {} returned {}: {}", action, status, body);
    CoreError::StoreUnavailable(format!("{action} returned {status}"))
}

/// Turns a stored record into a document. A record without an `inventory`
/// key is an empty inventory.
fn document_from_record(record: Value) -> Result<InventoryDocument, CoreError> {
    if record.is_null() {
        return Ok(InventoryDocument::default());
    }

    serde_json::from_value(record).map_err(|e| {
        tracing::error!("Stored inventory document is malformed: {}", e);
        CoreError::StoreUnavailable(format!("stored document is malformed: {e}"))
    })
}

impl InventoryStore for JsonBinInventoryStore {
    #[instrument(skip(self))]
    async fn read(&self, bin_id: BinId) -> Result<Option<StoredDocument>, CoreError> {
        let request = self.authorized(self.client.get(self.bin_url(&bin_id)));
        let response = self.send(request, "read").await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!("Bin does not exist yet");
                Ok(None)
            }
            status if status.is_success() => {
                let body: ReadResponse = response.json().await.map_err(|e| {
                    tracing::error!("Failed to parse JSONBin read response: {}", e);
                    CoreError::StoreUnavailable(format!("unreadable response: {e}"))
                })?;

                Ok(Some(StoredDocument {
                    document: document_from_record(body.record)?,
                    version: None,
                }))
            }
            _ => Err(unexpected_status(response, "read").await),
        }
    }

    #[instrument(skip(self, document), fields(items = document.inventory.len()))]
    async fn write(
        &self,
        bin_id: BinId,
        document: InventoryDocument,
        _expected_version: Option<DocumentVersion>,
    ) -> Result<Option<DocumentVersion>, CoreError> {
        let request = self
            .authorized(self.client.put(self.bin_url(&bin_id)))
            .json(&document);
        let response = self.send(request, "write").await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CoreError::NotFound),
            status if status.is_success() => Ok(None),
            _ => Err(unexpected_status(response, "write").await),
        }
    }

    #[instrument(skip(self, document), fields(items = document.inventory.len()))]
    async fn create(&self, document: InventoryDocument) -> Result<BinId, CoreError> {
        let request = self
            .authorized(self.client.post(&self.base_url))
            .header("X-Bin-Private", self.private_bins.to_string())
            .json(&document);
        let response = self.send(request, "create").await?;

        if !response.status().is_success() {
            return Err(unexpected_status(response, "create").await);
        }

        let body: CreateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JSONBin create response: {}", e);
            CoreError::StoreUnavailable(format!("unreadable response: {e}"))
        })?;

        BinId::parse(body.metadata.id)
    }
}
