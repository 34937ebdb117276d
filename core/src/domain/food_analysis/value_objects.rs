use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::inventory::{
    entities::{BinId, InventoryItem},
    validation::RejectedItem,
};

/// Largest accepted photo, 10 MiB.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct AnalyzeFoodImageInput {
    pub bin_id: BinId,
    pub image_data: Bytes,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodImageAnalysis {
    /// Number of records the model returned.
    pub detected: usize,
    pub added: Vec<InventoryItem>,
    pub rejected: Vec<RejectedItem>,
    pub inventory_size: usize,
}
