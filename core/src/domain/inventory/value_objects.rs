use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::inventory::{
    consumption::ConsumptionRequest,
    entities::{BinId, InventoryItem},
    validation::RejectedItem,
};

#[derive(Debug, Clone)]
pub struct GetInventoryInput {
    pub bin_id: BinId,
}

#[derive(Debug, Clone)]
pub struct CreateBinInput {
    /// Untrusted item records, validated before the bin is created.
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedBin {
    #[schema(value_type = String, example = "6731f0c2acd3cb34a8a6b2c1")]
    pub bin_id: BinId,
    pub inventory: Vec<InventoryItem>,
    pub rejected: Vec<RejectedItem>,
}

#[derive(Debug, Clone)]
pub struct AddItemsInput {
    pub bin_id: BinId,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddItemsOutcome {
    pub added: Vec<InventoryItem>,
    pub rejected: Vec<RejectedItem>,
    pub inventory_size: usize,
}

#[derive(Debug, Clone)]
pub struct ConsumeItemsInput {
    pub bin_id: BinId,
    pub requests: Vec<ConsumptionRequest>,
}

#[derive(Debug, Clone)]
pub struct GetRankedInventoryInput {
    pub bin_id: BinId,
    /// Defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}
