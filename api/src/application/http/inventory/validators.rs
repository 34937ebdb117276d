use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBinValidator {
    #[serde(default)]
    #[validate(length(max = 500, message = "at most 500 items per request"))]
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddItemsValidator {
    #[validate(length(
        min = 1,
        max = 500,
        message = "items must contain between 1 and 500 records"
    ))]
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
}

/// `{"items": {"apple": 5, "milk": 1}}`
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ConsumeItemsValidator {
    #[validate(length(min = 1, message = "at least one item must be consumed"))]
    #[schema(value_type = Object, example = json!({"apple": 5}))]
    pub items: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RankedInventoryParams {
    /// Date to rank against, `YYYY-MM-DD`. Defaults to today (UTC).
    #[schema(example = "2025-11-10")]
    pub as_of: Option<NaiveDate>,
}
