use crate::application::http::inventory::validators::ConsumeItemsValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use foogie_core::domain::inventory::consumption::{ConsumptionOutcome, ConsumptionRequest};
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::inventory::ports::InventoryService;
use foogie_core::domain::inventory::value_objects::ConsumeItemsInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConsumeItemsResponse {
    pub data: ConsumptionOutcome,
}

#[utoipa::path(
    post,
    path = "/{bin_id}/inventory/consume",
    tag = "inventory",
    summary = "Consume items",
    description = "Takes the requested amounts out of the bin, earliest expiry first. Amounts that could not be covered are reported as shortfalls.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
    responses(
        (status = 200, body = ConsumeItemsResponse),
        (status = 409, description = "Inventory changed concurrently")
    ),
    request_body = ConsumeItemsValidator
)]
pub async fn consume_items(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ConsumeItemsValidator>,
) -> Result<Response<ConsumeItemsResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let requests = payload
        .items
        .into_iter()
        .map(|(name, amount)| ConsumptionRequest::new(name, amount))
        .collect();

    let outcome = state
        .service
        .consume_items(ConsumeItemsInput { bin_id, requests })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ConsumeItemsResponse { data: outcome }))
}
