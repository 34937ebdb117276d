use crate::application::http::inventory::validators::AddItemsValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::inventory::ports::InventoryService;
use foogie_core::domain::inventory::value_objects::{AddItemsInput, AddItemsOutcome};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AddItemsResponse {
    pub data: AddItemsOutcome,
}

#[utoipa::path(
    post,
    path = "/{bin_id}/inventory/items",
    tag = "inventory",
    summary = "Add items",
    description = "Appends new batches to the bin. Each valid record becomes its own batch, even when an identical one already exists.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
    responses(
        (status = 200, body = AddItemsResponse)
    ),
    request_body = AddItemsValidator
)]
pub async fn add_items(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AddItemsValidator>,
) -> Result<Response<AddItemsResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let outcome = state
        .service
        .add_items(AddItemsInput {
            bin_id,
            items: payload.items,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AddItemsResponse { data: outcome }))
}
