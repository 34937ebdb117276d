use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use foogie_core::domain::inventory::entities::{BinId, InventoryDocument};
use foogie_core::domain::inventory::ports::InventoryService;
use foogie_core::domain::inventory::value_objects::GetInventoryInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetInventoryResponse {
    pub data: InventoryDocument,
}

#[utoipa::path(
    get,
    path = "/{bin_id}/inventory",
    tag = "inventory",
    summary = "Get inventory",
    description = "Returns the stored inventory document of a bin, meal log included. A bin that was never written is empty.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
    responses(
        (status = 200, body = GetInventoryResponse)
    ),
)]
pub async fn get_inventory(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetInventoryResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let document = state
        .service
        .get_inventory(GetInventoryInput { bin_id })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetInventoryResponse { data: document }))
}
