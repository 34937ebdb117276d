use crate::application::http::inventory::validators::RankedInventoryParams;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, Query, State};
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::inventory::ports::InventoryService;
use foogie_core::domain::inventory::ranking::RankedInventory;
use foogie_core::domain::inventory::value_objects::GetRankedInventoryInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetRankedInventoryResponse {
    pub data: RankedInventory,
}

#[utoipa::path(
    get,
    path = "/{bin_id}/inventory/ranked",
    tag = "inventory",
    summary = "Get ranked inventory",
    description = "Lists every batch by expiry, most urgent first, with an urgency level and the nutrition totals of the bin.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
        RankedInventoryParams,
    ),
    responses(
        (status = 200, body = GetRankedInventoryResponse)
    ),
)]
pub async fn get_ranked_inventory(
    Path(bin_id): Path<String>,
    Query(params): Query<RankedInventoryParams>,
    State(state): State<AppState>,
) -> Result<Response<GetRankedInventoryResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let ranked = state
        .service
        .get_ranked_inventory(GetRankedInventoryInput {
            bin_id,
            today: params.as_of,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRankedInventoryResponse { data: ranked }))
}
