use crate::application::http::inventory::validators::CreateBinValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::State;
use foogie_core::domain::inventory::ports::InventoryService;
use foogie_core::domain::inventory::value_objects::{CreateBinInput, CreatedBin};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateBinResponse {
    pub data: CreatedBin,
}

#[utoipa::path(
    post,
    path = "",
    tag = "inventory",
    summary = "Create bin",
    description = "Creates a new inventory bin holding the valid items of the request. Invalid records are reported, not stored.",
    responses(
        (status = 201, body = CreateBinResponse),
        (status = 503, description = "Inventory store unavailable")
    ),
    request_body = CreateBinValidator
)]
pub async fn create_bin(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateBinValidator>,
) -> Result<Response<CreateBinResponse>, ApiError> {
    let created = state
        .service
        .create_bin(CreateBinInput {
            items: payload.items,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateBinResponse { data: created }))
}
