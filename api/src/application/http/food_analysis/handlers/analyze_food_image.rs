use axum::extract::{Multipart, Path, State};
use bytes::Bytes;
use foogie_core::domain::{
    food_analysis::{
        ports::FoodAnalysisService,
        value_objects::{
            AnalyzeFoodImageInput, DEFAULT_IMAGE_MIME_TYPE, FoodImageAnalysis, MAX_IMAGE_BYTES,
        },
    },
    inventory::entities::BinId,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalyzeFoodImageResponse {
    pub data: FoodImageAnalysis,
}

/// Multipart body of the image analysis endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeFoodImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/image",
    tag = "food-analysis",
    summary = "Scan food from image",
    description = "Detects the food in a photo and adds every valid detection to the bin as a new batch.",
    request_body(content = AnalyzeFoodImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeFoodImageResponse),
        (status = 400, description = "Missing, empty or oversized image"),
        (status = 502, description = "Image understanding service failed")
    ),
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
)]
pub async fn analyze_food_image(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeFoodImageResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let mut image: Option<(Bytes, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_BYTES
            )));
        }

        image = Some((data, mime_type));
    }

    let (image_data, mime_type) =
        image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_image(AnalyzeFoodImageInput {
            bin_id,
            image_data,
            mime_type,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeFoodImageResponse { data: analysis }))
}
