use chrono::Utc;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{
        helpers::records_from_response,
        ports::{FoodAnalysisService, LLMClient},
        schema::{build_extraction_prompt, get_inventory_extraction_schema},
        value_objects::{AnalyzeFoodImageInput, FoodImageAnalysis, MAX_IMAGE_BYTES},
    },
    inventory::{ports::InventoryStore, validation::validate_scanned},
};

impl<S, LLM> FoodAnalysisService for Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    async fn analyze_image(
        &self,
        input: AnalyzeFoodImageInput,
    ) -> Result<FoodImageAnalysis, CoreError> {
        if input.image_data.is_empty() {
            return Err(CoreError::Invalid("image is empty".to_string()));
        }
        if input.image_data.len() > MAX_IMAGE_BYTES {
            return Err(CoreError::Invalid(format!(
                "image is larger than {} bytes",
                MAX_IMAGE_BYTES
            )));
        }
        if !input.mime_type.starts_with("image/") {
            return Err(CoreError::Invalid(format!(
                "unsupported content type {}",
                input.mime_type
            )));
        }

        let prompt = build_extraction_prompt(Utc::now().date_naive());

        let raw_response = self
            .llm_client
            .generate_with_image(
                prompt,
                input.image_data.to_vec(),
                input.mime_type,
                get_inventory_extraction_schema(),
            )
            .await?;

        let records = records_from_response(&raw_response)?;
        let detected = records.len();
        let validated = validate_scanned(records);

        tracing::info!(
            bin_id = %input.bin_id,
            detected,
            accepted = validated.accepted.len(),
            "Food detected in image"
        );

        let outcome = self.merge_into_bin(&input.bin_id, validated).await?;

        Ok(FoodImageAnalysis {
            detected,
            added: outcome.added,
            rejected: outcome.rejected,
            inventory_size: outcome.inventory_size,
        })
    }
}
