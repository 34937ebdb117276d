use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::value_objects::{AnalyzeFoodImageInput, FoodImageAnalysis},
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait FoodAnalysisService: Send + Sync {
    /// Detects food in a photo and adds every valid detection to the bin.
    fn analyze_image(
        &self,
        input: AnalyzeFoodImageInput,
    ) -> impl Future<Output = Result<FoodImageAnalysis, CoreError>> + Send;
}
