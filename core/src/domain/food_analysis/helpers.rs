use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::common::entities::app_errors::CoreError;

static FENCED_JSON: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").ok());

/// Locates the JSON inside a model reply: a fenced ```json block, or the span
/// from the first opening bracket to the last closing one.
pub fn extract_json_payload(raw: &str) -> Option<&str> {
    if let Some(fence) = FENCED_JSON.as_ref()
        && let Some(captures) = fence.captures(raw)
        && let Some(body) = captures.get(1)
    {
        return Some(body.as_str());
    }

    let start = raw.find(['{', '['])?;
    let end = raw.rfind(['}', ']'])?;

    (end > start).then(|| &raw[start..=end])
}

/// Turns a model reply into raw item records, ready for validation.
///
/// Three shapes are understood: `{"items": [...]}`, a bare array, and the
/// older map form `{"apples": {"quantity": 3, ...}}` whose keys are names.
pub fn records_from_response(raw: &str) -> Result<Vec<Value>, CoreError> {
    let payload = extract_json_payload(raw).ok_or_else(|| {
        tracing::error!("LLM response contains no JSON");
        CoreError::ExternalServiceError("LLM response contains no JSON".to_string())
    })?;

    let parsed: Value = serde_json::from_str(payload).map_err(|e| {
        tracing::error!("Failed to parse LLM response: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(mut fields) => match fields.remove("items") {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err(CoreError::ExternalServiceError(
                "Invalid items format in LLM response".to_string(),
            )),
            None => Ok(records_from_named_map(fields)),
        },
        _ => Err(CoreError::ExternalServiceError(
            "LLM response is not an object or array".to_string(),
        )),
    }
}

fn records_from_named_map(fields: Map<String, Value>) -> Vec<Value> {
    fields
        .into_iter()
        .map(|(name, value)| {
            let mut record = match value {
                Value::Object(record) => record,
                _ => Map::new(),
            };
            record.entry("name").or_insert(Value::String(name));
            Value::Object(record)
        })
        .collect()
}
