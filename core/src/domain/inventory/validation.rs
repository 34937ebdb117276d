use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::inventory::{
    entities::{InventoryItem, Quantity, Unit, leading_number},
    expiry::ExpiryDate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RejectedItem {
    pub name: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedItems {
    pub accepted: Vec<InventoryItem>,
    pub rejected: Vec<RejectedItem>,
}

/// Checks untrusted item records (scan output or API input) against the
/// batch invariants. One bad record never affects the others.
pub fn validate_scanned(records: Vec<Value>) -> ValidatedItems {
    let mut validated = ValidatedItems::default();

    for record in records {
        match validate_record(record) {
            Ok(item) => validated.accepted.push(item),
            Err(rejected) => {
                tracing::warn!(
                    name = ?rejected.name,
                    reason = %rejected.reason,
                    "Rejected inventory record"
                );
                validated.rejected.push(rejected);
            }
        }
    }

    validated
}

fn validate_record(record: Value) -> Result<InventoryItem, RejectedItem> {
    let Value::Object(mut fields) = record else {
        return Err(RejectedItem {
            name: None,
            reason: "record is not an object".to_string(),
        });
    };

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let reject = |reason: String| RejectedItem {
        name: name.clone(),
        reason,
    };

    if name.is_none() {
        return Err(reject("name is missing or empty".to_string()));
    }

    // scans often report "3" or "200g"; only numbers are stored
    if let Some(text) = fields
        .get("quantity")
        .and_then(Value::as_str)
        .map(str::to_string)
    {
        match leading_number(&text) {
            Some(number) => {
                fields.insert("quantity".to_string(), Value::from(number));
            }
            None => return Err(reject(format!("quantity {text:?} is not a number"))),
        }
    }

    let mut item: InventoryItem = serde_json::from_value(Value::Object(fields))
        .map_err(|e| reject(format!("malformed record: {e}")))?;
    item.name = name.clone().unwrap_or_default();

    match item.quantity {
        Quantity::Amount(amount) if !amount.is_finite() => {
            return Err(reject("quantity is not a finite number".to_string()));
        }
        Quantity::Amount(amount) if amount < 0.0 => {
            return Err(reject(format!("quantity {amount} is negative")));
        }
        Quantity::Amount(amount) if amount == 0.0 => {
            return Err(reject("quantity is zero".to_string()));
        }
        Quantity::Amount(_) => {}
        Quantity::Raw(ref raw) => {
            return Err(reject(format!("quantity {raw} is not a number")));
        }
    }

    if let Some(unit) = &item.unit
        && !unit.is_recognized()
    {
        return Err(reject(format!(
            "unit {:?} is not one of {}",
            unit.as_str(),
            Unit::RECOGNIZED.join(", ")
        )));
    }

    if let Some(expiry) = &item.expected_expiry_date
        && item.expiry() == ExpiryDate::Unknown
    {
        tracing::info!(
            name = %item.name,
            expiry = ?expiry,
            "Accepting record with unreadable expiry, it will sort last"
        );
    }

    Ok(item)
}
