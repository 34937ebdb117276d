use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::inventory::entities::{InventoryItem, QUANTITY_EPSILON, normalize_name};

/// One `name -> amount` entry of a consumption call. The amount is left as
/// raw JSON: non-numeric and non-positive amounts are skipped, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConsumptionRequest {
    pub name: String,
    #[schema(value_type = f64, example = 5)]
    pub amount: Value,
}

impl ConsumptionRequest {
    pub fn new(name: impl Into<String>, amount: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }

    /// The requested amount, if it is a finite number greater than zero.
    /// Strings must hold nothing but a number: `"2"` is accepted, `"2 apples"`
    /// is not.
    pub fn positive_amount(&self) -> Option<f64> {
        let amount = match &self.amount {
            Value::Number(number) => number.as_f64()?,
            Value::String(text) => text.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        (amount.is_finite() && amount > 0.0).then_some(amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SkippedRequest {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConsumptionOutcome {
    pub inventory: Vec<InventoryItem>,
    /// Requested amounts that could not be satisfied, keyed by requested name.
    pub shortfalls: BTreeMap<String, f64>,
    /// Amounts actually taken from inventory, keyed by requested name.
    pub consumed: BTreeMap<String, f64>,
    pub skipped: Vec<SkippedRequest>,
    /// Whether any batch was reduced or removed.
    #[serde(skip)]
    pub changed: bool,
}

/// Consumes each request from the batches sharing its name, earliest expiry
/// first.
///
/// Batches with an unparseable expiry come last, ties keep list order, and a
/// batch whose quantity is not a positive number is skipped untouched. A
/// batch that reaches zero is dropped. Every other batch, including batches
/// of names that were not requested, keeps its position.
pub fn consume(inventory: Vec<InventoryItem>, requests: &[ConsumptionRequest]) -> ConsumptionOutcome {
    let mut outcome = ConsumptionOutcome {
        inventory,
        ..Default::default()
    };

    for request in requests {
        let key = normalize_name(&request.name);

        if key.is_empty() {
            outcome.skipped.push(SkippedRequest {
                name: request.name.clone(),
                reason: "name is empty".to_string(),
            });
            continue;
        }

        let Some(amount) = request.positive_amount() else {
            tracing::debug!(
                name = %request.name,
                amount = %request.amount,
                "Skipping consumption request without a positive amount"
            );
            outcome.skipped.push(SkippedRequest {
                name: request.name.clone(),
                reason: format!("amount {} is not a positive number", request.amount),
            });
            continue;
        };

        let (taken, shortfall, changed) = consume_one(&mut outcome.inventory, &key, amount);

        if taken > 0.0 {
            *outcome.consumed.entry(request.name.clone()).or_insert(0.0) += taken;
        }
        if shortfall > QUANTITY_EPSILON {
            *outcome.shortfalls.entry(request.name.clone()).or_insert(0.0) += shortfall;
        }
        outcome.changed |= changed;
    }

    outcome
}

/// Returns `(taken, shortfall, changed)` for a single name.
fn consume_one(items: &mut Vec<InventoryItem>, key: &str, amount: f64) -> (f64, f64, bool) {
    let mut matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.matches_name(key))
        .map(|(idx, _)| idx)
        .collect();

    // sort_by_cached_key is stable, so equal expiries keep list order
    matches.sort_by_cached_key(|&idx| items[idx].expiry());

    let mut remaining = amount;
    let mut removed = vec![false; items.len()];
    let mut changed = false;

    for idx in matches {
        if remaining <= QUANTITY_EPSILON {
            break;
        }

        let Some(available) = items[idx].quantity.positive_amount() else {
            tracing::debug!(
                name = %items[idx].name,
                "Skipping batch with a malformed quantity"
            );
            continue;
        };

        changed = true;
        if available + QUANTITY_EPSILON >= remaining {
            let left = available - remaining;
            remaining = 0.0;
            if left > QUANTITY_EPSILON {
                items[idx].reduce_to(left);
            } else {
                removed[idx] = true;
            }
        } else {
            remaining -= available;
            removed[idx] = true;
        }
    }

    if removed.iter().any(|r| *r) {
        let mut flags = removed.into_iter();
        items.retain(|_| !flags.next().unwrap_or(false));
    }

    let shortfall = remaining.max(0.0);
    ((amount - shortfall).max(0.0), shortfall, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::entities::{FoodType, Nutrition, Quantity, Unit};
    use serde_json::json;

    fn batch(name: &str, quantity: f64, expiry: &str) -> InventoryItem {
        InventoryItem::new(name, FoodType::Fruit, quantity, Unit::Items, expiry)
    }

    fn scenario_inventory() -> Vec<InventoryItem> {
        vec![
            batch("apple", 3.0, "15/11/2025"),
            InventoryItem::new("lettuce", FoodType::Vegetable, 1.0, Unit::Items, "02/11/2025"),
            batch("apple", 4.0, "01/12/2025"),
        ]
    }

    #[test]
    fn test_scenario_partial_consumption_across_batches() {
        let outcome = consume(scenario_inventory(), &[ConsumptionRequest::new("apple", 5)]);

        assert_eq!(outcome.inventory.len(), 2);
        assert_eq!(outcome.inventory[0].name, "lettuce");
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(1.0));
        assert_eq!(outcome.inventory[1].name, "apple");
        assert_eq!(outcome.inventory[1].quantity, Quantity::Amount(2.0));
        assert_eq!(
            outcome.inventory[1].expiry_text(),
            Some("01/12/2025")
        );
        assert!(outcome.shortfalls.is_empty());
        assert_eq!(outcome.consumed.get("apple"), Some(&5.0));
        assert!(outcome.changed);
    }

    #[test]
    fn test_scenario_shortfall_when_exhausted() {
        let outcome = consume(scenario_inventory(), &[ConsumptionRequest::new("apple", 10)]);

        assert_eq!(outcome.inventory.len(), 1);
        assert_eq!(outcome.inventory[0].name, "lettuce");
        assert_eq!(outcome.shortfalls.get("apple"), Some(&3.0));
        assert_eq!(outcome.consumed.get("apple"), Some(&7.0));
    }

    #[test]
    fn test_scenario_missing_name_is_all_shortfall() {
        let inventory = scenario_inventory();
        let outcome = consume(inventory.clone(), &[ConsumptionRequest::new("banana", 1)]);

        assert_eq!(outcome.inventory, inventory);
        assert_eq!(outcome.shortfalls.get("banana"), Some(&1.0));
        assert!(outcome.consumed.is_empty());
        assert!(!outcome.changed);
    }

    #[test]
    fn test_amount_within_first_batch_leaves_second_untouched() {
        let inventory = vec![batch("pear", 5.0, "10/11/2025"), batch("pear", 5.0, "20/11/2025")];
        let outcome = consume(inventory.clone(), &[ConsumptionRequest::new("pear", 5)]);

        // exactly q1: first batch gone, second untouched
        assert_eq!(outcome.inventory, vec![inventory[1].clone()]);

        let outcome = consume(inventory.clone(), &[ConsumptionRequest::new("pear", 2)]);
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(3.0));
        assert_eq!(outcome.inventory[1], inventory[1]);
    }

    #[test]
    fn test_list_position_does_not_decide_order() {
        let inventory = vec![batch("egg", 6.0, "30/11/2025"), batch("egg", 6.0, "05/11/2025")];
        let outcome = consume(inventory, &[ConsumptionRequest::new("egg", 8)]);

        assert_eq!(outcome.inventory.len(), 1);
        assert_eq!(
            outcome.inventory[0].expiry_text(),
            Some("30/11/2025")
        );
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(4.0));
    }

    #[test]
    fn test_unparseable_expiry_is_consumed_last() {
        let inventory = vec![batch("yogurt", 2.0, "sometime"), batch("yogurt", 2.0, "20/11/2025")];
        let outcome = consume(inventory, &[ConsumptionRequest::new("yogurt", 3)]);

        assert_eq!(outcome.inventory.len(), 1);
        assert_eq!(
            outcome.inventory[0].expiry_text(),
            Some("sometime")
        );
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(1.0));
    }

    #[test]
    fn test_equal_expiry_ties_keep_list_order() {
        let mut first = batch("apple", 2.0, "15/11/2025");
        first.calories = 1;
        let mut second = batch("apple", 2.0, "15/11/2025");
        second.calories = 2;

        let outcome = consume(vec![first, second.clone()], &[ConsumptionRequest::new("apple", 2)]);

        assert_eq!(outcome.inventory, vec![second]);
    }

    #[test]
    fn test_identical_batches_are_consumed_independently() {
        let twin = batch("kiwi", 2.0, "15/11/2025");
        let outcome = consume(
            vec![twin.clone(), twin.clone(), twin.clone()],
            &[ConsumptionRequest::new("kiwi", 3)],
        );

        assert_eq!(outcome.inventory.len(), 2);
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(1.0));
        assert_eq!(outcome.inventory[1], twin);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_trimmed() {
        let inventory = vec![batch("Apple", 3.0, "15/11/2025")];
        let outcome = consume(inventory, &[ConsumptionRequest::new("  APPLE ", 1)]);

        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(2.0));
        assert_eq!(outcome.consumed.get("  APPLE "), Some(&1.0));
    }

    #[test]
    fn test_type_is_not_part_of_the_match() {
        let mut dairy_apple = batch("apple", 1.0, "10/11/2025");
        dairy_apple.food_type = FoodType::Dairy;
        let outcome = consume(
            vec![dairy_apple, batch("apple", 1.0, "11/11/2025")],
            &[ConsumptionRequest::new("apple", 2)],
        );

        assert!(outcome.inventory.is_empty());
    }

    #[test]
    fn test_invalid_amounts_are_skipped_not_shortfalls() {
        let inventory = scenario_inventory();
        let outcome = consume(
            inventory.clone(),
            &[
                ConsumptionRequest::new("apple", 0),
                ConsumptionRequest::new("apple", -2),
                ConsumptionRequest::new("apple", "lots"),
                ConsumptionRequest::new("apple", json!(null)),
                ConsumptionRequest::new("", 1),
            ],
        );

        assert_eq!(outcome.inventory, inventory);
        assert!(outcome.shortfalls.is_empty());
        assert_eq!(outcome.skipped.len(), 5);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_numeric_string_amounts_are_accepted() {
        let outcome = consume(scenario_inventory(), &[ConsumptionRequest::new("lettuce", "1")]);
        assert_eq!(outcome.inventory.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_amounts_with_trailing_text_are_skipped() {
        let inventory = scenario_inventory();
        let outcome = consume(
            inventory.clone(),
            &[
                ConsumptionRequest::new("apple", "5abc"),
                ConsumptionRequest::new("apple", "5 apples"),
            ],
        );

        assert_eq!(outcome.inventory, inventory);
        assert_eq!(outcome.skipped.len(), 2);
        assert!(outcome.consumed.is_empty());
        assert!(!outcome.changed);
    }

    #[test]
    fn test_malformed_batch_quantity_is_left_untouched() {
        let mut broken = batch("rice", 0.0, "01/11/2025");
        broken.quantity = Quantity::Raw(json!("a bag"));
        let mut negative = batch("rice", 0.0, "02/11/2025");
        negative.quantity = Quantity::Amount(-4.0);
        let good = batch("rice", 500.0, "20/11/2025");

        let outcome = consume(
            vec![broken.clone(), negative.clone(), good],
            &[ConsumptionRequest::new("rice", 600)],
        );

        assert_eq!(outcome.inventory, vec![broken, negative]);
        assert_eq!(outcome.shortfalls.get("rice"), Some(&100.0));
    }

    #[test]
    fn test_unmatched_batches_keep_position() {
        let inventory = vec![
            batch("banana", 1.0, "01/11/2025"),
            batch("apple", 1.0, "15/11/2025"),
            batch("cherry", 1.0, "03/11/2025"),
        ];
        let outcome = consume(inventory.clone(), &[ConsumptionRequest::new("apple", 1)]);

        assert_eq!(outcome.inventory, vec![inventory[0].clone(), inventory[2].clone()]);
    }

    #[test]
    fn test_several_names_in_one_call() {
        let outcome = consume(
            scenario_inventory(),
            &[
                ConsumptionRequest::new("apple", 3),
                ConsumptionRequest::new("lettuce", 2),
            ],
        );

        assert_eq!(outcome.inventory.len(), 1);
        assert_eq!(outcome.inventory[0].quantity, Quantity::Amount(4.0));
        assert_eq!(outcome.shortfalls.get("lettuce"), Some(&1.0));
    }

    #[test]
    fn test_fractional_gram_amounts() {
        let mut cheese = batch("cheese", 0.3, "20/11/2025");
        cheese.unit = Some(Unit::Grams);
        let outcome = consume(
            vec![cheese],
            &[ConsumptionRequest::new("cheese", 0.1), ConsumptionRequest::new("cheese", 0.2)],
        );

        assert!(outcome.inventory.is_empty());
        assert!(outcome.shortfalls.is_empty());
    }

    #[test]
    fn test_no_surviving_batch_is_non_positive() {
        let inventory = vec![
            batch("apple", 1.5, "15/11/2025"),
            batch("apple", 2.5, "16/11/2025"),
            batch("apple", 0.5, "17/11/2025"),
        ];

        for amount in [0.5, 1.0, 1.5, 2.0, 3.9, 4.0, 4.5, 9.0] {
            let outcome = consume(inventory.clone(), &[ConsumptionRequest::new("apple", amount)]);
            for item in &outcome.inventory {
                assert!(item.quantity.positive_amount().is_some(), "amount {amount}");
            }
        }
    }

    #[test]
    fn test_partial_consumption_scales_nutrition() {
        let milk = InventoryItem::new("milk", FoodType::Dairy, 4.0, Unit::Containers, "12/11/2025")
            .with_nutrition(Nutrition {
                calories: 400,
                carbs: 48,
                fats: 20,
                protein: 32,
            });

        let outcome = consume(vec![milk], &[ConsumptionRequest::new("milk", 1)]);

        assert_eq!(
            outcome.inventory[0].nutrition(),
            Nutrition {
                calories: 300,
                carbs: 36,
                fats: 15,
                protein: 24,
            }
        );
    }
}
