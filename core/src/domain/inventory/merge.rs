use crate::domain::inventory::entities::InventoryItem;

/// Appends freshly scanned batches to an existing inventory.
///
/// Nothing is coalesced: a scan of "apple" next to an existing "apple" batch
/// with the same expiry still yields two batches. `None` means the bin has
/// never been written.
pub fn merge(
    existing: Option<Vec<InventoryItem>>,
    new_items: Vec<InventoryItem>,
) -> Vec<InventoryItem> {
    let mut merged = existing.unwrap_or_default();
    merged.reserve(new_items.len());
    merged.extend(new_items);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::entities::{FoodType, Unit};

    fn apple(quantity: f64, expiry: &str) -> InventoryItem {
        InventoryItem::new("apple", FoodType::Fruit, quantity, Unit::Items, expiry)
    }

    #[test]
    fn test_merge_appends_in_order() {
        let existing = vec![
            apple(3.0, "15/11/2025"),
            InventoryItem::new("lettuce", FoodType::Vegetable, 1.0, Unit::Items, "02/11/2025"),
        ];
        let new_items = vec![apple(4.0, "01/12/2025"), apple(1.0, "bad date")];

        let merged = merge(Some(existing.clone()), new_items.clone());

        assert_eq!(merged.len(), existing.len() + new_items.len());
        assert_eq!(&merged[..2], &existing[..]);
        assert_eq!(&merged[2..], &new_items[..]);
    }

    #[test]
    fn test_merge_never_coalesces_identical_batches() {
        let existing = vec![apple(3.0, "15/11/2025")];
        let merged = merge(Some(existing), vec![apple(3.0, "15/11/2025")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], merged[1]);
    }

    #[test]
    fn test_merge_into_absent_inventory() {
        let new_items = vec![apple(2.0, "15/11/2025")];
        assert_eq!(merge(None, new_items.clone()), new_items);
    }

    #[test]
    fn test_merge_with_nothing_new() {
        let existing = vec![apple(2.0, "15/11/2025")];
        assert_eq!(merge(Some(existing.clone()), Vec::new()), existing);
        assert!(merge(None, Vec::new()).is_empty());
    }
}
