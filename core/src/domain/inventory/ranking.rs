use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::inventory::{
    entities::{InventoryItem, Nutrition},
    expiry::ExpiryDate,
};

const HIGH_URGENCY_DAYS: i64 = 2;
const MEDIUM_URGENCY_DAYS: i64 = 7;

/// Where a batch stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Urgency {
    Expired { days_overdue: i64 },
    Today,
    Upcoming { days_until_expiry: i64 },
    /// The expiry date could not be read.
    Unknown,
}

impl Urgency {
    pub fn from_expiry(expiry: ExpiryDate, today: NaiveDate) -> Self {
        match expiry.days_from(today) {
            None => Urgency::Unknown,
            Some(days) if days < 0 => Urgency::Expired { days_overdue: -days },
            Some(0) => Urgency::Today,
            Some(days) => Urgency::Upcoming {
                days_until_expiry: days,
            },
        }
    }

    pub fn level(&self) -> UrgencyLevel {
        match self {
            Urgency::Expired { .. } | Urgency::Today => UrgencyLevel::High,
            Urgency::Upcoming { days_until_expiry } if *days_until_expiry <= HIGH_URGENCY_DAYS => {
                UrgencyLevel::High
            }
            Urgency::Upcoming { days_until_expiry } if *days_until_expiry <= MEDIUM_URGENCY_DAYS => {
                UrgencyLevel::Medium
            }
            Urgency::Upcoming { .. } | Urgency::Unknown => UrgencyLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedItem {
    pub item: InventoryItem,
    pub urgency: Urgency,
    pub level: UrgencyLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankedInventory {
    pub as_of: NaiveDate,
    pub items: Vec<RankedItem>,
    pub nutrition_totals: Nutrition,
}

/// Orders the inventory by expiry, earliest first. Equal expiries keep list
/// order and unreadable dates go last. Read-only.
pub fn rank(inventory: &[InventoryItem], today: NaiveDate) -> Vec<RankedItem> {
    let mut keyed: Vec<(ExpiryDate, &InventoryItem)> =
        inventory.iter().map(|item| (item.expiry(), item)).collect();

    keyed.sort_by_key(|(expiry, _)| *expiry);

    keyed
        .into_iter()
        .map(|(expiry, item)| {
            let urgency = Urgency::from_expiry(expiry, today);
            RankedItem {
                item: item.clone(),
                urgency,
                level: urgency.level(),
            }
        })
        .collect()
}

pub fn nutrition_totals(inventory: &[InventoryItem]) -> Nutrition {
    inventory
        .iter()
        .fold(Nutrition::default(), |total, item| {
            total.saturating_add(item.nutrition())
        })
}

pub fn ranked_inventory(inventory: &[InventoryItem], today: NaiveDate) -> RankedInventory {
    RankedInventory {
        as_of: today,
        items: rank(inventory, today),
        nutrition_totals: nutrition_totals(inventory),
    }
}
