use chrono::NaiveDate;

use crate::domain::{inventory::entities::BinId, meal_log::entities::CalorieGoal};

#[derive(Debug, Clone)]
pub struct GetDailySummaryInput {
    pub bin_id: BinId,
    /// Defaults to the current UTC date.
    pub date: Option<NaiveDate>,
    pub goal: CalorieGoal,
}
