use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::inventory::entities::Nutrition;

pub const DEFAULT_DAILY_CALORIES: u32 = 2000;
pub const DEFAULT_MEALS_PER_DAY: u32 = 3;

/// One cooked recipe, with the nutrition of every serving eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealLogEntry {
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default = "one_serving")]
    pub servings: u32,
    #[serde(default)]
    pub nutrition: Nutrition,
    /// Day the meal counts towards. Entries without a readable date are kept
    /// but never count towards a day.
    #[serde(default, deserialize_with = "lenient_option")]
    #[schema(value_type = Option<String>, example = "2025-11-10")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub logged_at: Option<DateTime<Utc>>,
}

impl MealLogEntry {
    pub fn new(
        recipe_name: impl Into<String>,
        servings: u32,
        nutrition: Nutrition,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            servings,
            nutrition,
            date,
            logged_at: None,
        }
    }
}

fn one_serving() -> u32 {
    1
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Daily calorie budget split over a fixed number of meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalorieGoal {
    pub daily_calories: u32,
    pub meals_per_day: u32,
}

impl Default for CalorieGoal {
    fn default() -> Self {
        Self {
            daily_calories: DEFAULT_DAILY_CALORIES,
            meals_per_day: DEFAULT_MEALS_PER_DAY,
        }
    }
}

impl CalorieGoal {
    /// Missing or zero values fall back to the defaults.
    pub fn new(daily_calories: Option<u32>, meals_per_day: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            daily_calories: daily_calories
                .filter(|&calories| calories > 0)
                .unwrap_or(defaults.daily_calories),
            meals_per_day: meals_per_day
                .filter(|&meals| meals > 0)
                .unwrap_or(defaults.meals_per_day),
        }
    }
}

/// Progress of one day against a [`CalorieGoal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub goal: CalorieGoal,
    pub consumed: Nutrition,
    /// Negative once the goal has been exceeded.
    pub remaining_calories: i64,
    pub meals_left: u32,
    /// Remaining calories spread over the meals left, zero when none are left.
    pub calories_per_meal: u32,
    pub over_goal: bool,
    pub meals: Vec<MealLogEntry>,
}

pub fn daily_summary(
    log: &[MealLogEntry],
    date: NaiveDate,
    goal: CalorieGoal,
) -> DailyNutritionSummary {
    let meals: Vec<MealLogEntry> = log
        .iter()
        .filter(|entry| entry.date == Some(date))
        .cloned()
        .collect();

    let consumed = meals
        .iter()
        .fold(Nutrition::default(), |total, entry| total.saturating_add(entry.nutrition));

    let remaining_calories = i64::from(goal.daily_calories) - i64::from(consumed.calories);
    let eaten = u32::try_from(meals.len()).unwrap_or(u32::MAX);
    let meals_left = goal.meals_per_day.saturating_sub(eaten);

    let calories_per_meal = if meals_left == 0 || remaining_calories <= 0 {
        0
    } else {
        (remaining_calories as f64 / f64::from(meals_left)).round() as u32
    };

    DailyNutritionSummary {
        date,
        goal,
        consumed,
        remaining_calories,
        meals_left,
        calories_per_meal,
        over_goal: remaining_calories < 0,
        meals,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn meal(calories: u32, date: NaiveDate) -> MealLogEntry {
        MealLogEntry::new(
            "stew",
            1,
            Nutrition {
                calories,
                protein: 20,
                ..Default::default()
            },
            Some(date),
        )
    }

    #[test]
    fn test_summary_counts_only_the_requested_day() {
        let log = vec![meal(700, day(9)), meal(600, day(10)), meal(400, day(10))];

        let summary = daily_summary(&log, day(10), CalorieGoal::default());

        assert_eq!(summary.consumed.calories, 1000);
        assert_eq!(summary.consumed.protein, 40);
        assert_eq!(summary.remaining_calories, 1000);
        assert_eq!(summary.meals_left, 1);
        assert_eq!(summary.calories_per_meal, 1000);
        assert!(!summary.over_goal);
        assert_eq!(summary.meals.len(), 2);
    }

    #[test]
    fn test_fresh_day_splits_goal_evenly() {
        let summary = daily_summary(&[], day(10), CalorieGoal::new(Some(1800), None));

        assert_eq!(summary.remaining_calories, 1800);
        assert_eq!(summary.meals_left, 3);
        assert_eq!(summary.calories_per_meal, 600);
    }

    #[test]
    fn test_over_goal_leaves_nothing_per_meal() {
        let log = vec![meal(1500, day(10)), meal(900, day(10))];

        let summary = daily_summary(&log, day(10), CalorieGoal::default());

        assert_eq!(summary.remaining_calories, -400);
        assert!(summary.over_goal);
        assert_eq!(summary.meals_left, 1);
        assert_eq!(summary.calories_per_meal, 0);
    }

    #[test]
    fn test_no_meals_left_means_zero_target() {
        let log = vec![meal(300, day(10)), meal(300, day(10))];

        let summary = daily_summary(&log, day(10), CalorieGoal::new(Some(2000), Some(2)));

        assert_eq!(summary.meals_left, 0);
        assert_eq!(summary.calories_per_meal, 0);
        assert!(!summary.over_goal);
    }

    #[test]
    fn test_zero_goal_values_use_defaults() {
        assert_eq!(CalorieGoal::new(Some(0), Some(0)), CalorieGoal::default());
    }

    #[test]
    fn test_entry_with_unreadable_date_is_kept_undated() {
        let entry: MealLogEntry = serde_json::from_value(json!({
            "recipe_name": "Soup",
            "nutrition": { "calories": "350 kcal" },
            "date": "yesterday"
        }))
        .unwrap();

        assert_eq!(entry.servings, 1);
        assert_eq!(entry.nutrition.calories, 350);
        assert_eq!(entry.date, None);
        assert_eq!(daily_summary(&[entry], day(10), CalorieGoal::default()).meals.len(), 0);
    }
}
