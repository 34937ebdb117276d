pub mod common;
pub mod food_analysis;
pub mod inventory;
pub mod meal_log;
pub mod recipe;
