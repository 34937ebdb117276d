pub mod food_analysis;
pub mod health;
pub mod inventory;
pub mod meal_log;
pub mod recipe;
pub mod server;
