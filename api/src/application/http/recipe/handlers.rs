pub mod cook_recipe;
pub mod generate_recipes;
