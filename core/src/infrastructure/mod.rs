pub mod inventory;
pub mod llm;
