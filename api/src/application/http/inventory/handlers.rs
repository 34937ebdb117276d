pub mod add_items;
pub mod consume_items;
pub mod create_bin;
pub mod get_inventory;
pub mod get_ranked_inventory;
