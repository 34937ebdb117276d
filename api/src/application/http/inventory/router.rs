use super::handlers::add_items::{__path_add_items, add_items};
use super::handlers::consume_items::{__path_consume_items, consume_items};
use super::handlers::create_bin::{__path_create_bin, create_bin};
use super::handlers::get_inventory::{__path_get_inventory, get_inventory};
use super::handlers::get_ranked_inventory::{__path_get_ranked_inventory, get_ranked_inventory};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(create_bin, get_inventory, add_items, consume_items, get_ranked_inventory))]
pub struct InventoryApiDoc;

pub fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/bins", state.args.server.root_path),
            post(create_bin),
        )
        .route(
            &format!(
                "{}/bins/{{bin_id}}/inventory",
                state.args.server.root_path
            ),
            get(get_inventory),
        )
        .route(
            &format!(
                "{}/bins/{{bin_id}}/inventory/items",
                state.args.server.root_path
            ),
            post(add_items),
        )
        .route(
            &format!(
                "{}/bins/{{bin_id}}/inventory/consume",
                state.args.server.root_path
            ),
            post(consume_items),
        )
        .route(
            &format!(
                "{}/bins/{{bin_id}}/inventory/ranked",
                state.args.server.root_path
            ),
            get(get_ranked_inventory),
        )
}
