use axum::Router;
use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod client;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod logging;
pub mod persistence;
pub mod routing_utils;

/// State handed to every request handler. The connection pool inside is the only
/// state the server holds between requests.
pub struct SharedData {
    pub ext_cxn: persistence::ExternalConnectivity,
}

pub type AppState = State<Arc<SharedData>>;

/// Assembles the full HTTP application: the todo routes, API documentation and request tracing
pub fn build_app(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .nest("/todos", api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
