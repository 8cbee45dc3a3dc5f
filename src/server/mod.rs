mod cors;
mod handlers;
mod routes;
mod state;

pub use cors::build_cors_layer;
pub use routes::api_routes;
pub use state::AppState;
