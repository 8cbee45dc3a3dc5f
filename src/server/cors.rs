use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS: the API is anonymous and consumed directly by
/// browser frontends on other origins.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}
