//! CORS middleware configuration for cross-origin requests.
//!
//! The submission site calls the verification endpoints from the browser, so
//! production restricts origins to the configured list while development
//! stays permissive.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use rfs_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// An origin list containing `*` allows any origin; otherwise only the listed
/// origins are allowed.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring CORS to allow any origin");
        return cors.allow_any_origin();
    }

    for origin in config
        .allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
