//! Application state and factory
//!
//! This module holds the shared application state and builds the Actix-web
//! application with its middleware and routes.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use rfs_core::repositories::VerificationRecordRepository;
use rfs_core::services::verification::{EmailServiceTrait, VerificationService};
use rfs_shared::{error_codes, CorsConfig, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::cors::create_cors;
use crate::routes::verification::{confirm_submission, redeem_code, request_code};

/// Application state that holds shared services
///
/// Generic over the store and email implementations; the binary uses trait
/// objects chosen from configuration, tests use concrete in-memory types.
pub struct AppState<R, E>
where
    R: VerificationRecordRepository + ?Sized,
    E: EmailServiceTrait + ?Sized,
{
    pub verification_service: Arc<VerificationService<R, E>>,
}

impl<R, E> AppState<R, E>
where
    R: VerificationRecordRepository + ?Sized,
    E: EmailServiceTrait + ?Sized,
{
    pub fn new(verification_service: Arc<VerificationService<R, E>>) -> Self {
        Self {
            verification_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, E>(
    app_state: web::Data<AppState<R, E>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: VerificationRecordRepository + ?Sized + 'static,
    E: EmailServiceTrait + ?Sized + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Logger runs inside CORS so rejected preflights are still logged
        .wrap(Logger::default())
        .wrap(create_cors(cors_config))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/verification")
                        .route("/request-code", web::post().to(request_code::<R, E>))
                        .route("/redeem", web::post().to(redeem_code::<R, E>))
                        .route(
                            "/confirm-submission",
                            web::post().to(confirm_submission::<R, E>),
                        ),
                )
                .route("/", web::get().to(api_info)),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rfs-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "RFS Government API v1",
        "endpoints": {
            "health": "/health",
            "verification": {
                "request_code": {
                    "path": "/api/v1/verification/request-code",
                    "method": "POST",
                    "description": "Email a verification code to a government address",
                    "request_body": { "email": "string" },
                    "responses": {
                        "200": "Code sent",
                        "400": "Invalid email format or domain not allowed",
                        "502": "Email could not be sent",
                        "503": "Verification store unavailable"
                    }
                },
                "redeem": {
                    "path": "/api/v1/verification/redeem",
                    "method": "POST",
                    "description": "Redeem a verification code",
                    "request_body": { "email": "string", "code": "string" },
                    "responses": {
                        "200": "Outcome with verified flag and reason",
                        "503": "Verification store unavailable"
                    }
                },
                "confirm_submission": {
                    "path": "/api/v1/verification/confirm-submission",
                    "method": "POST",
                    "description": "Redeem a code for a project request and send a receipt email",
                    "request_body": { "email": "string", "code": "string", "title": "string" },
                    "responses": {
                        "200": "Outcome with verified flag and reason",
                        "503": "Verification store unavailable"
                    }
                }
            }
        }
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
