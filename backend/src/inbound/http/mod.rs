//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod votes;

pub use error::{ApiError, ApiResult};

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` through [`ApiError`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::invalid_request(err.to_string()).into())
}

/// Query extractor configuration reporting malformed query strings as
/// `invalid_request` through [`ApiError`].
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::invalid_request(err.to_string()).into())
}

/// Mount every API route under `/api/v1`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(users::configure)
            .configure(votes::configure),
    );
}
