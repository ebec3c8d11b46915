pub mod chat;
pub mod data;
pub mod llm;

use actix_web::HttpResponse;
use shared_types::{ErrorResponse, LoadError};

/// Unreadable sources are the upstream's fault, bad tables are the caller's
pub(crate) fn load_error_response(err: &LoadError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        LoadError::Unreachable(_) => HttpResponse::BadGateway().json(body),
        LoadError::Malformed { .. } => HttpResponse::BadRequest().json(body),
    }
}
