pub mod config;
pub mod handlers;

use actix_web::{web, HttpResponse, Responder};
use assistant::Assistant;
use std::sync::Arc;

async fn health(assistant: web::Data<Arc<Assistant>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "data_loaded": assistant.store().is_loaded().await,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/chat", web::post().to(handlers::chat::chat))
        .route("/api/snapshot", web::get().to(handlers::chat::get_snapshot))
        .route("/api/projects", web::get().to(handlers::data::list_projects))
        .route("/api/team", web::get().to(handlers::data::list_team))
        .route("/api/data/reload", web::post().to(handlers::data::reload))
        .route("/api/data/import", web::post().to(handlers::data::import_csv))
        .route(
            "/api/templates/{dataset}",
            web::get().to(handlers::data::get_template),
        )
        .route("/api/llm/status", web::get().to(handlers::llm::get_status))
        .route("/api/llm/check", web::post().to(handlers::llm::check))
        .route("/api/llm/toggle", web::post().to(handlers::llm::toggle))
        .route("/api/llm/models", web::get().to(handlers::llm::list_models))
        .route("/api/llm/model", web::post().to(handlers::llm::set_model))
        .route("/api/llm/pull", web::post().to(handlers::llm::pull_model));
}
