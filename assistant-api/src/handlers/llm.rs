use actix_web::{web, HttpResponse, Result as ActixResult};
use assistant::Assistant;
use shared_types::{ModelRequest, ModelsResponse};
use std::sync::Arc;

pub async fn get_status(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(assistant.llm_status().await))
}

pub async fn check(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(assistant.check_llm().await))
}

pub async fn toggle(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(assistant.toggle_llm().await))
}

pub async fn list_models(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    let models = assistant
        .gateway()
        .models()
        .await
        .map_err(|e| actix_web::error::ErrorBadGateway(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ModelsResponse { models }))
}

pub async fn set_model(
    assistant: web::Data<Arc<Assistant>>,
    request: web::Json<ModelRequest>,
) -> ActixResult<HttpResponse> {
    let model = request.into_inner().model;
    if model.trim().is_empty() {
        return Err(actix_web::error::ErrorBadRequest("Model name is required"));
    }

    assistant.gateway().set_model(model.trim()).await;
    Ok(HttpResponse::Ok().json(assistant.llm_status().await))
}

pub async fn pull_model(
    assistant: web::Data<Arc<Assistant>>,
    request: web::Json<ModelRequest>,
) -> ActixResult<HttpResponse> {
    let model = request.into_inner().model;
    assistant
        .gateway()
        .pull_model(&model)
        .await
        .map_err(|e| actix_web::error::ErrorBadGateway(e.to_string()))?;

    let models = assistant.gateway().models().await.unwrap_or_default();
    Ok(HttpResponse::Ok().json(ModelsResponse { models }))
}
