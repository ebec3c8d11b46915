use actix_web::{web, HttpResponse, Result as ActixResult};
use assistant::Assistant;
use shared_types::ChatRequest;
use std::sync::Arc;

pub async fn chat(
    assistant: web::Data<Arc<Assistant>>,
    request: web::Json<ChatRequest>,
) -> ActixResult<HttpResponse> {
    let reply = assistant.handle(&request.message).await;
    Ok(HttpResponse::Ok().json(reply))
}

pub async fn get_snapshot(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    let snapshot = assistant.snapshot().await;
    Ok(HttpResponse::Ok().json(snapshot.as_ref()))
}
