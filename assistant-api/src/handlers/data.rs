use actix_web::{web, HttpResponse, Result as ActixResult};
use assistant::Assistant;
use shared_types::{DatasetKind, ErrorResponse, ImportCsvRequest, ProjectsResponse, TeamResponse};
use std::sync::Arc;

use super::load_error_response;

pub async fn reload(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    match assistant.reload().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(summary)),
        Err(e) => {
            tracing::warn!("Reload failed: {}", e);
            Ok(load_error_response(&e))
        }
    }
}

pub async fn list_projects(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    let records = assistant.store().records().await;
    Ok(HttpResponse::Ok().json(ProjectsResponse {
        projects: records.projects.clone(),
    }))
}

pub async fn list_team(assistant: web::Data<Arc<Assistant>>) -> ActixResult<HttpResponse> {
    let records = assistant.store().records().await;
    Ok(HttpResponse::Ok().json(TeamResponse {
        members: records.members.clone(),
    }))
}

pub async fn import_csv(
    assistant: web::Data<Arc<Assistant>>,
    request: web::Json<ImportCsvRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    match assistant.import_csv(request.dataset, &request.csv).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(summary)),
        Err(e) => Ok(load_error_response(&e)),
    }
}

pub async fn get_template(path: web::Path<String>) -> ActixResult<HttpResponse> {
    let name = path.into_inner();
    let Some(dataset) = DatasetKind::parse(&name) else {
        return Ok(HttpResponse::NotFound().json(ErrorResponse {
            error: format!("Unknown dataset: {}", name),
        }));
    };

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}.csv\"", dataset),
        ))
        .body(importers::csv_template(dataset)))
}
