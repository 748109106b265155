//! Catalogue read endpoints.

use actix_web::{get, web};

use crate::application::{AppError, TradingService};
use crate::domain::{Project, ProjectId};

/// `GET /api/projects`: the whole catalogue, order not guaranteed.
#[get("/projects")]
pub async fn list_projects(service: web::Data<TradingService>) -> web::Json<Vec<Project>> {
    web::Json(service.list_projects().await)
}

/// `GET /api/projects/{id}`: one project. An unparseable id behaves like
/// an unknown one.
#[get("/projects/{id}")]
pub async fn get_project(
    service: web::Data<TradingService>,
    path: web::Path<String>,
) -> Result<web::Json<Project>, AppError> {
    let id: ProjectId = path
        .into_inner()
        .parse()
        .map_err(|_| AppError::ProjectNotFound)?;
    Ok(web::Json(service.get_project(id).await?))
}
