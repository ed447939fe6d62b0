//! HTTP layer: the explicit route table and the JSON error mapping.
//!
//! Handlers off-load every blocking store/upstream call to the actix blocking
//! pool via `web::block`; a cancelled blocking task maps to a generic 500
//! with a safe constant message so internal detail never leaks.

use crate::api;
use crate::config::Config;
use crate::db::Db;
use crate::error::{ServiceError, StoreError};
use crate::models::ListFilter;
use crate::service;
use crate::summary;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use log::warn;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("internal server error")]
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Service(ServiceError::from(err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::UpstreamUnavailable(_))
            | ApiError::Service(ServiceError::StoreUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Route table, built once at process start. Literal `/countries/*` routes
/// are registered before the `{name}` capture so the dynamic segment cannot
/// shadow them. Both refresh paths are served (both observed historically).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/status", web::get().to(get_status))
        .route("/countries", web::get().to(list_countries))
        .route("/countries/refresh", web::post().to(refresh))
        .route("/refresh", web::post().to(refresh))
        .route("/countries/image", web::get().to(summary_image))
        .route("/countries/{name}", web::get().to(get_country))
        .route("/countries/{name}", web::delete().to(delete_country));
}

async fn home() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Countries API is running",
        "endpoints": {
            "/countries": "List countries (region/currency filters, gdp sort)",
            "/countries/{name}": "Get or delete one country",
            "/countries/refresh": "Re-pull all countries from upstream",
            "/countries/image": "Summary image (PNG)",
            "/status": "Record count and last refresh time"
        }
    }))
}

async fn list_countries(
    db: web::Data<Db>,
    query: web::Query<ListFilter>,
) -> Result<HttpResponse, ApiError> {
    let db = db.into_inner();
    let filter = query.into_inner();
    let rows = web::block(move || db.list(&filter))
        .await
        .map_err(|_| ApiError::Internal)??;
    Ok(HttpResponse::Ok().json(rows))
}

async fn get_country(
    db: web::Data<Db>,
    name: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let db = db.into_inner();
    let name = name.into_inner();
    let lookup = name.clone();
    let country = web::block(move || db.get_by_name(&lookup))
        .await
        .map_err(|_| ApiError::Internal)??;
    match country {
        Some(country) => Ok(HttpResponse::Ok().json(country)),
        None => Err(ServiceError::NotFound(format!("Country '{name}' not found")).into()),
    }
}

async fn delete_country(
    db: web::Data<Db>,
    name: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let db = db.into_inner();
    let name = name.into_inner();
    let target = name.clone();
    let removed = web::block(move || db.delete_by_name(&target))
        .await
        .map_err(|_| ApiError::Internal)??;
    if removed {
        Ok(HttpResponse::Ok().json(json!({ "message": format!("{name} deleted successfully") })))
    } else {
        Err(ServiceError::NotFound(format!("Country '{name}' not found or already deleted")).into())
    }
}

async fn refresh(
    db: web::Data<Db>,
    upstream: web::Data<api::Client>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let db = db.into_inner();
    let upstream = upstream.into_inner();
    let config = config.into_inner();
    let outcome = web::block(move || {
        let outcome = service::refresh(&db, &upstream)?;
        // Best-effort side feature; a failure here never downgrades the
        // refresh response.
        if let Err(err) = summary::render(&db, &config.cache_dir) {
            warn!("summary image generation failed: {err:#}");
        }
        Ok::<_, ServiceError>(outcome)
    })
    .await
    .map_err(|_| ApiError::Internal)??;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Countries refreshed successfully",
        "inserted": outcome.inserted,
        "failed": outcome.failed,
    })))
}

async fn get_status(db: web::Data<Db>) -> Result<HttpResponse, ApiError> {
    let db = db.into_inner();
    let status = web::block(move || service::status(&db))
        .await
        .map_err(|_| ApiError::Internal)??;
    Ok(HttpResponse::Ok().json(status))
}

async fn summary_image(config: web::Data<Config>) -> Result<HttpResponse, ApiError> {
    let path = config.cache_dir.join(summary::SUMMARY_FILE);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("image/png").body(bytes)),
        Err(_) => Err(ServiceError::NotFound("Summary image not found".to_string()).into()),
    }
}
