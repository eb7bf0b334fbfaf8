// API handlers for the web server

use super::{
    SharedPolicy, error::ApiError, extract_request_data::extract_upload, models::*,
};
use crate::validator::{UrlValidationResult, ValidationResult, validate_by_url};
use axum::{
    Json,
    extract::{Query, Request, State},
};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

const SERVICE_NAME: &str = "Image Validation - Art Gallery";
const SERVICE_ID: &str = "image-validation";

// --- GET / ---
// Describes the service and its endpoints
pub async fn root() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("validate".to_string(), "POST /validar-imagen".to_string()),
        ("validate_url".to_string(), "POST /validar-imagen-url".to_string()),
        ("health".to_string(), "GET /health".to_string()),
    ]);

    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

// --- GET /health ---
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: SERVICE_ID.to_string(),
    })
}

// --- POST /validar-imagen ---
// Validates an uploaded image by size and extension
pub async fn validate_image(
    State(policy): State<SharedPolicy>,
    request: Request,
) -> Result<Json<ValidationResult>, ApiError> {
    let request_id = Uuid::new_v4();

    let upload = extract_upload(request).await.inspect_err(|err| {
        info!(
            "Upload could not be read: request_id={}, status={}",
            request_id,
            err.status()
        );
    })?;

    debug!(
        "Validating upload: request_id={}, filename='{}', content_type={:?}, size={}",
        request_id,
        upload.filename,
        upload.content_type,
        upload.data.len()
    );

    let result = policy.validate_upload(&upload.data, &upload.filename);

    info!(
        "Validation finished: request_id={}, valid={}, size={}, extension={:?}",
        request_id,
        result.is_valid,
        upload.data.len(),
        result.extension.as_deref().unwrap_or_default()
    );

    Ok(Json(result))
}

// --- POST /validar-imagen-url?url=... ---
// Placeholder, remote images are not fetched
pub async fn validate_image_url(
    Query(query): Query<UrlValidationQuery>,
) -> Json<UrlValidationResult> {
    let url = query.url.unwrap_or_default();
    debug!("URL validation requested for '{}'", url);

    Json(validate_by_url(&url))
}
