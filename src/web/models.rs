// API-specific data models for the web server

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of GET /
#[derive(Serialize, Debug, Clone)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Response of GET /health
#[derive(Serialize, Debug, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Query parameters for POST /validar-imagen-url
#[derive(Deserialize, Debug, Clone)]
pub struct UrlValidationQuery {
    pub url: Option<String>,
}

/// File taken from an upload request
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}
