// Web server module
// Handles the HTTP API endpoints of the image validation service

mod app;
mod error;
mod extract_request_data;
mod handlers;
mod listeners;
mod models;

pub use app::{create_app, create_router};
pub use listeners::create_listener;

use crate::validator::ValidationPolicy;
use std::sync::Arc;

pub type SharedPolicy = Arc<ValidationPolicy>;
