// Main entry point for the image-validation service.
// Parses configuration, sets up logging, builds the validation policy
// and serves the Axum router until a shutdown signal arrives.

mod shutdown_signal;
mod validator;
mod web;

use clap::Parser;
use shutdown_signal::shutdown_signal;
use std::sync::Arc;
use tracing::Level;
use validator::ValidationPolicy;

const MIB: u64 = 1024 * 1024;

/// Command line arguments for image-validation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Hostname/IP to bind the server to. "*" listens on all interfaces.
    #[arg(long, env = "IMAGE_VALIDATION_HOST", default_value = "*")]
    host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "IMAGE_VALIDATION_PORT", default_value_t = 8000)]
    port: u16,

    /// Maximum accepted image size, in megabytes (MiB).
    #[arg(long, env = "IMAGE_VALIDATION_MAX_FILE_SIZE_MB", default_value_t = 5)]
    max_file_size_mb: u64,

    /// Comma separated list of accepted file extensions.
    #[arg(
        long,
        env = "IMAGE_VALIDATION_ALLOWED_EXTENSIONS",
        value_delimiter = ',',
        default_values = validator::DEFAULT_ALLOWED_EXTENSIONS
    )]
    allowed_extensions: Vec<String>,

    /// Hard limit for a whole request body, in megabytes (MiB).
    /// Uploads above it fail before any verdict can be produced.
    #[arg(long, env = "IMAGE_VALIDATION_MAX_REQUEST_BODY_MB", default_value_t = 32)]
    max_request_body_mb: u64,

    /// Log verbosity (TRACE, DEBUG, INFO, WARN, ERROR).
    #[arg(long, env = "IMAGE_VALIDATION_LOG_LEVEL", default_value_t = Level::INFO)]
    log_level: Level,
}

impl AppConfig {
    fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::new(
            self.max_file_size_mb.saturating_mul(MIB),
            &self.allowed_extensions,
        )
    }

    fn max_request_body_bytes(&self) -> usize {
        usize::try_from(self.max_request_body_mb.saturating_mul(MIB)).unwrap_or(usize::MAX)
    }
}

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting image-validation...");

    let policy = config.validation_policy();
    let max_request_body_bytes = config.max_request_body_bytes();

    tracing::info!(
        "Validation policy: max file size {} bytes, allowed extensions [{}]",
        policy.max_file_size_bytes(),
        policy.allowed_extensions().collect::<Vec<_>>().join(", ")
    );
    if policy.allowed_extensions().next().is_none() {
        tracing::warn!("No allowed extensions configured. Every upload will be rejected.");
    }
    if max_request_body_bytes as u64 <= policy.max_file_size_bytes() {
        tracing::warn!(
            "Request body limit ({} bytes) does not exceed the file size limit. \
             Oversized uploads will fail with 413 instead of a validation verdict.",
            max_request_body_bytes
        );
    }

    let app = web::create_app(Arc::new(policy), max_request_body_bytes);

    // --- Start HTTP Server ---
    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, l)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("image-validation has shut down.");
}
