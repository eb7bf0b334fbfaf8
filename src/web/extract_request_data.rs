use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use tracing::{debug, warn};

use super::{error::ApiError, models::UploadedFile};

const FILE_FIELD: &str = "file";

pub async fn extract_upload(request: Request) -> Result<UploadedFile, ApiError> {
    // Get the content type from the request headers
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
    {
        return Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type '{}' is not supported. Expected multipart/form-data.",
            content_type
        )));
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to process multipart request: {}", e)))?;

    let mut upload: Option<UploadedFile> = None;
    let mut ignored_fields = 0;

    // Loop through all fields to find "file" and ignore others
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            if upload.is_some() {
                warn!("Multiple 'file' fields found in multipart request, using the last one");
            }

            let filename = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(str::to_string);
            debug!(
                "Received file '{}' with content type: {:?}",
                filename, content_type
            );

            // An empty file is still a valid payload
            let data = field.bytes().await?.to_vec();

            upload = Some(UploadedFile {
                filename,
                content_type,
                data,
            });
        } else {
            let field_name = field.name().unwrap_or("unnamed").to_string();
            debug!("Ignoring multipart field: {}", field_name);
            ignored_fields += 1;
        }
    }

    if ignored_fields > 0 {
        debug!(
            "Ignored {} non-file fields in multipart request",
            ignored_fields
        );
    }

    upload.ok_or_else(|| {
        ApiError::UnprocessableEntity("Missing 'file' field in multipart request.".to_string())
    })
}
