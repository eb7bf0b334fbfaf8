// Upload validation rules: maximum byte size and allowed file extension.
// No image decoding happens here, only the payload length and the filename are inspected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const MIB: u64 = 1024 * 1024;

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * MIB;
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

const URL_VALIDATION_NOT_IMPLEMENTED: &str =
    "URL validation not implemented. Use POST /validar-imagen with a file upload.";

/// Verdict returned for every upload validation request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub size_bytes: Option<u64>,
    pub extension: Option<String>,
}

/// Fixed verdict of the URL validation placeholder
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UrlValidationResult {
    pub is_valid: bool,
    pub message: String,
}

/// Immutable limits applied to every upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    max_file_size_bytes: u64,
    // Ordered so that the "format not allowed" message is stable.
    allowed_extensions: BTreeSet<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_ALLOWED_EXTENSIONS)
    }
}

impl ValidationPolicy {
    /// Builds a policy, normalizing extensions to lower case with a leading `.`.
    /// Blank entries are dropped.
    pub fn new<I, S>(max_file_size_bytes: u64, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();

        Self {
            max_file_size_bytes,
            allowed_extensions,
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed_extensions.iter().map(String::as_str)
    }

    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.contains(extension)
    }

    /// Checks an uploaded payload against the size limit first, then against the
    /// allowed extensions. Never fails: rejections are reported in the result.
    pub fn validate_upload(&self, payload: &[u8], filename: &str) -> ValidationResult {
        let size_bytes = payload.len() as u64;
        let extension = extract_extension(filename);

        let (is_valid, message) = if size_bytes > self.max_file_size_bytes {
            (
                false,
                format!(
                    "file exceeds maximum allowed size of {}MB",
                    format_megabytes(self.max_file_size_bytes)
                ),
            )
        } else if !self.is_extension_allowed(&extension) {
            (
                false,
                format!(
                    "format not allowed; use: {}",
                    self.allowed_extensions().collect::<Vec<_>>().join(", ")
                ),
            )
        } else {
            (true, "valid image".to_string())
        };

        ValidationResult {
            is_valid,
            message,
            size_bytes: Some(size_bytes),
            extension: Some(extension),
        }
    }
}

/// Placeholder for remote image validation. Always rejects.
pub fn validate_by_url(_url: &str) -> UrlValidationResult {
    UrlValidationResult {
        is_valid: false,
        message: URL_VALIDATION_NOT_IMPLEMENTED.to_string(),
    }
}

/// Returns the lower-cased suffix starting at the last `.`, or an empty string.
pub fn extract_extension(filename: &str) -> String {
    filename
        .rfind('.')
        .map(|idx| filename[idx..].to_lowercase())
        .unwrap_or_default()
}

fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

fn format_megabytes(bytes: u64) -> String {
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format!("{:.1}", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_file_with_allowed_extension() {
        let policy = ValidationPolicy::default();
        let result = policy.validate_upload(&[0u8; 1000], "cat.jpg");

        assert_eq!(
            result,
            ValidationResult {
                is_valid: true,
                message: "valid image".to_string(),
                size_bytes: Some(1000),
                extension: Some(".jpg".to_string()),
            }
        );
    }

    #[test]
    fn accepts_every_default_extension() {
        let policy = ValidationPolicy::default();
        for ext in DEFAULT_ALLOWED_EXTENSIONS {
            let result = policy.validate_upload(b"data", &format!("image{}", ext));
            assert!(result.is_valid, "{} should be accepted", ext);
        }
    }

    #[test]
    fn rejects_oversized_file_before_checking_extension() {
        let policy = ValidationPolicy::default();
        let payload = vec![0u8; 6 * 1024 * 1024];

        let result = policy.validate_upload(&payload, "big.png");
        assert!(!result.is_valid);
        assert!(result.message.contains("5MB"));
        assert_eq!(result.size_bytes, Some(6_291_456));
        assert_eq!(result.extension.as_deref(), Some(".png"));

        // Bad extension is still reported as a size violation.
        let result = policy.validate_upload(&payload, "big.exe");
        assert!(!result.is_valid);
        assert!(result.message.contains("5MB"));
        assert_eq!(result.extension.as_deref(), Some(".exe"));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = ValidationPolicy::new(10, [".png"]);

        assert!(policy.validate_upload(&[0u8; 10], "a.png").is_valid);
        assert!(!policy.validate_upload(&[0u8; 11], "a.png").is_valid);
    }

    #[test]
    fn rejects_disallowed_extension_and_lists_allowed_ones_sorted() {
        let policy = ValidationPolicy::default();
        let result = policy.validate_upload(&[0u8; 100], "doc.pdf");

        assert!(!result.is_valid);
        assert_eq!(result.size_bytes, Some(100));
        assert_eq!(result.extension.as_deref(), Some(".pdf"));
        assert_eq!(
            result.message,
            "format not allowed; use: .gif, .jpeg, .jpg, .png, .webp"
        );
    }

    #[test]
    fn empty_payload_and_filename_is_a_format_violation() {
        let policy = ValidationPolicy::default();
        let result = policy.validate_upload(&[], "");

        assert!(!result.is_valid);
        assert!(result.message.starts_with("format not allowed"));
        assert_eq!(result.size_bytes, Some(0));
        assert_eq!(result.extension.as_deref(), Some(""));
    }

    #[test]
    fn filename_without_dot_is_rejected() {
        let policy = ValidationPolicy::default();
        let result = policy.validate_upload(b"abc", "noext");

        assert!(!result.is_valid);
        assert_eq!(result.extension.as_deref(), Some(""));
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(extract_extension("Photo.PNG"), ".png");
        assert_eq!(extract_extension("archive.tar.GZ"), ".gz");
        assert_eq!(extract_extension("noext"), "");
        assert_eq!(extract_extension(""), "");
        assert_eq!(extract_extension("trailing."), ".");
        assert_eq!(extract_extension(".png"), ".png");
    }

    #[test]
    fn dotfile_name_counts_as_its_extension() {
        let result = ValidationPolicy::default().validate_upload(b"x", ".png");

        assert!(result.is_valid);
        assert_eq!(result.extension.as_deref(), Some(".png"));
    }

    #[test]
    fn uppercase_filename_is_accepted() {
        let policy = ValidationPolicy::default();
        let result = policy.validate_upload(b"x", "Photo.PNG");

        assert!(result.is_valid);
        assert_eq!(result.extension.as_deref(), Some(".png"));
    }

    #[test]
    fn policy_normalizes_configured_extensions() {
        let policy = ValidationPolicy::new(MIB, ["PNG", " .Jpg ", "", "."]);

        assert_eq!(policy.allowed_extensions().collect::<Vec<_>>(), [".jpg", ".png"]);
        assert!(policy.validate_upload(b"x", "a.jpg").is_valid);
    }

    #[test]
    fn size_message_uses_fractional_megabytes() {
        let policy = ValidationPolicy::new(MIB + MIB / 2, [".png"]);
        let result = policy.validate_upload(&vec![0u8; 2 * MIB as usize], "a.png");

        assert_eq!(result.message, "file exceeds maximum allowed size of 1.5MB");
    }

    #[test]
    fn url_validation_always_rejects() {
        let result = validate_by_url("http://example.com/x.png");

        assert!(!result.is_valid);
        assert!(result.message.contains("not implemented"));
    }

    #[test]
    fn result_serializes_with_snake_case_fields() {
        let result = ValidationPolicy::default().validate_upload(b"x", "a.gif");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_valid"], true);
        assert_eq!(json["size_bytes"], 1);
        assert_eq!(json["extension"], ".gif");
    }
}
