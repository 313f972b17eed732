use crate::types::ValidationResult;

pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// A file received through a multipart upload, fully buffered
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_csv(&self) -> bool {
        let mime_is_csv = self
            .content_type
            .as_deref()
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .eq_ignore_ascii_case("text/csv")
            })
            .unwrap_or(false);

        mime_is_csv || self.name.to_ascii_lowercase().ends_with(".csv")
    }

    /// Decode as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Presence, then type, then size. The first failing check wins.
pub fn validate_file(file: Option<&UploadedFile>) -> ValidationResult<()> {
    let Some(file) = file else {
        return ValidationResult::failure("file", "No file provided");
    };

    if !file.is_csv() {
        return ValidationResult::failure("file", "File must be a CSV");
    }

    if file.size() > MAX_FILE_SIZE_BYTES {
        return ValidationResult::failure("file", "File must be less than 5MB");
    }

    ValidationResult::success(())
}
