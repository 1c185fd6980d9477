use crate::middleware::form::UploadedFile;
use crate::validation::FieldCheck;

pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Required image, at most 1MB, of an allowed type.
///
/// The type is read from the file's magic bytes; the declared content type
/// and the file name are not trusted.
pub fn image(file: Option<&UploadedFile>) -> FieldCheck {
    let file = file.ok_or_else(|| "Image is required".to_string())?;

    if file.bytes.is_empty() {
        return Err("Image file is empty".to_string());
    }

    match detect_mime(file) {
        Some(mime) if ALLOWED_IMAGE_TYPES.contains(&mime) => {}
        _ => return Err("Only JPEG, PNG, GIF and WEBP images are allowed".to_string()),
    }

    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err("Image size must not exceed 1MB".to_string());
    }

    Ok(())
}

pub(crate) fn detect_mime(file: &UploadedFile) -> Option<&'static str> {
    infer::get(&file.bytes).map(|kind| kind.mime_type())
}
