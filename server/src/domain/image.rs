//! Image URL resolution and content-type sniffing.

/// Served when a listing has neither a stored URL nor a legacy blob.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.jpg";

/// URL of the binary-serving endpoint for a listing's main image.
pub fn blob_image_url(girl_id: i32) -> String {
    format!("/api/girls/{girl_id}/image")
}

/// Retrieval URL for a detail image.
pub fn detail_image_url(girl_id: i32, image_id: i32) -> String {
    format!("/api/girls/{girl_id}/detail-images/{image_id}")
}

/// Resolve the one displayable image URL for a listing.
///
/// Precedence: non-blank stored URL verbatim, else the blob endpoint if a
/// legacy blob exists, else the placeholder. Exactly one of the three is
/// returned.
pub fn resolve_image_url(img_url: &str, has_blob: bool, girl_id: i32) -> String {
    if !img_url.trim().is_empty() {
        img_url.to_owned()
    } else if has_blob {
        blob_image_url(girl_id)
    } else {
        PLACEHOLDER_IMAGE_URL.to_owned()
    }
}

/// Map the first bytes of an image blob to a content type.
///
/// PNG `89 50 4E 47`, GIF `47 49 46`, WebP (RIFF) `52 49 46 46`; anything
/// else is served as JPEG.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "image/png"
    } else if bytes.starts_with(&[0x47, 0x49, 0x46]) {
        "image/gif"
    } else if bytes.starts_with(&[0x52, 0x49, 0x46, 0x46]) {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
