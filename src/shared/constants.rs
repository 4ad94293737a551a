/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "shiftlog";

/// Extension used when an uploaded photo has no usable one of its own
pub const DEFAULT_PHOTO_EXTENSION: &str = "jpg";

/// Image extensions accepted for stored photos unless overridden by config
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Route prefix under which the upload directory is served.
/// Photo URLs in the database are built from this prefix, so the static
/// mount in main must stay in sync with it.
pub const UPLOADS_ROUTE: &str = "/static/uploads";
