/// Errors that can occur while rendering a decoded value.
///
/// Rendering walks an in-memory tree, so the only failure source is the
/// JSON serializer itself.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
