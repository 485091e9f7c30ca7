use bplist_types::Value;

use crate::config::{OutputFormat, RenderConfig};
use crate::error::RenderError;
use crate::render_json::JsonRenderer;
use crate::render_text::TextRenderer;

/// Renders a decoded plist tree into display text.
///
/// Implementations are stateless; everything they need comes through
/// [`RenderConfig`].
///
/// ```text
/// Value ──▶ PlistRenderer::render() ──▶ String
///                   │
///             RenderConfig
///             (format, pretty)
/// ```
pub trait PlistRenderer {
    /// Render `value` according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the selected output format fails to
    /// serialize.
    fn render(&self, value: &Value, config: &RenderConfig) -> Result<String, RenderError>;
}

/// Dispatches to [`JsonRenderer`] or [`TextRenderer`] by `config.format`.
pub struct DefaultRenderer;

impl PlistRenderer for DefaultRenderer {
    fn render(&self, value: &Value, config: &RenderConfig) -> Result<String, RenderError> {
        match config.format {
            OutputFormat::Json => JsonRenderer::render(value, config.pretty),
            OutputFormat::Text => Ok(TextRenderer::render(value)),
        }
    }
}

/// Render with [`DefaultRenderer`].
///
/// # Errors
///
/// Same as [`PlistRenderer::render`].
pub fn render(value: &Value, config: &RenderConfig) -> Result<String, RenderError> {
    DefaultRenderer.render(value, config)
}
