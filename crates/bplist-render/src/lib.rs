#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod render_json;
pub mod render_text;
pub mod renderer;

pub use config::{OutputFormat, RenderConfig};
pub use error::RenderError;
pub use render_json::{DATA_KEY, DATE_KEY, JsonRenderer};
pub use render_text::TextRenderer;
pub use renderer::{DefaultRenderer, PlistRenderer, render};
