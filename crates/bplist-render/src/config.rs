/// Configuration for rendering a decoded plist.
///
/// ```text
/// ┌────────┬─────────────────────────────────────────────────────┐
/// │ Field  │ Purpose                                             │
/// ├────────┼─────────────────────────────────────────────────────┤
/// │ format │ Selects JSON or indented text output                │
/// │ pretty │ JSON only: multi-line with indentation when true    │
/// └────────┴─────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for RenderConfig {
    /// Pretty-printed JSON.
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Output formats.
///
/// ```text
/// ┌──────┬──────────────────────────────────────────────────────────┐
/// │ Mode │ Description                                              │
/// ├──────┼──────────────────────────────────────────────────────────┤
/// │ Json │ {"name": "cat", "data": {"$data": "dead"}}               │
/// │      │ Machine-readable. Dates and data use tagged objects.     │
/// ├──────┼──────────────────────────────────────────────────────────┤
/// │ Text │ { name = cat; data = <dead>; }                           │
/// │      │ OpenStep-flavoured, for reading. Keeps every pair.       │
/// └──────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}
