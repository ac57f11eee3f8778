//! Application-wide configuration.

/// Alias of the built-in ajax handler.
pub const DEFAULT_HANDLER: &str = "ajax";

/// Prefix stripped from data attribute names.
pub const DEFAULT_DATA_PREFIX: &str = "x";

/// Class marking elements picked up by `automate`.
pub const DEFAULT_MARKER_CLASS: &str = "xross";

/// Configuration shared by the registry and every bound listener.
///
/// # Example
///
/// ```rust,ignore
/// let settings = Settings::new()
///     .with_data_prefix("ax")
///     .with_strict_callbacks(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// Prefix stripped from data attribute names.
    pub data_prefix: String,
    /// Alias used when `describe` is not given one.
    pub default_handler: String,
    /// Class scanned by `automate` when none is given.
    pub marker_class: String,
    /// Whether an unresolvable callback name fails `describe`.
    ///
    /// When disabled the miss is logged and the callback does nothing.
    pub strict_callbacks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create default settings.
    pub fn new() -> Self {
        Self {
            data_prefix: DEFAULT_DATA_PREFIX.to_owned(),
            default_handler: DEFAULT_HANDLER.to_owned(),
            marker_class: DEFAULT_MARKER_CLASS.to_owned(),
            strict_callbacks: true,
        }
    }

    /// Set the data attribute prefix.
    pub fn with_data_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.data_prefix = prefix.into();
        self
    }

    /// Set the default handler alias.
    pub fn with_default_handler(mut self, alias: impl Into<String>) -> Self {
        self.default_handler = alias.into();
        self
    }

    /// Set the marker class.
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Set strict callback resolution.
    pub fn with_strict_callbacks(mut self, strict: bool) -> Self {
        self.strict_callbacks = strict;
        self
    }
}
