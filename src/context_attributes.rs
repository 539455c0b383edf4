use serde::{Deserialize, Serialize};

/// GPU selection hint forwarded to the WebGL context constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    #[default]
    Default,
    HighPerformance,
    LowPower,
}

impl PowerPreference {
    pub const fn as_str(self) -> &'static str {
        match self {
            PowerPreference::Default => "default",
            PowerPreference::HighPerformance => "high-performance",
            PowerPreference::LowPower => "low-power",
        }
    }
}

/// Options handed verbatim to the WebGL rendering context. Unset entries are
/// left to the browser's defaults. Only the attributes listed here are
/// accepted; unknown keys (usually misspellings) fail deserialization, the
/// same policy as the top-level arguments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WebGlContextAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stencil: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antialias: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premultiplied_alpha: Option<bool>,
    /// Keeps the drawing buffer after presentation, needed for screenshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_drawing_buffer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_preference: Option<PowerPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_if_major_performance_caveat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desynchronized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xr_compatible: Option<bool>,
}

impl WebGlContextAttributes {
    /// Returns `true` when no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
