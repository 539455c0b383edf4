use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache_control::CacheControlMode;
use crate::context_attributes::WebGlContextAttributes;
use crate::resolve::ArgumentsError;
use crate::sinks::BannerType;

/// Per-URL cache policy callback.
pub type CacheControlFn = Arc<dyn Fn(&str) -> CacheControlMode + Send + Sync>;
/// Banner sink for non-fatal runtime notices.
pub type BannerFn = Arc<dyn Fn(&str, Option<BannerType>) + Send + Sync>;
/// Sink for a single log line, used by both `print` and `printErr`.
pub type PrintFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Arguments handed once to the engine loader to create an instance.
///
/// URLs may be relative to the page serving the loader or absolute (for
/// example when the build is hosted on a CDN). The value is built whole and
/// held unchanged for the lifetime of the engine instance; defaults for the
/// optional fields are applied by the consumer, see [`crate::resolve`].
///
/// Callbacks are pure data as far as this type is concerned: they are never
/// serialized, and each event is delivered as one synchronous call with no
/// ordering guarantee across channels.
///
/// JSON input is strict: keys outside the documented set are rejected rather
/// than dropped, the same as for [`WebGlContextAttributes`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineArguments {
    /// Build data file generated by the engine.
    pub data_url: String,
    /// Framework script generated by the engine.
    pub framework_url: String,
    /// Compiled code file generated by the engine.
    pub code_url: String,
    /// Base path where streaming assets are looked up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_assets_url: Option<String>,
    /// External memory file; empty when memory is embedded in the build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_url: Option<String>,
    /// Debug symbols JSON; empty when the build ships without symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    /// Extra pixel density for the render target, sharpening output on high
    /// DPI screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_pixel_ratio: Option<f64>,
    /// When `false`, the render buffer size may be set independently of the
    /// canvas' CSS size.
    #[serde(
        default,
        rename = "matchWebGLToCanvasSize",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_webgl_to_canvas_size: Option<bool>,
    #[serde(
        default,
        rename = "webglContextAttributes",
        skip_serializing_if = "Option::is_none"
    )]
    pub webgl_context_attributes: Option<WebGlContextAttributes>,
    /// Canvas events to suppress. Defaults to `contextmenu` and `dragstart`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_canvas_events: Option<Vec<String>>,
    #[serde(skip)]
    pub cache_control: Option<CacheControlFn>,
    #[serde(skip)]
    pub show_banner: Option<BannerFn>,
    /// Receives the engine's informational and debug log output.
    #[serde(skip)]
    pub print: Option<PrintFn>,
    /// Receives runtime errors, including script and plugin exceptions.
    #[serde(skip)]
    pub print_err: Option<PrintFn>,
}

impl EngineArguments {
    /// Creates the minimal complete value: the three build URLs and nothing else.
    pub fn new(
        data_url: impl Into<String>,
        framework_url: impl Into<String>,
        code_url: impl Into<String>,
    ) -> Self {
        Self {
            data_url: data_url.into(),
            framework_url: framework_url.into(),
            code_url: code_url.into(),
            streaming_assets_url: None,
            memory_url: None,
            symbols_url: None,
            company_name: None,
            product_name: None,
            product_version: None,
            device_pixel_ratio: None,
            match_webgl_to_canvas_size: None,
            webgl_context_attributes: None,
            disabled_canvas_events: None,
            cache_control: None,
            show_banner: None,
            print: None,
            print_err: None,
        }
    }

    pub fn with_cache_control<F>(self, policy: F) -> Self
    where
        F: Fn(&str) -> CacheControlMode + Send + Sync + 'static,
    {
        Self {
            cache_control: Some(Arc::new(policy)),
            ..self
        }
    }

    pub fn with_show_banner<F>(self, sink: F) -> Self
    where
        F: Fn(&str, Option<BannerType>) + Send + Sync + 'static,
    {
        Self {
            show_banner: Some(Arc::new(sink)),
            ..self
        }
    }

    pub fn with_print<F>(self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            print: Some(Arc::new(sink)),
            ..self
        }
    }

    pub fn with_print_err<F>(self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            print_err: Some(Arc::new(sink)),
            ..self
        }
    }

    /// Parses the data fields from their JSON form. Callbacks stay unset.
    pub fn from_json_str(json: &str) -> Result<Self, ArgumentsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the data fields; callbacks are never part of the output.
    /// JSON has no representation for NaN or infinities, so a non-finite
    /// `devicePixelRatio` is an error instead of a silent `null`.
    pub fn to_json_string(&self) -> Result<String, ArgumentsError> {
        if let Some(value) = self.device_pixel_ratio.filter(|ratio| !ratio.is_finite()) {
            return Err(ArgumentsError::NonFiniteNumber {
                field: "devicePixelRatio",
                value,
            });
        }
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn same_callback<T: ?Sized>(left: &Option<Arc<T>>, right: &Option<Arc<T>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => Arc::ptr_eq(left, right),
        _ => false,
    }
}

impl PartialEq for EngineArguments {
    fn eq(&self, other: &Self) -> bool {
        self.data_url == other.data_url
            && self.framework_url == other.framework_url
            && self.code_url == other.code_url
            && self.streaming_assets_url == other.streaming_assets_url
            && self.memory_url == other.memory_url
            && self.symbols_url == other.symbols_url
            && self.company_name == other.company_name
            && self.product_name == other.product_name
            && self.product_version == other.product_version
            && self.device_pixel_ratio == other.device_pixel_ratio
            && self.match_webgl_to_canvas_size == other.match_webgl_to_canvas_size
            && self.webgl_context_attributes == other.webgl_context_attributes
            && self.disabled_canvas_events == other.disabled_canvas_events
            && same_callback(&self.cache_control, &other.cache_control)
            && same_callback(&self.show_banner, &other.show_banner)
            && same_callback(&self.print, &other.print)
            && same_callback(&self.print_err, &other.print_err)
    }
}

struct CallbackSlot(bool);

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 {
            f.write_str("Some(<fn>)")
        } else {
            f.write_str("None")
        }
    }
}

impl fmt::Debug for EngineArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineArguments")
            .field("data_url", &self.data_url)
            .field("framework_url", &self.framework_url)
            .field("code_url", &self.code_url)
            .field("streaming_assets_url", &self.streaming_assets_url)
            .field("memory_url", &self.memory_url)
            .field("symbols_url", &self.symbols_url)
            .field("company_name", &self.company_name)
            .field("product_name", &self.product_name)
            .field("product_version", &self.product_version)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("match_webgl_to_canvas_size", &self.match_webgl_to_canvas_size)
            .field("webgl_context_attributes", &self.webgl_context_attributes)
            .field("disabled_canvas_events", &self.disabled_canvas_events)
            .field("cache_control", &CallbackSlot(self.cache_control.is_some()))
            .field("show_banner", &CallbackSlot(self.show_banner.is_some()))
            .field("print", &CallbackSlot(self.print.is_some()))
            .field("print_err", &CallbackSlot(self.print_err.is_some()))
            .finish()
    }
}
