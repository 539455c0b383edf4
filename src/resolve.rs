//! Consumer-side view of [`EngineArguments`].
//!
//! The arguments type only describes what a caller may supply. Loaders go
//! through [`resolve`] to reject incomplete values and to fill in the
//! documented defaults, so every optional field has a concrete value.

use log::debug;
use thiserror::Error;

use crate::arguments::{BannerFn, CacheControlFn, EngineArguments, PrintFn};
use crate::cache_control::{default_cache_control, CacheControlMode};
use crate::context_attributes::WebGlContextAttributes;
use crate::sinks::{log_banner, log_print, log_print_err, BannerType};

/// Canvas events suppressed when `disabledCanvasEvents` is unset.
pub const DEFAULT_DISABLED_CANVAS_EVENTS: [&str; 2] = ["contextmenu", "dragstart"];
pub const DEFAULT_STREAMING_ASSETS_URL: &str = "StreamingAssets";
pub const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ArgumentsError {
    #[error("required argument `{field}` is missing or empty")]
    MissingUrl { field: &'static str },
    #[error("devicePixelRatio must be a positive finite number, got {0}")]
    InvalidPixelRatio(f64),
    #[error("`{field}` cannot be written as JSON: {value} is not a finite number")]
    NonFiniteNumber { field: &'static str, value: f64 },
    #[error("invalid arguments JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arguments with every optional field replaced by its effective value.
#[derive(Clone)]
pub struct ResolvedArguments {
    pub data_url: String,
    pub framework_url: String,
    pub code_url: String,
    pub streaming_assets_url: String,
    pub memory_url: String,
    pub symbols_url: String,
    pub company_name: String,
    pub product_name: String,
    pub product_version: String,
    pub device_pixel_ratio: f64,
    pub match_webgl_to_canvas_size: bool,
    pub webgl_context_attributes: WebGlContextAttributes,
    pub disabled_canvas_events: Vec<String>,
    cache_control: Option<CacheControlFn>,
    show_banner: BannerFn,
    print: PrintFn,
    print_err: PrintFn,
}

/// Checks the mandatory URLs and applies the defaults for everything else.
pub fn resolve(arguments: &EngineArguments) -> Result<ResolvedArguments, ArgumentsError> {
    for (field, value) in [
        ("dataUrl", &arguments.data_url),
        ("frameworkUrl", &arguments.framework_url),
        ("codeUrl", &arguments.code_url),
    ] {
        if value.trim().is_empty() {
            return Err(ArgumentsError::MissingUrl { field });
        }
    }

    let device_pixel_ratio = match arguments.device_pixel_ratio {
        Some(ratio) if !ratio.is_finite() || ratio <= 0.0 => {
            return Err(ArgumentsError::InvalidPixelRatio(ratio));
        }
        Some(ratio) => ratio,
        None => DEFAULT_DEVICE_PIXEL_RATIO,
    };

    let disabled_canvas_events = arguments
        .disabled_canvas_events
        .clone()
        .unwrap_or_else(default_disabled_canvas_events);

    debug!(
        "resolved engine arguments for {} (dpr={device_pixel_ratio}, disabled events={disabled_canvas_events:?})",
        arguments.code_url
    );

    Ok(ResolvedArguments {
        data_url: arguments.data_url.clone(),
        framework_url: arguments.framework_url.clone(),
        code_url: arguments.code_url.clone(),
        streaming_assets_url: arguments
            .streaming_assets_url
            .clone()
            .unwrap_or_else(|| DEFAULT_STREAMING_ASSETS_URL.to_string()),
        memory_url: arguments.memory_url.clone().unwrap_or_default(),
        symbols_url: arguments.symbols_url.clone().unwrap_or_default(),
        company_name: arguments.company_name.clone().unwrap_or_default(),
        product_name: arguments.product_name.clone().unwrap_or_default(),
        product_version: arguments.product_version.clone().unwrap_or_default(),
        device_pixel_ratio,
        match_webgl_to_canvas_size: arguments.match_webgl_to_canvas_size.unwrap_or(true),
        webgl_context_attributes: arguments.webgl_context_attributes.unwrap_or_default(),
        disabled_canvas_events,
        cache_control: arguments.cache_control.clone(),
        show_banner: arguments.show_banner.clone().unwrap_or_else(log_banner),
        print: arguments.print.clone().unwrap_or_else(log_print),
        print_err: arguments.print_err.clone().unwrap_or_else(log_print_err),
    })
}

pub fn default_disabled_canvas_events() -> Vec<String> {
    DEFAULT_DISABLED_CANVAS_EVENTS
        .iter()
        .map(|event| event.to_string())
        .collect()
}

impl ResolvedArguments {
    /// Cache policy for `url`: the caller's callback when present. Otherwise
    /// the build data file is always revalidated, whatever its compression
    /// suffix, and other URLs go through [`default_cache_control`]. Safe to
    /// call repeatedly for the same URL.
    pub fn cache_mode(&self, url: &str) -> CacheControlMode {
        match &self.cache_control {
            Some(policy) => policy(url),
            None if url == self.data_url => CacheControlMode::MustRevalidate,
            None => default_cache_control(url),
        }
    }

    pub fn print(&self, message: &str) {
        (self.print)(message)
    }

    pub fn print_err(&self, message: &str) {
        (self.print_err)(message)
    }

    pub fn show_banner(&self, message: &str, kind: Option<BannerType>) {
        (self.show_banner)(message, kind)
    }

    /// Build URLs the loader fetches, in fetch order. Empty optional URLs are
    /// skipped.
    pub fn asset_urls(&self) -> Vec<&str> {
        [
            self.framework_url.as_str(),
            self.code_url.as_str(),
            self.data_url.as_str(),
            self.memory_url.as_str(),
            self.symbols_url.as_str(),
        ]
        .into_iter()
        .filter(|url| !url.is_empty())
        .collect()
    }
}

impl std::fmt::Debug for ResolvedArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedArguments")
            .field("data_url", &self.data_url)
            .field("framework_url", &self.framework_url)
            .field("code_url", &self.code_url)
            .field("streaming_assets_url", &self.streaming_assets_url)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("match_webgl_to_canvas_size", &self.match_webgl_to_canvas_size)
            .field("disabled_canvas_events", &self.disabled_canvas_events)
            .field("custom_cache_control", &self.cache_control.is_some())
            .finish_non_exhaustive()
    }
}
