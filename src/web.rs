#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{WebGlContextAttributes as JsContextAttributes, WebGlPowerPreference};

use crate::context_attributes::{PowerPreference, WebGlContextAttributes};
use crate::sinks::BannerType;
use crate::EngineArguments;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Default sinks report through `log`; route it to the browser console.
    wasm_logger::init(wasm_logger::Config::default());
}

impl EngineArguments {
    /// Builds the plain object the engine loader expects. Absent optional
    /// fields are left out so the loader applies its own defaults.
    pub fn to_js_object(&self) -> Result<Object, JsValue> {
        let object = Object::new();
        set(&object, "dataUrl", &self.data_url.as_str().into())?;
        set(&object, "frameworkUrl", &self.framework_url.as_str().into())?;
        set(&object, "codeUrl", &self.code_url.as_str().into())?;

        for (key, value) in [
            ("streamingAssetsUrl", &self.streaming_assets_url),
            ("memoryUrl", &self.memory_url),
            ("symbolsUrl", &self.symbols_url),
            ("companyName", &self.company_name),
            ("productName", &self.product_name),
            ("productVersion", &self.product_version),
        ] {
            if let Some(value) = value {
                set(&object, key, &value.as_str().into())?;
            }
        }

        if let Some(ratio) = self.device_pixel_ratio {
            set(&object, "devicePixelRatio", &ratio.into())?;
        }
        if let Some(matched) = self.match_webgl_to_canvas_size {
            set(&object, "matchWebGLToCanvasSize", &matched.into())?;
        }
        if let Some(attributes) = &self.webgl_context_attributes {
            set(&object, "webglContextAttributes", &context_attributes(attributes)?)?;
        }
        if let Some(events) = &self.disabled_canvas_events {
            let array: Array = events.iter().map(|event| JsValue::from_str(event)).collect();
            set(&object, "disabledCanvasEvents", &array)?;
        }

        // The loader holds on to these for the whole instance lifetime, so the
        // closures are handed over to the JS garbage collector.
        if let Some(policy) = self.cache_control.clone() {
            let closure = Closure::<dyn Fn(String) -> JsValue>::new(move |url: String| {
                JsValue::from_str(policy(&url).as_str())
            });
            set(&object, "cacheControl", &closure.into_js_value())?;
        }
        if let Some(sink) = self.show_banner.clone() {
            let closure =
                Closure::<dyn Fn(String, JsValue)>::new(move |message: String, kind: JsValue| {
                    sink(&message, banner_type(&kind))
                });
            set(&object, "showBanner", &closure.into_js_value())?;
        }
        if let Some(sink) = self.print.clone() {
            let closure = Closure::<dyn Fn(String)>::new(move |message: String| sink(&message));
            set(&object, "print", &closure.into_js_value())?;
        }
        if let Some(sink) = self.print_err.clone() {
            let closure = Closure::<dyn Fn(String)>::new(move |message: String| sink(&message));
            set(&object, "printErr", &closure.into_js_value())?;
        }

        Ok(object)
    }
}

/// Calls a JS `cacheControl` function and maps its answer back to a mode.
pub fn call_cache_control(policy: &Function, url: &str) -> Result<crate::CacheControlMode, JsValue> {
    let answer = policy.call1(&JsValue::NULL, &JsValue::from_str(url))?;
    let name = answer
        .as_string()
        .ok_or_else(|| JsValue::from_str("cacheControl must return a string"))?;
    name.parse()
        .map_err(|err: crate::cache_control::UnknownCacheControlMode| {
            JsValue::from_str(&err.to_string())
        })
}

fn set(object: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(object, &JsValue::from_str(key), value).map(|_| ())
}

fn banner_type(value: &JsValue) -> Option<BannerType> {
    match value.as_string().as_deref() {
        Some("error") => Some(BannerType::Error),
        Some("warning") => Some(BannerType::Warning),
        _ => None,
    }
}

fn context_attributes(attributes: &WebGlContextAttributes) -> Result<JsValue, JsValue> {
    let js = JsContextAttributes::new();
    if let Some(value) = attributes.alpha {
        js.set_alpha(value);
    }
    if let Some(value) = attributes.depth {
        js.set_depth(value);
    }
    if let Some(value) = attributes.stencil {
        js.set_stencil(value);
    }
    if let Some(value) = attributes.antialias {
        js.set_antialias(value);
    }
    if let Some(value) = attributes.premultiplied_alpha {
        js.set_premultiplied_alpha(value);
    }
    if let Some(value) = attributes.preserve_drawing_buffer {
        js.set_preserve_drawing_buffer(value);
    }
    if let Some(value) = attributes.power_preference {
        js.set_power_preference(match value {
            PowerPreference::Default => WebGlPowerPreference::Default,
            PowerPreference::HighPerformance => WebGlPowerPreference::HighPerformance,
            PowerPreference::LowPower => WebGlPowerPreference::LowPower,
        });
    }
    if let Some(value) = attributes.fail_if_major_performance_caveat {
        js.set_fail_if_major_performance_caveat(value);
    }
    if let Some(value) = attributes.xr_compatible {
        js.set_xr_compatible(value);
    }
    let js: JsValue = js.into();
    // Not exposed by web-sys' dictionary type.
    if let Some(value) = attributes.desynchronized {
        Reflect::set(&js, &JsValue::from_str("desynchronized"), &value.into())?;
    }
    Ok(js)
}
