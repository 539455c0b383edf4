//! Typed bootstrap arguments for a game engine's WebGL loader.
//!
//! [`EngineArguments`] is the value handed once to the engine loader: the
//! URLs of the build artifacts, descriptive metadata, canvas tuning and the
//! callbacks the running instance reports through.  The type itself carries
//! no behaviour; loaders call [`resolve`] to check completeness and apply the
//! documented defaults.  On `wasm32` the arguments convert into the plain
//! JavaScript object the loader script consumes.

pub mod arguments;
pub mod cache_control;
pub mod context_attributes;
pub mod resolve;
pub mod sinks;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arguments::{BannerFn, CacheControlFn, EngineArguments, PrintFn};
pub use cache_control::{default_cache_control, CacheControlMode};
pub use context_attributes::{PowerPreference, WebGlContextAttributes};
pub use resolve::{resolve, ArgumentsError, ResolvedArguments};
pub use sinks::{BannerType, MessageChannel, MessageRecorder};
