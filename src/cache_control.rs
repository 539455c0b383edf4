use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the loader's caching layer should treat a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheControlMode {
    /// Store the asset and revalidate it with the server before every use.
    MustRevalidate,
    /// Store the asset and serve it from the cache without revalidation.
    Immutable,
    /// Bypass the cache entirely.
    NoStore,
}

impl CacheControlMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            CacheControlMode::MustRevalidate => "must-revalidate",
            CacheControlMode::Immutable => "immutable",
            CacheControlMode::NoStore => "no-store",
        }
    }
}

impl fmt::Display for CacheControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache control mode: {0}")]
pub struct UnknownCacheControlMode(pub String);

impl FromStr for CacheControlMode {
    type Err = UnknownCacheControlMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "must-revalidate" => Ok(CacheControlMode::MustRevalidate),
            "immutable" => Ok(CacheControlMode::Immutable),
            "no-store" => Ok(CacheControlMode::NoStore),
            other => Err(UnknownCacheControlMode(other.to_string())),
        }
    }
}

/// Extensions the loader caches and revalidates when no policy is supplied.
pub const REVALIDATED_EXTENSIONS: [&str; 2] = ["data", "bundle"];

/// Policy applied when the arguments carry no `cacheControl` callback: build
/// data and asset bundles are revalidated, everything else skips the cache.
/// Compressed variants such as `game.data.gz` or `level.bundle.br` count too,
/// so every extension of the file name is checked, not only the last one.
pub fn default_cache_control(url: &str) -> CacheControlMode {
    let revalidated = url_extensions(url).any(|ext| {
        REVALIDATED_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    });
    if revalidated {
        CacheControlMode::MustRevalidate
    } else {
        CacheControlMode::NoStore
    }
}

fn url_extensions(url: &str) -> impl Iterator<Item = &str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extensions = match file_name.split_once('.') {
        Some((stem, rest)) if !stem.is_empty() => rest,
        _ => "",
    };
    extensions.split('.').filter(|ext| !ext.is_empty())
}
