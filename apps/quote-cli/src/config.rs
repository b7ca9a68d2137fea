//! Runtime configuration for mih-quote.
//!
//! Flags are read from environment variables. The core crate never sees the
//! environment; it receives the resulting decisions as plain values.

use std::env;
use std::path::{Path, PathBuf};

use mih_core::PriceTable;

/// Development-only switches.
///
/// ```text
/// dev                = MIH_ENV (or NODE_ENV) != "production"
/// bypass_validation  = dev && VITE_BYPASS_VALIDATION ?? BYPASS_VALIDATION
/// disable_submission = dev && VITE_DISABLE_SUBMISSION ?? DISABLE_SUBMISSION
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvFlags {
    pub dev: bool,
    /// Skip submission validation before pricing.
    pub bypass_validation: bool,
    /// Compute everything but do not write the document payload.
    pub disable_submission: bool,
}

impl EnvFlags {
    /// Load flags from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load flags through an arbitrary lookup (tests pass a map).
    ///
    /// The `VITE_` name wins whenever it is set, even to an empty value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("MIH_ENV").or_else(|| lookup("NODE_ENV"));
        let dev = environment.as_deref().map(str::trim) != Some("production");

        let bypass = lookup("VITE_BYPASS_VALIDATION").or_else(|| lookup("BYPASS_VALIDATION"));
        let disable = lookup("VITE_DISABLE_SUBMISSION").or_else(|| lookup("DISABLE_SUBMISSION"));

        EnvFlags {
            dev,
            bypass_validation: dev && parse_env_bool(bypass.as_deref(), false),
            disable_submission: dev && parse_env_bool(disable.as_deref(), false),
        }
    }
}

/// Parses a boolean environment value, falling back on absent, empty or
/// unrecognised input.
pub fn parse_env_bool(value: Option<&str>, fallback: bool) -> bool {
    let Some(value) = value else {
        return fallback;
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" | "y" => true,
        "false" | "0" | "off" | "no" | "n" => false,
        _ => fallback,
    }
}

/// Loads the price table from `path`, or the built-in MIH 2026 tariffs.
pub fn load_price_table(path: Option<&Path>) -> Result<PriceTable, ConfigError> {
    let Some(path) = path else {
        return Ok(PriceTable::mih_2026());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    PriceTable::from_json(&raw).map_err(|source| ConfigError::InvalidPriceTable {
        path: path.to_path_buf(),
        source,
    })
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid price table {path}: {source}")]
    InvalidPriceTable {
        path: PathBuf,
        source: mih_core::CoreError,
    },
}
