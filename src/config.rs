//! Store configuration parsed from environment variables.

use crate::error::ConfigError;

pub const DEFAULT_EFFECT_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_STRICT_SLICES: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Fail a dispatch when a reducer finds a slice of an unexpected type.
    /// When false the reducer logs and starts over from the default slice.
    pub strict_slices: bool,
    /// Bound on actions enqueued by effects but not yet dispatched.
    pub effect_queue_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { strict_slices: DEFAULT_STRICT_SLICES, effect_queue_capacity: DEFAULT_EFFECT_QUEUE_CAPACITY }
    }
}

impl StoreConfig {
    /// Build typed store config from environment variables.
    ///
    /// Optional:
    /// - `LINGUA_STRICT_SLICES`: `true` (default) or `false`
    /// - `LINGUA_EFFECT_QUEUE_CAPACITY`: default 256, must be positive
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let strict_slices = parse_bool(
            "LINGUA_STRICT_SLICES",
            std::env::var("LINGUA_STRICT_SLICES").ok().as_deref(),
            DEFAULT_STRICT_SLICES,
        )?;
        let effect_queue_capacity = parse_capacity(
            "LINGUA_EFFECT_QUEUE_CAPACITY",
            std::env::var("LINGUA_EFFECT_QUEUE_CAPACITY").ok().as_deref(),
            DEFAULT_EFFECT_QUEUE_CAPACITY,
        )?;
        Ok(Self { strict_slices, effect_queue_capacity })
    }
}

fn parse_bool(var: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue { var, value: other.to_string() }),
    }
}

fn parse_capacity(var: &'static str, raw: Option<&str>, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue { var, value: raw.to_string() }),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
