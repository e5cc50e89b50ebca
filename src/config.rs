//! Engine configuration: handle geometry shared by hit-testing and the renderer.
//!
//! The host must draw handles with the same `handle_size` and
//! `rotation_handle_offset` it passes here, or drawn and hit-tested handles
//! drift apart.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HANDLE_SIZE, DEFAULT_ROTATION_HANDLE_OFFSET};

pub const HANDLE_SIZE_VAR: &str = "LABELKIT_HANDLE_SIZE";
pub const ROTATION_HANDLE_OFFSET_VAR: &str = "LABELKIT_ROTATION_HANDLE_OFFSET";

/// Error returned by [`EngineConfig::from_env`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The variable is set but is not a finite, positive number.
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    /// A field set in code, a scenario or a flag is not a finite, positive number.
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Handle sizes in label units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hit radius of every resize and rotate handle.
    pub handle_size: f64,
    /// Distance from the top edge to the center of the rotate handle.
    pub rotation_handle_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { handle_size: DEFAULT_HANDLE_SIZE, rotation_handle_offset: DEFAULT_ROTATION_HANDLE_OFFSET }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `LABELKIT_HANDLE_SIZE`: default 8
    /// - `LABELKIT_ROTATION_HANDLE_OFFSET`: default 24
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] if a variable is set to anything
    /// other than a finite positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build config from an arbitrary key lookup. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            handle_size: parse_positive(HANDLE_SIZE_VAR, lookup(HANDLE_SIZE_VAR), defaults.handle_size)?,
            rotation_handle_offset: parse_positive(
                ROTATION_HANDLE_OFFSET_VAR,
                lookup(ROTATION_HANDLE_OFFSET_VAR),
                defaults.rotation_handle_offset,
            )?,
        })
    }

    /// Check that every field is a finite, positive number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] naming the first bad field.
    pub fn validate(self) -> Result<Self, ConfigError> {
        require_positive("handle_size", self.handle_size)?;
        require_positive("rotation_handle_offset", self.rotation_handle_offset)?;
        Ok(self)
    }
}

/// Per-field overrides layered on top of a base [`EngineConfig`].
///
/// Absent fields leave the base value alone, so a scenario that only sets
/// `handle_size` still picks up `LABELKIT_ROTATION_HANDLE_OFFSET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_handle_offset: Option<f64>,
}

impl ConfigOverrides {
    /// `top` wins wherever it sets a field.
    #[must_use]
    pub fn overlay(self, top: ConfigOverrides) -> Self {
        Self {
            handle_size: top.handle_size.or(self.handle_size),
            rotation_handle_offset: top.rotation_handle_offset.or(self.rotation_handle_offset),
        }
    }

    /// `base` with every present field replaced. Not validated.
    #[must_use]
    pub fn apply_to(self, base: EngineConfig) -> EngineConfig {
        EngineConfig {
            handle_size: self.handle_size.unwrap_or(base.handle_size),
            rotation_handle_offset: self.rotation_handle_offset.unwrap_or(base.rotation_handle_offset),
        }
    }
}

/// Finite and strictly greater than zero.
#[must_use]
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if is_positive(value) { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn parse_positive(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if is_positive(v) => Ok(v),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}
