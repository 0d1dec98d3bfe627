//! Editor tunables: grid pitch and pointer radii.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    COMPONENT_HIT_PADDING, ENDPOINT_GRAB_RADIUS, GRID_SIZE, TERMINAL_SNAP_RADIUS, WIRE_BODY_SNAP_RADIUS,
    WIRE_END_SNAP_RADIUS, WIRE_HIT_RADIUS,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} (expected a positive number)")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid pitch in world units.
    pub grid_size: f64,
    /// Snap radius for component terminals.
    pub terminal_snap_radius: f64,
    /// Snap radius for existing wire endpoints.
    pub wire_end_snap_radius: f64,
    /// Snap radius for landing on a wire body.
    pub wire_body_snap_radius: f64,
    /// Radius for grabbing a wire body with the select tool.
    pub wire_hit_radius: f64,
    /// Radius for grabbing a wire endpoint with the select tool.
    pub endpoint_grab_radius: f64,
    /// Padding added around a symbol's bounding box for hit-testing.
    pub component_hit_padding: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            terminal_snap_radius: TERMINAL_SNAP_RADIUS,
            wire_end_snap_radius: WIRE_END_SNAP_RADIUS,
            wire_body_snap_radius: WIRE_BODY_SNAP_RADIUS,
            wire_hit_radius: WIRE_HIT_RADIUS,
            endpoint_grab_radius: ENDPOINT_GRAB_RADIUS,
            component_hit_padding: COMPONENT_HIT_PADDING,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `SCHEMATIC_GRID_SIZE`: default 20
    /// - `SCHEMATIC_TERMINAL_SNAP_RADIUS`: default 15
    /// - `SCHEMATIC_WIRE_END_SNAP_RADIUS`: default 10
    /// - `SCHEMATIC_WIRE_BODY_SNAP_RADIUS`: default 10
    /// - `SCHEMATIC_WIRE_HIT_RADIUS`: default 12
    /// - `SCHEMATIC_ENDPOINT_GRAB_RADIUS`: default 8
    /// - `SCHEMATIC_COMPONENT_HIT_PADDING`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but is not a
    /// positive finite number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup. Used by [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Ok(Self {
            grid_size: parse_positive(&lookup, "SCHEMATIC_GRID_SIZE", d.grid_size)?,
            terminal_snap_radius: parse_positive(&lookup, "SCHEMATIC_TERMINAL_SNAP_RADIUS", d.terminal_snap_radius)?,
            wire_end_snap_radius: parse_positive(&lookup, "SCHEMATIC_WIRE_END_SNAP_RADIUS", d.wire_end_snap_radius)?,
            wire_body_snap_radius: parse_positive(&lookup, "SCHEMATIC_WIRE_BODY_SNAP_RADIUS", d.wire_body_snap_radius)?,
            wire_hit_radius: parse_positive(&lookup, "SCHEMATIC_WIRE_HIT_RADIUS", d.wire_hit_radius)?,
            endpoint_grab_radius: parse_positive(&lookup, "SCHEMATIC_ENDPOINT_GRAB_RADIUS", d.endpoint_grab_radius)?,
            component_hit_padding: parse_positive(&lookup, "SCHEMATIC_COMPONENT_HIT_PADDING", d.component_hit_padding)?,
        })
    }
}

fn parse_positive<F>(lookup: &F, var: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}
