// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine configuration, loadable from JSON or environment variables.

use daylit_core::units::ft_to_m;
use daylit_geometry::{DEFAULT_TOLERANCE, MIN_POLYGON_AREA};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable constants for area resolution and sensor planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaylightingConfig {
    /// Polygons smaller than this are dropped as noise (m²)
    pub min_polygon_area_m2: f64,
    /// Vertex-distance tolerance for containment and rectangle checks (m)
    pub vertex_tolerance_m: f64,
    /// Walls whose normal has |z| at or above this are not vertical
    pub vertical_wall_tolerance: f64,
    /// Roofs whose normal has a horizontal component at or above this are
    /// not horizontal
    pub horizontal_roof_tolerance: f64,
    /// Toplit footprint expansion per metre of ceiling height
    pub toplit_extension_factor: f64,
    /// Extra width per window side under the fixed extension method (m)
    pub fixed_extension_m: f64,
    /// Sensor height above the floor (m)
    pub sensor_height_m: f64,
    /// Primary sensor depth into the room, as a multiple of head height
    pub primary_sensor_depth_factor: f64,
    /// Secondary sensor depth into the room, as a multiple of head height
    pub secondary_sensor_depth_factor: f64,
    /// Controlled fractions are kept at least this far below 1.0
    pub fraction_headroom: f64,
    /// Setpoint used when the standards lookup has none (lux)
    pub default_setpoint_lux: f64,
    /// Building rotation clockwise from true north (degrees)
    pub north_axis_deg: f64,
    /// Run the z = 0 verification pass on every polygon set
    pub check_z: bool,
}

impl Default for DaylightingConfig {
    fn default() -> Self {
        Self {
            min_polygon_area_m2: MIN_POLYGON_AREA,
            vertex_tolerance_m: DEFAULT_TOLERANCE,
            vertical_wall_tolerance: 0.001,
            horizontal_roof_tolerance: 0.001,
            toplit_extension_factor: 0.7,
            fixed_extension_m: ft_to_m(2.0),
            sensor_height_m: ft_to_m(2.5),
            primary_sensor_depth_factor: 0.66,
            secondary_sensor_depth_factor: 1.33,
            fraction_headroom: 0.001,
            default_setpoint_lux: 375.0,
            north_axis_deg: 0.0,
            check_z: true,
        }
    }
}

impl DaylightingConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_polygon_area_m2: env_or("DAYLIT_MIN_POLYGON_AREA", defaults.min_polygon_area_m2),
            sensor_height_m: env_or("DAYLIT_SENSOR_HEIGHT", defaults.sensor_height_m),
            fraction_headroom: env_or("DAYLIT_FRACTION_HEADROOM", defaults.fraction_headroom),
            default_setpoint_lux: env_or(
                "DAYLIT_DEFAULT_SETPOINT_LUX",
                defaults.default_setpoint_lux,
            ),
            north_axis_deg: env_or("DAYLIT_NORTH_AXIS", defaults.north_axis_deg),
            ..defaults
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the geometry or fraction math meaningless
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("min_polygon_area_m2", self.min_polygon_area_m2),
            ("vertex_tolerance_m", self.vertex_tolerance_m),
            ("vertical_wall_tolerance", self.vertical_wall_tolerance),
            ("horizontal_roof_tolerance", self.horizontal_roof_tolerance),
            ("toplit_extension_factor", self.toplit_extension_factor),
            ("fixed_extension_m", self.fixed_extension_m),
            ("sensor_height_m", self.sensor_height_m),
            ("primary_sensor_depth_factor", self.primary_sensor_depth_factor),
            ("secondary_sensor_depth_factor", self.secondary_sensor_depth_factor),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(self.fraction_headroom > 0.0 && self.fraction_headroom < 0.5) {
            return Err(Error::InvalidConfig(format!(
                "fraction_headroom must be in (0, 0.5), got {}",
                self.fraction_headroom
            )));
        }

        if !(self.default_setpoint_lux.is_finite() && self.default_setpoint_lux > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "default_setpoint_lux must be positive, got {}",
                self.default_setpoint_lux
            )));
        }

        if !self.north_axis_deg.is_finite() {
            return Err(Error::InvalidConfig("north_axis_deg must be finite".into()));
        }

        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
