// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-room inputs supplied by the standards lookup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Design illuminance for the room's daylighting sensors
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Setpoint {
    /// Setpoint in lux
    Lux(f64),
    /// The space type says daylighting control is not appropriate
    NotAppropriate,
    /// No setpoint on record; the planner falls back to its default
    #[default]
    Unspecified,
}

/// How far a sidelit footprint extends past each side of its window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthExtension {
    /// Footprint is exactly as wide as the window
    #[default]
    None,
    /// A fixed distance (2 ft by default)
    Fixed,
    /// Half the window's head height
    Proportional,
}

impl WidthExtension {
    /// Extra width on each side of a window with the given head height
    pub fn extra_width(self, head_height: f64, fixed_m: f64) -> f64 {
        match self {
            WidthExtension::None => 0.0,
            WidthExtension::Fixed => fixed_m,
            WidthExtension::Proportional => head_height / 2.0,
        }
    }
}

/// Which daylighting control categories the active code requires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequiredControls {
    pub toplighting: bool,
    pub primary_sidelighting: bool,
    pub secondary_sidelighting: bool,
}

impl RequiredControls {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            toplighting: true,
            primary_sidelighting: true,
            secondary_sidelighting: true,
        }
    }

    pub fn any(&self) -> bool {
        self.toplighting || self.primary_sidelighting || self.secondary_sidelighting
    }
}

/// Standards-lookup data for one room
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomStandards {
    pub setpoint: Setpoint,
    pub width_extension: WidthExtension,
    /// Interior lighting power density in W/m²
    pub lighting_power_density_w_per_m2: f64,
    /// Standards space type, e.g. `"Office"` or `"Core_Retail"`
    pub space_type: Option<String>,
    /// Standards building type, e.g. `"RetailStripmall"`
    pub building_type: Option<String>,
    /// Whole-building primary and secondary daylightable fractions that
    /// override geometry for some office prototypes
    pub nongeometry_fractions: Option<(f64, f64)>,
    pub has_thermal_zone: bool,
    /// Climate zones where toplighting gets a single sensor
    pub cold_climate: bool,
}

impl Default for RoomStandards {
    fn default() -> Self {
        Self {
            setpoint: Setpoint::Unspecified,
            width_extension: WidthExtension::None,
            lighting_power_density_w_per_m2: 0.0,
            space_type: None,
            building_type: None,
            nongeometry_fractions: None,
            has_thermal_zone: true,
            cold_climate: false,
        }
    }
}

impl RoomStandards {
    pub fn with_setpoint(mut self, setpoint: Setpoint) -> Self {
        self.setpoint = setpoint;
        self
    }

    pub fn with_width_extension(mut self, extension: WidthExtension) -> Self {
        self.width_extension = extension;
        self
    }

    pub fn with_lighting_power_density(mut self, w_per_m2: f64) -> Self {
        self.lighting_power_density_w_per_m2 = w_per_m2;
        self
    }

    pub fn with_space_type(mut self, space_type: impl Into<String>) -> Self {
        self.space_type = Some(space_type.into());
        self
    }

    pub fn with_building_type(mut self, building_type: impl Into<String>) -> Self {
        self.building_type = Some(building_type.into());
        self
    }
}
