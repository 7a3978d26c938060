// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control-requirement policies
//!
//! A [`ControlPolicy`] decides, per room, which daylighting control
//! categories the active energy code requires, which sidelighting width
//! extension it uses, and how controlled fractions are split across sensors.

use daylit_core::units::ft2_to_m2;
use daylit_core::{RequiredControls, RoomInput, WidthExtension};
use serde::Serialize;

use crate::aperture::Apertures;
use crate::resolver::AreaResult;

/// How controlled fractions are allocated to the (at most two) sensors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FractionScheme {
    /// Secondary sidelighting gets its own sensor or shares one with primary
    #[default]
    Combined,
    /// Only toplighting and primary sidelighting are controlled; primary
    /// control is split across the two best windows
    SplitPrimary,
}

/// Energy-code policy for daylighting control
pub trait ControlPolicy: Send + Sync {
    /// Width extension for sidelit footprints; defaults to the room's own
    fn width_extension(&self, input: &RoomInput) -> WidthExtension {
        input.standards.width_extension
    }

    /// Which control categories the room needs
    fn required_controls(
        &self,
        input: &RoomInput,
        areas: &AreaResult,
        apertures: &Apertures,
    ) -> RequiredControls;

    fn fraction_scheme(&self) -> FractionScheme {
        FractionScheme::Combined
    }
}

/// Requires nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoControlPolicy;

impl ControlPolicy for NoControlPolicy {
    fn required_controls(&self, _: &RoomInput, _: &AreaResult, _: &Apertures) -> RequiredControls {
        RequiredControls::none()
    }
}

/// Caller-supplied requirements, the same for every room
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRequirements {
    pub required: RequiredControls,
    pub scheme: FractionScheme,
}

impl FixedRequirements {
    pub fn new(required: RequiredControls) -> Self {
        Self {
            required,
            scheme: FractionScheme::Combined,
        }
    }

    pub fn with_scheme(mut self, scheme: FractionScheme) -> Self {
        self.scheme = scheme;
        self
    }
}

impl ControlPolicy for FixedRequirements {
    fn required_controls(&self, _: &RoomInput, _: &AreaResult, _: &Apertures) -> RequiredControls {
        self.required
    }

    fn fraction_scheme(&self) -> FractionScheme {
        self.scheme
    }
}

/// ASHRAE 90.1-2010 daylighting control requirements
#[derive(Debug, Clone, Copy, Default)]
pub struct Ashrae2010Policy;

impl ControlPolicy for Ashrae2010Policy {
    fn width_extension(&self, _: &RoomInput) -> WidthExtension {
        WidthExtension::Fixed
    }

    fn required_controls(
        &self,
        input: &RoomInput,
        areas: &AreaResult,
        apertures: &Apertures,
    ) -> RequiredControls {
        let primary = areas.primary_sidelighted_area;
        let toplit = areas.toplighted_area;

        let mut required = RequiredControls {
            primary_sidelighting: primary > 0.0
                && primary >= ft2_to_m2(250.0)
                && apertures.sidelighting >= 0.1,
            toplighting: toplit > 0.0 && toplit >= ft2_to_m2(900.0) && apertures.skylight >= 0.006,
            secondary_sidelighting: false,
        };

        apply_space_type_exceptions(input.standards.space_type.as_deref(), &mut required);
        required
    }

    fn fraction_scheme(&self) -> FractionScheme {
        FractionScheme::SplitPrimary
    }
}

/// ASHRAE 90.1-2013 daylighting control requirements
#[derive(Debug, Clone, Copy, Default)]
pub struct Ashrae2013Policy;

/// Below this a lighted area is treated as absent (m²)
const NEGLIGIBLE_AREA_M2: f64 = 0.01;

impl ControlPolicy for Ashrae2013Policy {
    fn width_extension(&self, _: &RoomInput) -> WidthExtension {
        WidthExtension::Proportional
    }

    fn required_controls(
        &self,
        input: &RoomInput,
        areas: &AreaResult,
        _: &Apertures,
    ) -> RequiredControls {
        let lpd = input.standards.lighting_power_density_w_per_m2;
        let primary = areas.primary_sidelighted_area;
        let secondary = areas.secondary_sidelighted_area;
        let toplit = areas.toplighted_area;
        let enough_glazing = areas.total_window_area >= ft2_to_m2(20.0);

        let mut required = RequiredControls {
            primary_sidelighting: primary >= NEGLIGIBLE_AREA_M2
                && primary * lpd >= 150.0
                && enough_glazing,
            secondary_sidelighting: secondary >= NEGLIGIBLE_AREA_M2
                && (primary + secondary) * lpd >= 300.0
                && enough_glazing,
            toplighting: toplit >= NEGLIGIBLE_AREA_M2 && toplit * lpd >= 150.0,
        };

        apply_space_type_exceptions(input.standards.space_type.as_deref(), &mut required);
        required
    }
}

/// Space types whose requirements are fixed regardless of geometry
fn apply_space_type_exceptions(space_type: Option<&str>, required: &mut RequiredControls) {
    match space_type {
        Some("Core_Retail") => {
            required.primary_sidelighting = false;
            required.secondary_sidelighting = true;
        }
        Some(
            "Entry" | "Front_Retail" | "Point_of_Sale" | "Strip mall - type 1"
            | "Strip mall - type 2" | "Strip mall - type 3",
        ) => {
            required.primary_sidelighting = false;
            required.secondary_sidelighting = false;
        }
        Some("Apartment" | "Apartment_topfloor_NS" | "Apartment_topfloor_WE") => {
            *required = RequiredControls::none();
        }
        _ => {}
    }
}
