// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Daylit Engine
//!
//! Daylighted-area resolution and daylighting sensor planning for rooms of a
//! building model.
//!
//! ## Pipeline
//!
//! 1. **Footprints** ([`footprint`]): every exterior window produces a
//!    primary and a secondary sidelit band folded onto the floor; every
//!    skylight produces an expanded toplit square.
//! 2. **Resolution** ([`resolver`]): each category is unioned, priority is
//!    applied (toplit, then primary, then secondary) and the remainder is
//!    measured against the floor.
//! 3. **Apertures** ([`aperture`]): visible-transmittance weighted glazing
//!    area per lighted area.
//! 4. **Policy** ([`policy`]): an energy-code [`ControlPolicy`] decides which
//!    controls are required.
//! 5. **Planning** ([`planner`]): up to two sensors with controlled fractions
//!    and positions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use daylit_engine::{evaluate_room, Ashrae2013Policy, DaylightingConfig};
//!
//! let config = DaylightingConfig::from_env();
//! let evaluation = evaluate_room(&input, &Ashrae2013Policy, &config);
//! println!("daylighted: {:.1} m²", evaluation.resolution.areas.daylighted_area());
//! for sensor in evaluation.plan.sensors() {
//!     println!("{} controls {:.3}", sensor.name, sensor.fraction);
//! }
//! ```
//!
//! Every stage records a [`Diagnostics`] entry for skipped geometry and
//! fallbacks, and mirrors it as a `tracing` event.

pub mod aperture;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluate;
pub mod facade;
pub mod footprint;
pub mod planner;
pub mod policy;
pub mod resolver;

pub use aperture::{effective_apertures, Apertures, NO_APERTURE};
pub use config::DaylightingConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, PolygonSet, Severity};
pub use error::{Error, Result};
pub use evaluate::{evaluate_room, evaluate_rooms, RoomEvaluation};
pub use facade::Facade;
pub use footprint::{
    generate_footprints, skylight_footprint, window_footprints, FloorReference, Footprint,
    FootprintCategory, FootprintSet, FootprintSkip,
};
pub use planner::{
    clamp_fractions, plan_sensors, rank_openings, Anchor, PlannedSensor, RankedOpenings,
    SensorPlan, SensorRole, SensorSettings,
};
pub use policy::{
    Ashrae2010Policy, Ashrae2013Policy, ControlPolicy, FixedRequirements, FractionScheme,
    NoControlPolicy,
};
pub use resolver::{resolve_areas, AreaResolution, AreaResult, ResolvedRegions};

// Re-export the model so callers need only this crate
pub use daylit_core::{
    Opening, OpeningKind, RequiredControls, Room, RoomInput, RoomStandards, Setpoint, Surface,
    SurfaceKind, WidthExtension,
};
