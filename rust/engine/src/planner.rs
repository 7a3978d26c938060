// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor Planner
//!
//! Turns resolved areas into at most two daylighting sensors:
//!
//! 1. No exterior fenestration, no floor or no thermal zone: `NotApplicable`
//! 2. Nothing required, or daylighting inappropriate for the space type:
//!    `NotRequired`
//! 3. Otherwise openings are ranked (facade, then larger area, then name),
//!    fractions are allocated per the policy's [`FractionScheme`], rounded
//!    to three decimals and kept below 1.0 by the configured headroom, and
//!    each sensor is sited relative to its anchor opening.

use daylit_core::{OpeningKind, RequiredControls, Room, RoomInput, Setpoint, SurfaceKind};
use daylit_geometry::{Plane, Point3, Vector3};
use serde::Serialize;

use crate::config::DaylightingConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Severity};
use crate::facade::Facade;
use crate::policy::FractionScheme;
use crate::resolver::{AreaResolution, AreaResult};

/// Which lighted area a sensor controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorRole {
    Toplighting,
    PrimarySidelighting,
    SecondarySidelighting,
    /// Primary and secondary sidelighting on one sensor
    Sidelighting,
}

/// An opening eligible to site a sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub name: String,
    pub kind: OpeningKind,
    pub facade: Facade,
    pub area: f64,
    /// Highest vertex above the floor
    pub head_height: f64,
    pub centroid: Point3<f64>,
    pub outward_normal: Vector3<f64>,
}

/// Anchor candidates, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedOpenings {
    pub windows: Vec<Anchor>,
    pub skylights: Vec<Anchor>,
}

/// Control parameters written onto every sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorSettings {
    pub setpoint_lux: f64,
    /// Stepped control with this many steps
    pub stepped_control_steps: u32,
    pub min_input_power_fraction: f64,
    pub min_light_output_fraction: f64,
    pub reset_probability: f64,
    pub max_glare_index: f64,
}

impl SensorSettings {
    pub fn with_setpoint(setpoint_lux: f64) -> Self {
        Self {
            setpoint_lux,
            stepped_control_steps: 3,
            min_input_power_fraction: 0.3,
            min_light_output_fraction: 0.2,
            reset_probability: 1.0,
            max_glare_index: 22.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSensor {
    /// `"<room> Daylt Sensor <n>"`
    pub name: String,
    pub role: SensorRole,
    /// Name of the opening the sensor is sited from
    pub anchor: String,
    /// Share of the zone lighting this sensor controls
    pub fraction: f64,
    pub position: Point3<f64>,
    pub settings: SensorSettings,
}

/// Planner outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SensorPlan {
    NotApplicable,
    NotRequired,
    Planned(Vec<PlannedSensor>),
}

impl SensorPlan {
    pub fn sensors(&self) -> &[PlannedSensor] {
        match self {
            SensorPlan::Planned(sensors) => sensors,
            _ => &[],
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, SensorPlan::Planned(_))
    }

    pub fn total_fraction(&self) -> f64 {
        self.sensors().iter().map(|s| s.fraction).sum()
    }
}

/// One sensor slot before rounding and siting
#[derive(Debug, Clone, PartialEq)]
struct Slot<'a> {
    fraction: f64,
    anchor: Option<&'a Anchor>,
    role: SensorRole,
}

/// Plan daylighting sensors for a resolved room
pub fn plan_sensors(
    input: &RoomInput,
    resolution: &AreaResolution,
    required: RequiredControls,
    scheme: FractionScheme,
    config: &DaylightingConfig,
) -> (SensorPlan, Diagnostics) {
    let mut diagnostics = Diagnostics::new(input.room.name.as_str());
    let plan = plan_into(input, resolution, required, scheme, config, &mut diagnostics);
    (plan, diagnostics)
}

pub(crate) fn plan_into(
    input: &RoomInput,
    resolution: &AreaResolution,
    required: RequiredControls,
    scheme: FractionScheme,
    config: &DaylightingConfig,
    diagnostics: &mut Diagnostics,
) -> SensorPlan {
    let room = &input.room;
    let standards = &input.standards;

    if room.fenestration_area() <= 0.0 {
        diagnostics.info(DiagnosticKind::NoFenestration);
        return SensorPlan::NotApplicable;
    }

    let floor_plane = match resolution.floor_plane {
        Some(plane) if resolution.floor_area > 0.0 => plane,
        _ => {
            tracing::debug!(room = %room.name, "no floor area, skipping sensor planning");
            return SensorPlan::NotApplicable;
        }
    };

    if !required.any() {
        diagnostics.info(DiagnosticKind::ControlNotRequired);
        return SensorPlan::NotRequired;
    }

    let setpoint_lux = match standards.setpoint {
        Setpoint::NotAppropriate => {
            diagnostics.info(DiagnosticKind::DaylightingNotAppropriate);
            return SensorPlan::NotRequired;
        }
        Setpoint::Lux(lux) if lux > 0.0 => lux,
        Setpoint::Lux(_) | Setpoint::Unspecified => {
            diagnostics.info(DiagnosticKind::DefaultSetpointAssumed {
                lux: config.default_setpoint_lux,
            });
            config.default_setpoint_lux
        }
    };

    if !standards.has_thermal_zone {
        diagnostics.error(DiagnosticKind::NoThermalZone);
        return SensorPlan::NotApplicable;
    }

    let ranked = rank_openings(room, &floor_plane, config);
    tracing::debug!(
        room = %room.name,
        windows = ranked.windows.len(),
        skylights = ranked.skylights.len(),
        ?required,
        "ranked anchor openings"
    );

    let mut slots = allocate(
        scheme,
        required,
        &resolution.areas,
        resolution.floor_area,
        &ranked,
        standards.cold_climate,
    );

    if let Some((primary, secondary)) = standards.nongeometry_fractions {
        if let Some(slot) = slots.get_mut(0) {
            slot.fraction *= primary;
        }
        if let Some(slot) = slots.get_mut(1) {
            slot.fraction *= secondary;
        }
    }

    let first = slots.first().map_or(0.0, |s| s.fraction);
    let second = slots.get(1).map_or(0.0, |s| s.fraction);
    let (clamped_first, clamped_second) = clamp_fractions(first, second, config.fraction_headroom);
    for (slot, (sensor, from, to)) in slots
        .iter_mut()
        .zip([(1, first, clamped_first), (2, second, clamped_second)])
    {
        if to < round_fraction(from) {
            diagnostics.warn(DiagnosticKind::FractionClamped { sensor, from, to });
        }
        slot.fraction = to;
    }

    let settings = SensorSettings::with_setpoint(setpoint_lux);
    let mut sensors = Vec::with_capacity(slots.len());
    for (index, slot) in slots.iter().enumerate() {
        if slot.fraction <= 0.0 {
            continue;
        }
        let Some(anchor) = slot.anchor else {
            diagnostics.warn(DiagnosticKind::MissingAnchor { sensor: index + 1 });
            continue;
        };
        let number = sensors.len() + 1;

        diagnostics.push(
            Severity::Info,
            Some(&anchor.name),
            DiagnosticKind::SensorFraction {
                sensor: number,
                fraction: slot.fraction,
            },
        );
        sensors.push(PlannedSensor {
            name: format!("{} Daylt Sensor {}", room.name, number),
            role: slot.role,
            anchor: anchor.name.clone(),
            fraction: slot.fraction,
            position: sensor_position(anchor, slot.role, &floor_plane, config),
            settings,
        });
    }

    if sensors.is_empty() {
        return SensorPlan::NotRequired;
    }
    SensorPlan::Planned(sensors)
}

/// Collect and rank the openings that can anchor a sensor
///
/// Windows and skylights on skipped (non-vertical or non-horizontal)
/// surfaces are left out, as are glass doors.
pub fn rank_openings(room: &Room, floor: &Plane, config: &DaylightingConfig) -> RankedOpenings {
    let mut ranked = RankedOpenings::default();

    for surface in room.exterior_surfaces() {
        let Ok(normal) = surface.outward_normal() else {
            continue;
        };
        let usable = match surface.kind {
            SurfaceKind::Wall => normal.z.abs() < config.vertical_wall_tolerance,
            SurfaceKind::RoofCeiling => {
                normal.z > 0.0 && normal.xy().norm() < config.horizontal_roof_tolerance
            }
            SurfaceKind::Floor => false,
        };
        if !usable {
            if !surface.openings.is_empty() {
                tracing::debug!(
                    room = %room.name,
                    surface = %surface.name,
                    "skipping openings for sensor positioning"
                );
            }
            continue;
        }

        let facade = Facade::from_normal(
            &normal,
            config.north_axis_deg,
            config.horizontal_roof_tolerance,
        );

        for opening in &surface.openings {
            if !opening.is_exterior() || !opening.kind.is_sensor_anchor() {
                continue;
            }
            let (Some(centroid), Ok(outward_normal)) = (opening.centroid(), opening.outward_normal())
            else {
                continue;
            };
            let head_height = opening
                .vertices
                .iter()
                .map(|v| floor.distance(v))
                .fold(0.0, f64::max);

            let anchor = Anchor {
                name: opening.name.clone(),
                kind: opening.kind,
                facade,
                area: opening.area(),
                head_height,
                centroid,
                outward_normal,
            };
            if facade == Facade::Up {
                ranked.skylights.push(anchor);
            } else {
                ranked.windows.push(anchor);
            }
        }
    }

    let order = |a: &Anchor, b: &Anchor| {
        a.facade
            .cmp(&b.facade)
            .then(b.area.total_cmp(&a.area))
            .then_with(|| a.name.cmp(&b.name))
    };
    ranked.windows.sort_by(order);
    ranked.skylights.sort_by(order);
    ranked
}

fn allocate<'a>(
    scheme: FractionScheme,
    required: RequiredControls,
    areas: &AreaResult,
    floor_area: f64,
    ranked: &'a RankedOpenings,
    cold_climate: bool,
) -> Vec<Slot<'a>> {
    use SensorRole::*;

    let top = areas.toplighted_area / floor_area;
    let pri = areas.primary_sidelighted_area / floor_area;
    let sec = areas.secondary_sidelighted_area / floor_area;
    let skylight = ranked.skylights.first();
    let window = ranked.windows.first();

    let slot = |fraction: f64, anchor: Option<&'a Anchor>, role: SensorRole| Slot {
        fraction,
        anchor,
        role,
    };

    let wanted = (
        required.toplighting,
        required.primary_sidelighting,
        required.secondary_sidelighting,
    );

    match scheme {
        FractionScheme::Combined => match wanted {
            (true, true, true) => vec![
                slot(top, skylight, Toplighting),
                slot(pri + sec, window, Sidelighting),
            ],
            (false, true, true) => vec![
                slot(pri, window, PrimarySidelighting),
                slot(sec, window, SecondarySidelighting),
            ],
            (true, false, true) => vec![
                slot(top, skylight, Toplighting),
                slot(sec, skylight, SecondarySidelighting),
            ],
            (true, true, false) => vec![
                slot(top, skylight, Toplighting),
                slot(pri, window, PrimarySidelighting),
            ],
            (true, false, false) if cold_climate => vec![slot(top, skylight, Toplighting)],
            (true, false, false) => vec![
                slot(top / 2.0, skylight, Toplighting),
                slot(top / 2.0, skylight, Toplighting),
            ],
            (false, true, false) => vec![slot(pri, window, PrimarySidelighting)],
            (false, false, true) => vec![slot(sec, window, SecondarySidelighting)],
            (false, false, false) => Vec::new(),
        },
        FractionScheme::SplitPrimary => match wanted {
            (true, true, _) => vec![
                slot(top, skylight, Toplighting),
                slot(pri, window, PrimarySidelighting),
            ],
            (true, false, _) => vec![slot(top, skylight, Toplighting)],
            (false, true, _) if ranked.windows.len() <= 1 => {
                vec![slot(pri, window, PrimarySidelighting)]
            }
            (false, true, _) => vec![
                slot(pri / 2.0, window, PrimarySidelighting),
                slot(pri / 2.0, ranked.windows.get(1), PrimarySidelighting),
            ],
            (false, false, true) => vec![slot(sec, window, SecondarySidelighting)],
            (false, false, false) => Vec::new(),
        },
    }
}

/// Round to three decimals, then keep `first < 1` and `first + second < 1`
/// with at least `headroom` to spare
pub fn clamp_fractions(first: f64, second: f64, headroom: f64) -> (f64, f64) {
    let mut first = round_fraction(first);
    let mut second = round_fraction(second);

    if first >= 1.0 {
        first = 1.0 - headroom;
    }
    if first + second >= 1.0 {
        // Round down so the sum cannot creep back up to 1.0
        second = (((1.0 - first - headroom) * 1000.0 + 1e-9).floor() / 1000.0).max(0.0);
    }

    (first, second)
}

fn round_fraction(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 1000.0
}

/// Sensor position relative to its anchor opening
///
/// Skylights: straight down from the centroid to sensor height.
/// Windows: into the room along the inward normal by a multiple of head
/// height, dropped to the floor, then raised to sensor height.
fn sensor_position(
    anchor: &Anchor,
    role: SensorRole,
    floor: &Plane,
    config: &DaylightingConfig,
) -> Point3<f64> {
    if anchor.facade == Facade::Up {
        return anchor.centroid
            - anchor.outward_normal * (anchor.head_height - config.sensor_height_m);
    }

    let depth_factor = match role {
        SensorRole::PrimarySidelighting => config.primary_sensor_depth_factor,
        _ => config.secondary_sensor_depth_factor,
    };
    let inside = anchor.centroid - anchor.outward_normal * (anchor.head_height * depth_factor);
    floor.project(&inside) + floor.normal.into_inner() * config.sensor_height_m
}
