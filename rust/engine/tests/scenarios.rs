// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end room scenarios: footprints through sensor plans.

mod common;

use approx::assert_relative_eq;
use common::{fully_glazed_room, single_window_room, skylight_room, BoxRoom, Side};
use daylit_core::BoundaryCondition;
use daylit_engine::{
    evaluate_room, resolve_areas, DaylightingConfig, DiagnosticKind, FixedRequirements,
    NoControlPolicy, PolygonSet, RequiredControls, RoomInput, RoomStandards, SensorPlan,
    SensorRole, Severity, WidthExtension,
};

#[test]
fn single_window_with_proportional_extension() {
    let room = single_window_room();
    let config = DaylightingConfig::default();

    let (resolution, diagnostics) =
        resolve_areas(&room, WidthExtension::Proportional, &config);
    let areas = resolution.areas;

    // 2 m wide + 1.2 m each side, 2.4 m deep per band
    assert_relative_eq!(areas.primary_sidelighted_area, 4.4 * 2.4, epsilon = 1e-6);
    assert_relative_eq!(areas.secondary_sidelighted_area, 4.4 * 2.4, epsilon = 1e-6);
    assert_eq!(areas.toplighted_area, 0.0);
    assert!(areas.primary_sidelighted_area <= 100.0);
    assert!(areas.secondary_sidelighted_area <= 100.0);

    assert_relative_eq!(areas.total_window_area, 3.0, epsilon = 1e-9);
    assert_eq!(areas.total_skylight_area, 0.0);
    assert_relative_eq!(resolution.floor_area, 100.0, epsilon = 1e-9);
    assert_eq!(diagnostics.count_at_least(Severity::Warning), 0);
}

#[test]
fn flush_skylight_expands_by_ceiling_height() {
    let room = skylight_room();
    let config = DaylightingConfig::default();

    let (resolution, _) = resolve_areas(&room, WidthExtension::None, &config);
    let side = 1.0 + 2.0 * 0.7 * 3.0;

    assert_relative_eq!(resolution.areas.toplighted_area, side * side, epsilon = 1e-6);
    assert_eq!(resolution.areas.primary_sidelighted_area, 0.0);
    assert_eq!(resolution.areas.secondary_sidelighted_area, 0.0);
    assert_relative_eq!(resolution.areas.total_skylight_area, 1.0, epsilon = 1e-9);
}

#[test]
fn skylight_footprint_is_capped_by_the_floor() {
    let dims = BoxRoom::new(4.0, 4.0, 3.0);
    let mut room = dims.room("Closet");
    common::add_opening(&mut room, "Roof", dims.skylight("Skylight", (1.5, 1.5), (2.5, 2.5)));

    let (resolution, _) =
        resolve_areas(&room, WidthExtension::None, &DaylightingConfig::default());

    assert_relative_eq!(resolution.areas.toplighted_area, 16.0, epsilon = 1e-6);
}

#[test]
fn four_glazed_walls_recover_from_inner_loop() {
    let room = fully_glazed_room();
    let config = DaylightingConfig::default();

    let (resolution, diagnostics) =
        resolve_areas(&room, WidthExtension::Proportional, &config);
    let areas = resolution.areas;

    assert!(areas.primary_sidelighted_area.is_finite());
    assert!(areas.primary_sidelighted_area > 0.0);
    // 3 m perimeter band around a 4 m x 4 m core
    assert_relative_eq!(areas.primary_sidelighted_area, 84.0, epsilon = 0.05);
    assert_relative_eq!(areas.secondary_sidelighted_area, 16.0, epsilon = 0.05);
    assert!(areas.daylighted_area() <= resolution.floor_area + 0.01);

    assert!(diagnostics.any(|kind| matches!(
        kind,
        DiagnosticKind::JoinInnerLoopRecovered {
            set: PolygonSet::PrimarySidelit
        }
    )));
}

#[test]
fn room_without_openings_is_not_applicable() {
    let room = BoxRoom::new(6.0, 8.0, 3.0).room("Storage");
    let input = RoomInput::new(room, RoomStandards::default());
    let config = DaylightingConfig::default();

    let evaluation = evaluate_room(
        &input,
        &FixedRequirements::new(RequiredControls::all()),
        &config,
    );

    let areas = evaluation.resolution.areas;
    assert_eq!(areas.toplighted_area, 0.0);
    assert_eq!(areas.primary_sidelighted_area, 0.0);
    assert_eq!(areas.secondary_sidelighted_area, 0.0);
    assert_eq!(areas.total_window_area, 0.0);
    assert_eq!(areas.total_skylight_area, 0.0);
    assert_eq!(evaluation.plan, SensorPlan::NotApplicable);
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::NoFenestration)));
}

#[test]
fn interior_glazing_alone_is_not_applicable() {
    let dims = BoxRoom::new(10.0, 10.0, 3.0);
    let mut room = dims.room("Corridor");
    common::add_opening(
        &mut room,
        Side::South.wall_name(),
        dims.window("Borrowed Light", Side::South, (4.0, 6.0), 0.9, 2.4)
            .with_boundary(BoundaryCondition::Surface),
    );
    assert_eq!(room.fenestration_area(), 0.0);

    let input = RoomInput::new(room, RoomStandards::default());
    let evaluation = evaluate_room(
        &input,
        &FixedRequirements::new(RequiredControls::all()),
        &DaylightingConfig::default(),
    );

    assert_eq!(evaluation.resolution.areas.total_window_area, 0.0);
    assert_eq!(evaluation.resolution.areas.primary_sidelighted_area, 0.0);
    assert_eq!(evaluation.plan, SensorPlan::NotApplicable);
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::NoFenestration)));
}

#[test]
fn near_full_coverage_keeps_fractions_below_one() {
    let input = RoomInput::new(fully_glazed_room(), RoomStandards::default());
    let policy = FixedRequirements::new(RequiredControls {
        toplighting: false,
        primary_sidelighting: true,
        secondary_sidelighting: true,
    });
    let config = DaylightingConfig::default();

    let evaluation = evaluate_room(&input, &policy, &config);
    let sensors = evaluation.plan.sensors();

    assert_eq!(sensors.len(), 2);
    let (first, second) = (sensors[0].fraction, sensors[1].fraction);
    assert!(first < 1.0);
    assert!(first + second < 1.0);
    assert_relative_eq!(first, 0.84, epsilon = 1e-3);

    assert_eq!(sensors[0].role, SensorRole::PrimarySidelighting);
    assert_eq!(sensors[1].role, SensorRole::SecondarySidelighting);
    // South facade ranks first
    assert_eq!(sensors[0].anchor, "South Wall Glazing");
    assert_eq!(sensors[0].name, "Atrium Daylt Sensor 1");
    assert_eq!(sensors[1].name, "Atrium Daylt Sensor 2");
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::FractionClamped { sensor: 2, .. })));
}

#[test]
fn sensors_sit_inside_the_room_at_work_plane_height() {
    let input = RoomInput::new(single_window_room(), RoomStandards::default());
    let policy = FixedRequirements::new(RequiredControls {
        toplighting: false,
        primary_sidelighting: true,
        secondary_sidelighting: true,
    });
    let config = DaylightingConfig::default();

    let evaluation = evaluate_room(&input, &policy, &config);
    let sensors = evaluation.plan.sensors();
    assert_eq!(sensors.len(), 2);

    let primary = sensors[0].position;
    assert_relative_eq!(primary.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(primary.y, 2.4 * 0.66, epsilon = 1e-9);
    assert_relative_eq!(primary.z, config.sensor_height_m, epsilon = 1e-9);

    let secondary = sensors[1].position;
    assert_relative_eq!(secondary.y, 2.4 * 1.33, epsilon = 1e-9);
    assert_relative_eq!(secondary.z, config.sensor_height_m, epsilon = 1e-9);

    for sensor in sensors {
        assert_relative_eq!(sensor.settings.setpoint_lux, config.default_setpoint_lux);
        assert_eq!(sensor.settings.stepped_control_steps, 3);
    }
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::DefaultSetpointAssumed { .. })));
}

#[test]
fn not_required_and_not_appropriate() {
    let config = DaylightingConfig::default();

    let input = RoomInput::new(single_window_room(), RoomStandards::default());
    let evaluation = evaluate_room(&input, &NoControlPolicy, &config);
    assert_eq!(evaluation.plan, SensorPlan::NotRequired);
    assert!(evaluation.resolution.areas.primary_sidelighted_area > 0.0);

    let standards =
        RoomStandards::default().with_setpoint(daylit_engine::Setpoint::NotAppropriate);
    let input = RoomInput::new(single_window_room(), standards);
    let evaluation = evaluate_room(
        &input,
        &FixedRequirements::new(RequiredControls::all()),
        &config,
    );
    assert_eq!(evaluation.plan, SensorPlan::NotRequired);
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::DaylightingNotAppropriate)));
}

#[test]
fn room_without_thermal_zone_gets_no_sensors() {
    let standards = RoomStandards {
        has_thermal_zone: false,
        ..RoomStandards::default()
    };
    let input = RoomInput::new(single_window_room(), standards);

    let evaluation = evaluate_room(
        &input,
        &FixedRequirements::new(RequiredControls::all()),
        &DaylightingConfig::default(),
    );

    assert_eq!(evaluation.plan, SensorPlan::NotApplicable);
    assert_eq!(evaluation.diagnostics.count_at_least(Severity::Error), 1);
}

#[test]
fn nongeometry_fractions_scale_sensor_shares() {
    let standards = RoomStandards {
        nongeometry_fractions: Some((0.5, 0.5)),
        ..RoomStandards::default()
    };
    let input = RoomInput::new(fully_glazed_room(), standards);
    let policy = FixedRequirements::new(RequiredControls {
        toplighting: false,
        primary_sidelighting: true,
        secondary_sidelighting: true,
    });

    let evaluation = evaluate_room(&input, &policy, &DaylightingConfig::default());
    let sensors = evaluation.plan.sensors();

    assert_eq!(sensors.len(), 2);
    assert_relative_eq!(sensors[0].fraction, 0.42, epsilon = 1e-3);
    assert_relative_eq!(sensors[1].fraction, 0.08, epsilon = 1e-3);
}

#[test]
fn missing_floor_reports_and_returns_zeros() {
    let mut room = single_window_room();
    room.surfaces.retain(|s| s.name != "Floor");
    let input = RoomInput::new(room, RoomStandards::default());

    let evaluation = evaluate_room(
        &input,
        &FixedRequirements::new(RequiredControls::all()),
        &DaylightingConfig::default(),
    );

    assert_eq!(evaluation.resolution.areas.daylighted_area(), 0.0);
    assert_eq!(evaluation.plan, SensorPlan::NotApplicable);
    assert!(evaluation
        .diagnostics
        .any(|kind| matches!(kind, DiagnosticKind::MissingFloor)));
}
