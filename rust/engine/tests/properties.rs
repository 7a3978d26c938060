// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Invariants that hold for every room the resolver and planner see.

mod common;

use common::{add_opening, fully_glazed_room, single_window_room, skylight_room, BoxRoom, Side};
use daylit_core::Room;
use daylit_engine::{
    clamp_fractions, evaluate_room, resolve_areas, DaylightingConfig, FixedRequirements,
    RequiredControls, RoomInput, RoomStandards, WidthExtension,
};

/// Skylight and windows on two facades, overlapping at the corner
fn mixed_room() -> Room {
    let dims = BoxRoom::new(12.0, 8.0, 4.0);
    let mut room = dims.room("Studio");
    add_opening(
        &mut room,
        Side::South.wall_name(),
        dims.window("South Window", Side::South, (1.0, 11.0), 1.0, 3.5),
    );
    add_opening(
        &mut room,
        Side::East.wall_name(),
        dims.window("East Window", Side::East, (0.5, 4.0), 0.8, 2.2),
    );
    add_opening(&mut room, "Roof", dims.skylight("Skylight", (5.0, 5.0), (6.0, 6.0)));
    room
}

fn sample_rooms() -> Vec<Room> {
    vec![
        single_window_room(),
        skylight_room(),
        fully_glazed_room(),
        mixed_room(),
        BoxRoom::new(5.0, 5.0, 3.0).room("Empty"),
    ]
}

#[test]
fn resolution_is_idempotent() {
    let config = DaylightingConfig::default();
    for room in sample_rooms() {
        for extension in [
            WidthExtension::None,
            WidthExtension::Fixed,
            WidthExtension::Proportional,
        ] {
            let (first, _) = resolve_areas(&room, extension, &config);
            let (second, _) = resolve_areas(&room, extension, &config);
            assert_eq!(first, second, "room {}", room.name);
        }
    }
}

#[test]
fn lighted_areas_never_exceed_floor_area() {
    let config = DaylightingConfig::default();
    for room in sample_rooms() {
        for extension in [
            WidthExtension::None,
            WidthExtension::Fixed,
            WidthExtension::Proportional,
        ] {
            let (resolution, _) = resolve_areas(&room, extension, &config);
            let areas = resolution.areas;
            assert!(areas.toplighted_area >= 0.0);
            assert!(areas.primary_sidelighted_area >= 0.0);
            assert!(areas.secondary_sidelighted_area >= 0.0);
            assert!(
                areas.daylighted_area() <= resolution.floor_area + 0.01,
                "room {} with {:?}: {} > {}",
                room.name,
                extension,
                areas.daylighted_area(),
                resolution.floor_area
            );
        }
    }
}

#[test]
fn wider_window_never_shrinks_primary_area() {
    let config = DaylightingConfig::default();
    let dims = BoxRoom::new(10.0, 10.0, 3.0);

    let mut previous = 0.0;
    for half_width in [0.25, 0.5, 1.0, 2.0, 3.5, 5.0] {
        let mut room = dims.room("Office");
        add_opening(
            &mut room,
            Side::South.wall_name(),
            dims.window(
                "South Window",
                Side::South,
                (5.0 - half_width, 5.0 + half_width),
                0.9,
                2.4,
            ),
        );

        let (resolution, _) = resolve_areas(&room, WidthExtension::Proportional, &config);
        let primary = resolution.areas.primary_sidelighted_area;
        assert!(
            primary + 1e-9 >= previous,
            "primary area dropped from {previous} to {primary} at half width {half_width}"
        );
        previous = primary;
    }
}

#[test]
fn taller_window_never_shrinks_primary_area() {
    let config = DaylightingConfig::default();
    let dims = BoxRoom::new(10.0, 10.0, 3.0);

    let mut previous = 0.0;
    for head in [1.2, 1.8, 2.4, 3.0] {
        let mut room = dims.room("Office");
        add_opening(
            &mut room,
            Side::South.wall_name(),
            dims.window("South Window", Side::South, (3.0, 7.0), 0.9, head),
        );

        let (resolution, _) = resolve_areas(&room, WidthExtension::None, &config);
        let primary = resolution.areas.primary_sidelighted_area;
        assert!(primary + 1e-9 >= previous);
        previous = primary;
    }
}

#[test]
fn two_sensor_fractions_stay_below_one() {
    let config = DaylightingConfig::default();
    let policy = FixedRequirements::new(RequiredControls::all());

    for room in sample_rooms() {
        let input = RoomInput::new(room, RoomStandards::default());
        let evaluation = evaluate_room(&input, &policy, &config);
        let sensors = evaluation.plan.sensors();
        if let [first, second] = sensors {
            assert!(first.fraction + second.fraction < 1.0);
        }
        for sensor in sensors {
            assert!(sensor.fraction > 0.0 && sensor.fraction < 1.0);
        }
    }

    let mut f = 0.0;
    while f <= 1.05 {
        let (first, second) = clamp_fractions(f, 1.0 - f + 0.05, config.fraction_headroom);
        assert!(first < 1.0);
        assert!(first + second < 1.0, "{first} + {second}");
        assert!(second >= 0.0);
        f += 0.037;
    }
}
