// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room evaluation: resolve areas, measure apertures, ask the policy what
//! it requires, then plan sensors.

use daylit_core::{RequiredControls, RoomInput};
use rayon::prelude::*;
use serde::Serialize;

use crate::aperture::{effective_apertures, Apertures};
use crate::config::DaylightingConfig;
use crate::diagnostics::Diagnostics;
use crate::planner::{plan_into, SensorPlan};
use crate::policy::ControlPolicy;
use crate::resolver::{resolve_into, AreaResolution};

/// Everything computed for one room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomEvaluation {
    pub room: String,
    pub resolution: AreaResolution,
    pub apertures: Apertures,
    pub required: RequiredControls,
    pub plan: SensorPlan,
    pub diagnostics: Diagnostics,
}

impl RoomEvaluation {
    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluate one room under `policy`
pub fn evaluate_room<P: ControlPolicy + ?Sized>(
    input: &RoomInput,
    policy: &P,
    config: &DaylightingConfig,
) -> RoomEvaluation {
    let room = &input.room;
    let mut diagnostics = Diagnostics::new(room.name.as_str());

    let extension = policy.width_extension(input);
    let resolution = resolve_into(room, extension, config, &mut diagnostics);
    let apertures = effective_apertures(room, &resolution.areas, &mut diagnostics);
    let required = policy.required_controls(input, &resolution.areas, &apertures);
    let plan = plan_into(
        input,
        &resolution,
        required,
        policy.fraction_scheme(),
        config,
        &mut diagnostics,
    );

    tracing::debug!(
        room = %room.name,
        daylighted_area = resolution.areas.daylighted_area(),
        sensors = plan.sensors().len(),
        "room evaluated"
    );

    RoomEvaluation {
        room: room.name.clone(),
        resolution,
        apertures,
        required,
        plan,
        diagnostics,
    }
}

/// Evaluate many rooms in parallel, preserving input order
pub fn evaluate_rooms<P: ControlPolicy + ?Sized>(
    inputs: &[RoomInput],
    policy: &P,
    config: &DaylightingConfig,
) -> Vec<RoomEvaluation> {
    tracing::info!(rooms = inputs.len(), "evaluating rooms");
    inputs
        .par_iter()
        .map(|input| evaluate_room(input, policy, config))
        .collect()
}
