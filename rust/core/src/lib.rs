// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Daylit Core
//!
//! The read-only building-model contract consumed by the daylighting
//! calculator: rooms, their exterior surfaces and openings, plus the
//! per-room inputs that come from a standards lookup.
//!
//! Opening and surface kinds are resolved once into closed enums when the
//! model is built, so downstream code matches on variants instead of probing
//! object types.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for the model types

pub mod error;
pub mod model;
pub mod standards;
pub mod units;

pub use error::{Error, Result};
pub use model::{BoundaryCondition, Opening, OpeningKind, Room, RoomInput, Surface, SurfaceKind};
pub use standards::{RequiredControls, RoomStandards, Setpoint, WidthExtension};
