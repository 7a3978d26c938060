// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building-model validation.

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a room from the building model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The room has no floor surface to measure daylighted areas against.
    #[error("room {0} has no floor surface")]
    MissingFloor(String),

    /// A surface's vertices are collinear or coincident.
    #[error("{0} is degenerate: cannot compute an outward normal")]
    DegenerateSurface(String),
}
