// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised inside the daylighting engine
///
/// Per-room entry points never return these; they turn them into
/// diagnostics and a degenerate result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] daylit_core::Error),

    #[error(transparent)]
    Geometry(#[from] daylit_geometry::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
