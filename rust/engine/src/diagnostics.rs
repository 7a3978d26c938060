// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured diagnostics
//!
//! Every skip, fallback and result of note is recorded in a [`Diagnostics`]
//! accumulator returned next to the value it explains. Recording an entry
//! also emits a `tracing` event at the matching level with `room` and
//! `opening` fields, so applications that install a subscriber see the
//! same stream without walking the accumulator.

use serde::Serialize;
use std::fmt;

/// How much a diagnostic matters to someone reviewing results
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Polygon sets named in geometry diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolygonSet {
    Floor,
    Toplit,
    PrimarySidelit,
    SecondarySidelit,
}

impl fmt::Display for PolygonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolygonSet::Floor => "floor",
            PolygonSet::Toplit => "toplit",
            PolygonSet::PrimarySidelit => "primary sidelit",
            PolygonSet::SecondarySidelit => "secondary sidelit",
        };
        f.write_str(name)
    }
}

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DiagnosticKind {
    MissingFloor,
    NonVerticalWall { surface: String },
    NonHorizontalRoof { surface: String },
    NonQuadOpening { vertices: usize },
    NonRectangularOpening,
    DegenerateGeometry { reason: String },
    ZCoordinateViolation { set: PolygonSet, count: usize },
    DegeneratePolygonsDropped { set: PolygonSet, count: usize },
    JoinInnerLoopRecovered { set: PolygonSet },
    JoinRecoveryFailed { set: PolygonSet },
    NoFenestration,
    ControlNotRequired,
    DaylightingNotAppropriate,
    DefaultSetpointAssumed { lux: f64 },
    AreaComputed { toplit: f64, primary: f64, secondary: f64 },
    SensorFraction { sensor: usize, fraction: f64 },
    FractionClamped { sensor: usize, from: f64, to: f64 },
    MissingAnchor { sensor: usize },
    UnknownVisibleTransmittance,
    NoThermalZone,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingFloor => {
                write!(f, "no floor surface, cannot determine daylighted areas")
            }
            DiagnosticKind::NonVerticalWall { surface } => {
                write!(f, "non-vertical wall {surface}, skipping its windows")
            }
            DiagnosticKind::NonHorizontalRoof { surface } => {
                write!(f, "non-horizontal roof {surface}, skipping its skylights")
            }
            DiagnosticKind::NonQuadOpening { vertices } => write!(
                f,
                "opening has {vertices} vertices, excluded from daylighted areas"
            ),
            DiagnosticKind::NonRectangularOpening => {
                write!(f, "opening is non-rectangular, excluded from daylighted areas")
            }
            DiagnosticKind::DegenerateGeometry { reason } => {
                write!(f, "degenerate geometry: {reason}")
            }
            DiagnosticKind::ZCoordinateViolation { set, count } => {
                write!(f, "{count} {set} vertices are not on z = 0")
            }
            DiagnosticKind::DegeneratePolygonsDropped { set, count } => {
                write!(f, "dropped {count} degenerate {set} polygons")
            }
            DiagnosticKind::JoinInnerLoopRecovered { set } => write!(
                f,
                "{set} union had an inner loop, recovered by holding out one polygon"
            ),
            DiagnosticKind::JoinRecoveryFailed { set } => write!(
                f,
                "{set} union recovery failed, overlapping polygons may be counted twice"
            ),
            DiagnosticKind::NoFenestration => write!(
                f,
                "daylighting control not applicable, no exterior fenestration"
            ),
            DiagnosticKind::ControlNotRequired => write!(f, "no daylighting control is required"),
            DiagnosticKind::DaylightingNotAppropriate => {
                write!(f, "daylighting is not appropriate for this space type")
            }
            DiagnosticKind::DefaultSetpointAssumed { lux } => {
                write!(f, "no illuminance setpoint defined, assuming {lux} lux")
            }
            DiagnosticKind::AreaComputed {
                toplit,
                primary,
                secondary,
            } => write!(
                f,
                "toplit {toplit:.2} m2, primary sidelit {primary:.2} m2, secondary sidelit {secondary:.2} m2"
            ),
            DiagnosticKind::SensorFraction { sensor, fraction } => write!(
                f,
                "sensor {sensor} controls {:.1}% of the zone lighting",
                fraction * 100.0
            ),
            DiagnosticKind::FractionClamped { sensor, from, to } => {
                write!(f, "sensor {sensor} fraction reduced from {from} to {to}")
            }
            DiagnosticKind::MissingAnchor { sensor } => {
                write!(f, "no opening available to site sensor {sensor}")
            }
            DiagnosticKind::UnknownVisibleTransmittance => write!(
                f,
                "visible transmittance unknown, excluded from effective aperture"
            ),
            DiagnosticKind::NoThermalZone => {
                write!(f, "room has no thermal zone, cannot attach daylighting controls")
            }
        }
    }
}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub room: String,
    pub opening: Option<String>,
    pub kind: DiagnosticKind,
}

/// Per-room diagnostics accumulator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    room: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            entries: Vec::new(),
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Record a diagnostic and emit it as a tracing event
    pub fn push(&mut self, severity: Severity, opening: Option<&str>, kind: DiagnosticKind) {
        let room = self.room.as_str();
        match severity {
            Severity::Debug => tracing::debug!(room, opening, "{}", kind),
            Severity::Info => tracing::info!(room, opening, "{}", kind),
            Severity::Warning => tracing::warn!(room, opening, "{}", kind),
            Severity::Error => tracing::error!(room, opening, "{}", kind),
        }

        self.entries.push(Diagnostic {
            severity,
            room: self.room.clone(),
            opening: opening.map(str::to_string),
            kind,
        });
    }

    pub fn debug(&mut self, kind: DiagnosticKind) {
        self.push(Severity::Debug, None, kind);
    }

    pub fn info(&mut self, kind: DiagnosticKind) {
        self.push(Severity::Info, None, kind);
    }

    pub fn warn(&mut self, kind: DiagnosticKind) {
        self.push(Severity::Warning, None, kind);
    }

    pub fn error(&mut self, kind: DiagnosticKind) {
        self.push(Severity::Error, None, kind);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry's kind matches the predicate
    pub fn any(&self, predicate: impl Fn(&DiagnosticKind) -> bool) -> bool {
        self.entries.iter().any(|d| predicate(&d.kind))
    }

    /// Number of entries at or above a severity
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity >= severity).count()
    }
}
