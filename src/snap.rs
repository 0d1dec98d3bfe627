//! Snap resolution: what a pointer position means.
//!
//! Priority, first tier to match wins: a terminal, an existing wire end, a
//! grid point that lies on a wire body, then the bare grid point. Within the
//! terminal and wire-end tiers the nearest candidate is taken.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::Serialize;

use crate::config::EditorConfig;
use crate::doc::{Endpoint, Schematic, WireId};
use crate::geom::{Point, snap_point};
use crate::hit::nearest_terminal;
use crate::terminal::{Terminal, all_terminals};

/// What a snapped point is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapTarget {
    Terminal(Terminal),
    WireEndpoint {
        wire: WireId,
        end: Endpoint,
    },
    WireBody {
        wire: WireId,
    },
    Grid,
}

/// A resolved pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snap {
    pub point: Point,
    pub target: SnapTarget,
}

impl Snap {
    /// The wire whose body this snap landed on, if any.
    #[must_use]
    pub fn body_wire(&self) -> Option<WireId> {
        match self.target {
            SnapTarget::WireBody { wire } => Some(wire),
            _ => None,
        }
    }
}

/// Resolve `p` against everything in `doc`.
#[must_use]
pub fn resolve(p: Point, doc: &Schematic, config: &EditorConfig) -> Snap {
    resolve_excluding(p, doc, config, &[])
}

/// Resolve `p`, ignoring the ends and bodies of the wires in `exclude`.
///
/// Used while dragging an endpoint, so the wires riding on it do not snap to
/// themselves.
#[must_use]
pub fn resolve_excluding(p: Point, doc: &Schematic, config: &EditorConfig, exclude: &[WireId]) -> Snap {
    let terminals = all_terminals(doc.components());
    if let Some(t) = nearest_terminal(p, &terminals, config.terminal_snap_radius) {
        return Snap { point: t.point, target: SnapTarget::Terminal(t) };
    }

    let nearest_end = doc
        .wires()
        .iter()
        .filter(|w| !exclude.contains(&w.id))
        .flat_map(|w| [(w, Endpoint::Start), (w, Endpoint::End)])
        .map(|(w, end)| (w.point(end).dist(p), w, end))
        .filter(|&(d, _, _)| d < config.wire_end_snap_radius)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, w, end)) = nearest_end {
        return Snap { point: w.point(end), target: SnapTarget::WireEndpoint { wire: w.id, end } };
    }

    let grid = snap_point(p, config.grid_size);
    let on_body = doc
        .wires()
        .iter()
        .rev()
        .filter(|w| !exclude.contains(&w.id) && w.distance_to(p) < config.wire_body_snap_radius)
        .find(|w| w.passes_through(grid));
    if let Some(w) = on_body {
        return Snap { point: grid, target: SnapTarget::WireBody { wire: w.id } };
    }

    Snap { point: grid, target: SnapTarget::Grid }
}

