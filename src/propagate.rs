//! Connectivity propagation.
//!
//! Connectivity is geometric, so moving a point means moving every wire end
//! that sat on it. [`propagate_move`] walks the cluster with an explicit
//! worklist and a visited set keyed by wire id, so closed loops terminate.
//!
//! A wire that was straight and turns diagonal because one of its ends moved
//! gets its bend re-derived from what that end is attached to: the leg at the
//! moved end runs along the attachment's axis (a terminal's pointing axis, or
//! the leg of the wire it was dragged along by).

#[cfg(test)]
#[path = "propagate_test.rs"]
mod propagate_test;

use std::collections::{HashSet, VecDeque};

use crate::consts::{COINCIDENCE_EPS, PIN_RADIUS, PROPAGATION_EPS};
use crate::doc::{Bend, Endpoint, Wire, WireId};
use crate::geom::Point;
use crate::hit::nearest_terminal;
use crate::terminal::Terminal;
use crate::wire::{Axis, WireSegment};

/// Terminals that can pin smart bridges, active only during a body drag.
#[derive(Debug, Clone, Copy, Default)]
pub enum Pinning<'a> {
    #[default]
    Off,
    Bridges(&'a [Terminal]),
}

impl Pinning<'_> {
    fn pins(&self, wire: &Wire, end: Endpoint) -> bool {
        match self {
            Self::Off => false,
            Self::Bridges(terminals) => {
                wire.smart_bridge
                    && end == Endpoint::Start
                    && nearest_terminal(wire.start, terminals, PIN_RADIUS).is_some()
            }
        }
    }
}

/// Move every wire end coincident with `old` to `new`, transitively from `origin`.
///
/// `origin` itself is not touched; the caller has already moved it. Returns
/// the ids of wires that had an end relocated.
pub fn propagate_move(wires: &mut [Wire], origin: WireId, old: Point, new: Point, pinning: Pinning<'_>) -> Vec<WireId> {
    let mut visited = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    let mut moved = Vec::new();

    while let Some(source) = queue.pop_front() {
        let source_axis = wires
            .iter()
            .find(|w| w.id == source)
            .and_then(|w| w.end_at(new, PROPAGATION_EPS).map(|e| w.axis_at(e)));

        for wire in wires.iter_mut().filter(|w| w.id != source) {
            let mut touched = None;
            for end in [Endpoint::Start, Endpoint::End] {
                if !wire.point(end).near(old, PROPAGATION_EPS) || pinning.pins(wire, end) {
                    continue;
                }
                let was_straight = wire.is_straight();
                wire.set_point(end, new);
                if let Some(axis) = source_axis {
                    rederive_bend(wire, end, axis, was_straight);
                }
                touched = Some(end);
            }
            if touched.is_some() {
                tracing::trace!(wire = %wire.id, from = %source, "propagate endpoint");
                if !moved.contains(&wire.id) {
                    moved.push(wire.id);
                }
                if visited.insert(wire.id) {
                    queue.push_back(wire.id);
                }
            }
        }
    }
    moved
}

/// Re-pick the bend of a wire that just turned diagonal so the leg at `end`
/// runs along `axis`. Wires that were already bent keep their tag.
pub fn rederive_bend(wire: &mut Wire, end: Endpoint, axis: Axis, was_straight: bool) {
    if was_straight && !wire.is_straight() {
        wire.bend = Bend::with_leg_at(end, axis);
    }
}

/// Drag the wires attached to a moving component's terminals.
///
/// `terminals` are the component's terminals *before* the move. Every wire
/// end resting on one moves by the delta, then the move propagates through
/// the rest of the cluster. Each wire end moves at most once.
pub fn move_wires_with_component(wires: &mut [Wire], terminals: &[Terminal], dx: f64, dy: f64) -> Vec<WireId> {
    let mut attached: Vec<(usize, Endpoint, Axis)> = Vec::new();
    for term in terminals {
        for (idx, wire) in wires.iter().enumerate() {
            let end = if wire.start.near(term.point, COINCIDENCE_EPS) {
                Endpoint::Start
            } else if wire.end.near(term.point, COINCIDENCE_EPS) {
                Endpoint::End
            } else {
                continue;
            };
            if !attached.iter().any(|&(i, e, _)| i == idx && e == end) {
                attached.push((idx, end, term.axis));
            }
        }
    }

    let mut steps = Vec::with_capacity(attached.len());
    for &(idx, end, axis) in &attached {
        let wire = &mut wires[idx];
        let old = wire.point(end);
        let new = old.offset(dx, dy);
        let was_straight = wire.is_straight();
        wire.set_point(end, new);
        rederive_bend(wire, end, axis, was_straight);
        steps.push((wire.id, old, new));
    }

    let mut moved: Vec<WireId> = steps.iter().map(|(id, _, _)| *id).collect();
    for (id, old, new) in steps {
        for other in propagate_move(wires, id, old, new, Pinning::Off) {
            if !moved.contains(&other) {
                moved.push(other);
            }
        }
    }
    moved
}

/// Drag one leg of a wire by a delta, perpendicular to the leg.
///
/// A straight wire moves as a whole; on a bent wire only the grabbed leg's
/// end moves, lengthening or shortening the other leg. Each end that moved
/// propagates independently. Returns `false` for a stale id or a delta with
/// no perpendicular component.
pub fn move_wire_segment(
    wires: &mut [Wire],
    id: &WireId,
    segment: WireSegment,
    dx: f64,
    dy: f64,
    pinning: Pinning<'_>,
) -> bool {
    let Some(wire) = wires.iter_mut().find(|w| w.id == *id) else {
        return false;
    };
    let shift = |p: Point, axis: Axis| match axis {
        Axis::Horizontal => p.offset(0.0, dy),
        Axis::Vertical => p.offset(dx, 0.0),
    };
    let ends: &[Endpoint] = match segment {
        WireSegment::Straight(_) => &[Endpoint::Start, Endpoint::End],
        WireSegment::First(_) => &[Endpoint::Start],
        WireSegment::Second(_) => &[Endpoint::End],
    };

    let mut steps = Vec::new();
    for &end in ends {
        let old = wire.point(end);
        let new = shift(old, segment.axis());
        if old != new {
            wire.set_point(end, new);
            steps.push((old, new));
        }
    }
    if steps.is_empty() {
        return false;
    }
    let origin = wire.id;
    for (old, new) in steps {
        propagate_move(wires, origin, old, new, pinning);
    }
    true
}
