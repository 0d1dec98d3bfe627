//! Canonicalization: keep the wire set minimal.
//!
//! Degenerate wires are pruned, as are straight wires lying entirely on
//! another wire. Then pairs of wires that meet end-to-end at a non-junction
//! point are merged until nothing changes. Splitting is the
//! inverse, used when a new connection lands on a wire's body.

#[cfg(test)]
#[path = "canon_test.rs"]
mod canon_test;

use uuid::Uuid;

use crate::consts::MERGE_EPS;
use crate::doc::{Bend, Endpoint, Schematic, Wire, WireId};
use crate::geom::Point;
use crate::junction::is_junction;
use crate::terminal::{Terminal, all_terminals};
use crate::wire::Axis;

/// What a cleanup pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub pruned: usize,
    pub covered: usize,
    pub merged: usize,
}

/// Canonicalize the wires of `doc` against its current terminals.
pub fn cleanup_wires(doc: &mut Schematic) -> CleanupStats {
    let (components, wires) = doc.parts_mut();
    let terminals = all_terminals(components);
    cleanup(wires, &terminals)
}

/// Prune degenerate and covered wires, then merge to a fixed point.
///
/// Each pass scans pairs in list order and applies the first merge found;
/// the merged wire takes the first wire's slot and id.
pub fn cleanup(wires: &mut Vec<Wire>, terminals: &[Terminal]) -> CleanupStats {
    let before = wires.len();
    wires.retain(|w| !w.is_degenerate());
    let mut stats = CleanupStats { pruned: before - wires.len(), ..CleanupStats::default() };

    while let Some(j) = find_covered(wires) {
        tracing::debug!(wire = %wires[j].id, "drop covered wire");
        wires.remove(j);
        stats.covered += 1;
    }

    while let Some((i, j, merged)) = find_merge(wires, terminals) {
        tracing::debug!(kept = %wires[i].id, absorbed = %wires[j].id, "merge wires");
        wires.remove(j);
        wires[i] = merged;
        stats.merged += 1;
    }
    stats
}

/// The last straight wire whose whole span lies on a leg of another wire.
///
/// Scanning from the back drops the newer of two identical wires.
fn find_covered(wires: &[Wire]) -> Option<usize> {
    (0..wires.len())
        .rev()
        .find(|&j| wires.iter().enumerate().any(|(i, outer)| i != j && covers(outer, &wires[j])))
}

/// Whether straight `inner` lies on one leg of `outer`, ends included.
#[must_use]
pub fn covers(outer: &Wire, inner: &Wire) -> bool {
    let Some(axis) = inner.straight_axis() else {
        return false;
    };
    outer
        .segments()
        .iter()
        .any(|s| s.axis == axis && s.distance_to(inner.start) <= MERGE_EPS && s.distance_to(inner.end) <= MERGE_EPS)
}

fn find_merge(wires: &[Wire], terminals: &[Terminal]) -> Option<(usize, usize, Wire)> {
    for i in 0..wires.len() {
        for j in i + 1..wires.len() {
            let Some(shared) = shared_endpoint(&wires[i], &wires[j]) else {
                continue;
            };
            if is_junction(shared, wires, terminals) {
                continue;
            }
            if let Some(merged) = merge_wires(&wires[i], &wires[j]) {
                return Some((i, j, merged));
            }
        }
    }
    None
}

/// The first point where an end of `a` meets an end of `b`.
#[must_use]
pub fn shared_endpoint(a: &Wire, b: &Wire) -> Option<Point> {
    shared_ends(a, b).map(|(ea, _)| a.point(ea))
}

fn shared_ends(a: &Wire, b: &Wire) -> Option<(Endpoint, Endpoint)> {
    const PAIRS: [(Endpoint, Endpoint); 4] = [
        (Endpoint::Start, Endpoint::Start),
        (Endpoint::Start, Endpoint::End),
        (Endpoint::End, Endpoint::Start),
        (Endpoint::End, Endpoint::End),
    ];
    PAIRS
        .into_iter()
        .find(|&(ea, eb)| a.point(ea).near(b.point(eb), MERGE_EPS))
}

/// Combine two wires meeting end-to-end into one, if their shapes allow it.
///
/// Mergeable shapes:
/// - two collinear straights (the result spans both, overlaps included);
/// - a straight that extends a bent wire's end leg outward;
/// - two perpendicular straights, which become one bent wire.
///
/// The result keeps `a`'s id. The junction guard is the caller's job.
#[must_use]
pub fn merge_wires(a: &Wire, b: &Wire) -> Option<Wire> {
    let (ea, eb) = shared_ends(a, b)?;
    let p = a.point(ea);
    let far_a = a.point(ea.other());
    let far_b = b.point(eb.other());

    match (a.straight_axis(), b.straight_axis()) {
        (Some(axis_a), Some(axis_b)) if axis_a == axis_b => Some(merge_collinear(a, axis_a, p, far_a, far_b)),
        (Some(axis_a), Some(_)) => {
            let bend = Bend::with_leg_at(Endpoint::Start, axis_a);
            Some(Wire { id: a.id, start: far_a, end: far_b, bend, smart_bridge: false })
        }
        (Some(axis_a), None) => extend_bent(b, eb, axis_a, far_a).map(|w| Wire { id: a.id, ..w }),
        (None, Some(axis_b)) => extend_bent(a, ea, axis_b, far_b),
        (None, None) => None,
    }
}

fn merge_collinear(a: &Wire, axis: Axis, p: Point, far_a: Point, far_b: Point) -> Wire {
    let along = |q: Point| match axis {
        Axis::Horizontal => q.x,
        Axis::Vertical => q.y,
    };
    let opposite = (along(far_a) - along(p)) * (along(far_b) - along(p)) < 0.0;
    let (start, end) = if opposite {
        (far_a, far_b)
    } else {
        // Overlapping runs: keep the union, oriented like `a`.
        let pts = [a.start, a.end, far_b];
        let lo = pts.into_iter().min_by(|l, r| along(*l).total_cmp(&along(*r))).unwrap_or(a.start);
        let hi = pts.into_iter().max_by(|l, r| along(*l).total_cmp(&along(*r))).unwrap_or(a.end);
        if along(a.start) <= along(a.end) { (lo, hi) } else { (hi, lo) }
    };
    Wire { id: a.id, start, end, bend: a.bend, smart_bridge: false }
}

/// Replace `end` of the bent wire with `far` when the straight run from
/// `end` to `far` continues the end leg away from the corner.
fn extend_bent(bent: &Wire, end: Endpoint, straight_axis: Axis, far: Point) -> Option<Wire> {
    if bent.axis_at(end) != straight_axis {
        return None;
    }
    let corner = bent.corner()?;
    let p = bent.point(end);
    let outward = match straight_axis {
        Axis::Horizontal => (far.x - p.x) * (p.x - corner.x) > 0.0,
        Axis::Vertical => (far.y - p.y) * (p.y - corner.y) > 0.0,
    };
    if !outward {
        return None;
    }
    let mut merged = bent.clone();
    merged.set_point(end, far);
    merged.smart_bridge = false;
    Some(merged)
}

/// Split a wire in two at a point on its body.
///
/// Both pieces keep the original bend tag, so whichever piece still turns
/// turns at the original corner. Returns `false` (nothing changes) for a
/// stale id or a point that is not strictly inside the wire.
pub fn split_wire_at_point(wires: &mut Vec<Wire>, id: &WireId, p: Point) -> bool {
    let Some(idx) = wires.iter().position(|w| w.id == *id) else {
        return false;
    };
    if !wires[idx].passes_through(p) {
        return false;
    }
    let original = wires.remove(idx);
    let first = Wire { id: Uuid::new_v4(), end: p, smart_bridge: false, ..original.clone() };
    let second = Wire { id: Uuid::new_v4(), start: p, smart_bridge: false, ..original };
    tracing::debug!(wire = %id, x = p.x, y = p.y, "split wire");
    wires.insert(idx, second);
    wires.insert(idx, first);
    true
}

/// The topmost wire whose body passes strictly through `p`.
#[must_use]
pub fn wire_through(wires: &[Wire], p: Point) -> Option<WireId> {
    wires.iter().rev().find(|w| w.passes_through(p)).map(|w| w.id)
}
