//! Splicing a two-terminal component into an existing wire.

#[cfg(test)]
#[path = "splice_test.rs"]
mod splice_test;

use crate::doc::{ComponentId, Schematic, Wire};
use crate::hit::wire_at;
use crate::terminal::terminals_of;
use crate::wire::Axis;

/// Insert a placed two-terminal component into the wire under its center.
///
/// The wire is replaced by two wires running from its ends to the
/// component's terminals, paired to minimize total length. Both inherit the
/// original bend. Declines (returns `false`, no mutation) for a stale id, a
/// component without exactly two terminals, no wire within `hit_radius` of
/// the center, or a component whose orientation does not match the struck leg.
pub fn insert_on_wire(doc: &mut Schematic, id: &ComponentId, hit_radius: f64) -> bool {
    let Some(component) = doc.component(id) else {
        return false;
    };
    let terminals = terminals_of(component);
    let [t1, t2] = terminals.as_slice() else {
        return false;
    };
    let center = component.position;
    let orientation = if component.rotation.is_vertical() { Axis::Vertical } else { Axis::Horizontal };

    let Some(wire_id) = wire_at(center, doc.wires(), hit_radius) else {
        return false;
    };
    let Some(wire) = doc.wire(&wire_id) else {
        return false;
    };
    if wire.segment_at(center).axis() != orientation {
        return false;
    }

    let (a, b) = (wire.start, wire.end);
    let keep = a.dist(t1.point) + b.dist(t2.point) < a.dist(t2.point) + b.dist(t1.point);
    let (from, to) = if keep { (a, b) } else { (b, a) };
    let first = Wire::new(from, t1.point, wire.bend);
    let second = Wire::new(t2.point, to, wire.bend);

    tracing::debug!(component = %id, wire = %wire_id, "splice component into wire");
    doc.remove_wire(&wire_id);
    doc.insert_wire(first);
    doc.insert_wire(second);
    true
}
