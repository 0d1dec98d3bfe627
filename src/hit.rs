#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::EditorConfig;
use crate::doc::{Component, ComponentId, Endpoint, Schematic, Wire, WireId};
use crate::geom::{Point, Rect};
use crate::terminal::Terminal;
use crate::wire::WireSegment;

/// What the select tool grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Component,
    WireEndpoint(Endpoint),
    WireBody(WireSegment),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: uuid::Uuid,
    pub part: HitPart,
    /// The grabbed point: the endpoint itself for endpoint hits, else the query point.
    pub point: Point,
}

/// Test what is under `p` for the select tool.
///
/// Wire endpoints win over components, which win over wire bodies, so a
/// wire ending on a terminal can still be grabbed by its end.
#[must_use]
pub fn hit_test(p: Point, doc: &Schematic, config: &EditorConfig) -> Option<Hit> {
    if let Some((id, end, point)) = wire_endpoint_at(p, doc.wires(), config.endpoint_grab_radius) {
        return Some(Hit { id, part: HitPart::WireEndpoint(end), point });
    }
    if let Some(id) = component_at(p, doc.components(), config.component_hit_padding) {
        return Some(Hit { id, part: HitPart::Component, point: p });
    }
    let id = wire_at(p, doc.wires(), config.wire_hit_radius)?;
    let segment = doc.wire(&id)?.segment_at(p);
    Some(Hit { id, part: HitPart::WireBody(segment), point: p })
}

/// Padded bounding box of a placed component. Quarter turns swap width and height.
#[must_use]
pub fn component_bounds(component: &Component, padding: f64) -> Rect {
    let (w, h) = if component.rotation.is_vertical() {
        (component.symbol.height, component.symbol.width)
    } else {
        (component.symbol.width, component.symbol.height)
    };
    let half = Point::new(w / 2.0 + padding, h / 2.0 + padding);
    Rect::from_corners(
        component.position.offset(-half.x, -half.y),
        component.position.offset(half.x, half.y),
    )
}

/// Topmost component whose padded box contains `p`.
#[must_use]
pub fn component_at(p: Point, components: &[Component], padding: f64) -> Option<ComponentId> {
    components
        .iter()
        .rev()
        .find(|c| component_bounds(c, padding).contains(p))
        .map(|c| c.id)
}

/// Most recently added wire whose body passes within `radius` of `p`.
#[must_use]
pub fn wire_at(p: Point, wires: &[Wire], radius: f64) -> Option<WireId> {
    wires.iter().rev().find(|w| w.distance_to(p) < radius).map(|w| w.id)
}

/// First wire end within `radius` of `p`, with its exact position.
#[must_use]
pub fn wire_endpoint_at(p: Point, wires: &[Wire], radius: f64) -> Option<(WireId, Endpoint, Point)> {
    wires.iter().find_map(|w| {
        [Endpoint::Start, Endpoint::End]
            .into_iter()
            .find(|&end| w.point(end).dist(p) < radius)
            .map(|end| (w.id, end, w.point(end)))
    })
}

/// Closest terminal strictly within `radius` of `p`.
#[must_use]
pub fn nearest_terminal(p: Point, terminals: &[Terminal], radius: f64) -> Option<Terminal> {
    terminals
        .iter()
        .map(|t| (t.point.dist(p), t))
        .filter(|(d, _)| *d < radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, t)| *t)
}
