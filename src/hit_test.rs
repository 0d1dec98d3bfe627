#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Bend, Rotation};
use crate::symbol::SymbolLibrary;
use crate::terminal::all_terminals;
use crate::wire::Axis;

fn resistor_at(x: f64, y: f64) -> Component {
    let lib = SymbolLibrary::builtin();
    Component::new(lib.get("resistor").expect("resistor"), "R1".into(), Point::new(x, y))
}

fn wire(x1: f64, y1: f64, x2: f64, y2: f64) -> Wire {
    Wire::new(Point::new(x1, y1), Point::new(x2, y2), Bend::HorizontalFirst)
}

// =============================================================
// component_at
// =============================================================

#[test]
fn component_box_includes_padding() {
    let r = resistor_at(100.0, 100.0);
    let id = r.id;
    let comps = [r];
    // 80x20 box, padding 10: x in [50, 150], y in [80, 120]
    assert_eq!(component_at(Point::new(50.0, 80.0), &comps, 10.0), Some(id));
    assert_eq!(component_at(Point::new(100.0, 121.0), &comps, 10.0), None);
}

#[test]
fn component_box_swaps_when_rotated() {
    let mut r = resistor_at(100.0, 100.0);
    r.rotation = Rotation::R90;
    let id = r.id;
    let comps = [r];
    assert_eq!(component_at(Point::new(100.0, 145.0), &comps, 10.0), Some(id));
    assert_eq!(component_at(Point::new(140.0, 100.0), &comps, 10.0), None);
}

#[test]
fn later_components_are_on_top() {
    let a = resistor_at(100.0, 100.0);
    let b = resistor_at(110.0, 100.0);
    let top = b.id;
    assert_eq!(component_at(Point::new(105.0, 100.0), &[a, b], 10.0), Some(top));
}

// =============================================================
// Wires
// =============================================================

#[test]
fn wire_at_prefers_newest() {
    let a = wire(0.0, 0.0, 100.0, 0.0);
    let b = wire(0.0, 4.0, 100.0, 4.0);
    let newest = b.id;
    assert_eq!(wire_at(Point::new(50.0, 2.0), &[a, b], 12.0), Some(newest));
    assert_eq!(wire_at(Point::new(50.0, 40.0), &[wire(0.0, 0.0, 100.0, 0.0)], 12.0), None);
}

#[test]
fn wire_at_checks_both_legs() {
    let w = Wire::new(Point::new(0.0, 0.0), Point::new(60.0, 60.0), Bend::VerticalFirst);
    let id = w.id;
    let wires = [w];
    assert_eq!(wire_at(Point::new(30.0, 58.0), &wires, 12.0), Some(id));
    assert_eq!(wire_at(Point::new(30.0, 2.0), &wires, 12.0), None);
}

#[test]
fn endpoint_hit_reports_exact_point() {
    let w = wire(0.0, 0.0, 100.0, 0.0);
    let id = w.id;
    let hit = wire_endpoint_at(Point::new(97.0, 3.0), &[w], 8.0);
    assert_eq!(hit, Some((id, Endpoint::End, Point::new(100.0, 0.0))));
}

// =============================================================
// Terminals
// =============================================================

#[test]
fn nearest_terminal_picks_closest_within_radius() {
    let comps = [resistor_at(100.0, 100.0)];
    let terms = all_terminals(&comps);
    let t = nearest_terminal(Point::new(66.0, 104.0), &terms, 15.0).expect("terminal");
    assert_eq!(t.point, Point::new(60.0, 100.0));
    assert_eq!(t.index, 0);
    assert!(nearest_terminal(Point::new(100.0, 100.0), &terms, 15.0).is_none());
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn endpoint_beats_component_beats_body() {
    let mut doc = Schematic::new();
    let r = resistor_at(100.0, 100.0);
    let rid = r.id;
    doc.insert_component(r);
    let w = wire(140.0, 100.0, 240.0, 100.0);
    let wid = w.id;
    doc.insert_wire(w);
    let config = EditorConfig::default();

    let hit = hit_test(Point::new(142.0, 100.0), &doc, &config).expect("endpoint");
    assert_eq!(hit.id, wid);
    assert_eq!(hit.part, HitPart::WireEndpoint(Endpoint::Start));

    let hit = hit_test(Point::new(100.0, 100.0), &doc, &config).expect("component");
    assert_eq!(hit.id, rid);
    assert_eq!(hit.part, HitPart::Component);

    let hit = hit_test(Point::new(200.0, 105.0), &doc, &config).expect("body");
    assert_eq!(hit.id, wid);
    assert_eq!(hit.part, HitPart::WireBody(WireSegment::Straight(Axis::Horizontal)));

    assert!(hit_test(Point::new(400.0, 400.0), &doc, &config).is_none());
}
