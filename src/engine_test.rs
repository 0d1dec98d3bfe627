#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn none() -> Modifiers {
    Modifiers::default()
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, none());
    core.on_pointer_move(to, none());
    core.on_pointer_up(to, Button::Primary, none())
}

fn has_checkpoint(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::Checkpoint(_)))
}

fn wire_with_end(core: &EngineCore, p: Point) -> Option<&Wire> {
    core.doc.wires().iter().find(|w| w.start == p || w.end == p)
}

// =============================================================
// Drawing wires
// =============================================================

#[test]
fn draw_wire_on_grid() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Wire);
    let actions = drag(&mut core, pt(3.0, 2.0), pt(118.0, 61.0));

    assert!(has_checkpoint(&actions));
    assert!(actions.iter().any(|a| matches!(a, Action::WireCreated(_))));
    let [w] = core.doc.wires() else {
        panic!("expected one wire");
    };
    assert_eq!(w.start, pt(0.0, 0.0));
    assert_eq!(w.end, pt(120.0, 60.0));
    assert_eq!(w.bend, Bend::HorizontalFirst);
    assert!(core.input.is_idle());
}

#[test]
fn zero_length_draw_creates_nothing() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Wire);
    let actions = drag(&mut core, pt(40.0, 40.0), pt(42.0, 38.0));
    assert!(!has_checkpoint(&actions));
    assert!(core.doc.wires().is_empty());
}

#[test]
fn draw_from_horizontal_terminal_leaves_horizontally() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.set_tool(Tool::Wire);
    drag(&mut core, pt(142.0, 98.0), pt(200.0, 160.0));

    let w = wire_with_end(&core, pt(140.0, 100.0)).expect("attached wire");
    assert_eq!(w.start, pt(140.0, 100.0));
    assert_eq!(w.bend, Bend::HorizontalFirst);
}

#[test]
fn draw_from_vertical_terminal_leaves_vertically() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.rotate_selected(1);
    let c = &core.doc.components()[0];
    assert!(c.rotation.is_vertical());
    let top = terminals_of(c).iter().map(|t| t.point).find(|p| p.y < 100.0).expect("top terminal");

    core.set_tool(Tool::Wire);
    drag(&mut core, top, pt(160.0, 0.0));
    let w = wire_with_end(&core, top).expect("attached wire");
    assert_eq!(w.bend, Bend::VerticalFirst);
}

#[test]
fn draw_onto_wire_body_splits_it_into_a_tee() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(200.0, 0.0), Bend::HorizontalFirst));
    core.set_tool(Tool::Wire);
    drag(&mut core, pt(100.0, 100.0), pt(101.0, 1.0));

    assert_eq!(core.doc.wires().len(), 3);
    assert!(core.doc.wires().iter().all(|w| !w.is_degenerate()));
    assert_eq!(core.junctions(), vec![pt(100.0, 0.0)]);
}

#[test]
fn drawing_along_an_existing_wire_adds_nothing() {
    let mut core = EngineCore::new();
    let existing = Wire::new(pt(0.0, 0.0), pt(200.0, 0.0), Bend::HorizontalFirst);
    core.doc.insert_wire(existing.clone());
    core.set_tool(Tool::Wire);
    let actions = drag(&mut core, pt(60.0, 3.0), pt(140.0, 3.0));

    assert!(!has_checkpoint(&actions));
    assert!(!actions.iter().any(|a| matches!(a, Action::WireCreated(_))));
    assert_eq!(core.doc.wires(), std::slice::from_ref(&existing));
    assert!(core.junctions().is_empty());
    assert!(core.input.is_idle());
}

#[test]
fn extending_a_wire_merges_into_it() {
    let mut core = EngineCore::new();
    let existing = Wire::new(pt(0.0, 0.0), pt(100.0, 0.0), Bend::HorizontalFirst);
    let existing_id = existing.id;
    core.doc.insert_wire(existing);
    core.set_tool(Tool::Wire);
    let actions = drag(&mut core, pt(101.0, 2.0), pt(200.0, 0.0));

    assert!(has_checkpoint(&actions));
    assert!(!actions.iter().any(|a| matches!(a, Action::WireCreated(_))));
    let [w] = core.doc.wires() else {
        panic!("expected the extension to merge");
    };
    assert_eq!(w.id, existing_id);
    assert_eq!((w.start, w.end), (pt(0.0, 0.0), pt(200.0, 0.0)));
}

#[test]
fn wire_preview_follows_pointer() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Wire);
    assert!(core.wire_preview().is_none());
    core.on_pointer_down(pt(0.0, 0.0), Button::Primary, none());
    core.on_pointer_move(pt(79.0, 41.0), none());
    let preview = core.wire_preview().expect("preview");
    assert_eq!(preview.start, pt(0.0, 0.0));
    assert_eq!(preview.end, pt(80.0, 40.0));
    assert!(core.doc.wires().is_empty());
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Wire);
    assert!(core.on_pointer_down(pt(0.0, 0.0), Button::Secondary, none()).is_empty());
    assert!(core.input.is_idle());
}

// =============================================================
// Endpoint drag
// =============================================================

#[test]
fn endpoint_drag_carries_the_cluster() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(100.0, 0.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(100.0, 0.0), pt(100.0, 100.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(100.0, 0.0), pt(200.0, 0.0), Bend::HorizontalFirst));

    let actions = drag(&mut core, pt(100.0, 0.0), pt(100.0, -40.0));
    assert!(has_checkpoint(&actions));
    assert_eq!(core.doc.wires().len(), 3);
    let at_new = core
        .doc
        .wires()
        .iter()
        .filter(|w| w.start == pt(100.0, -40.0) || w.end == pt(100.0, -40.0))
        .count();
    assert_eq!(at_new, 3);
    assert!(core.doc.wires().iter().all(|w| w.start != pt(100.0, 0.0) && w.end != pt(100.0, 0.0)));
}

#[test]
fn endpoint_click_without_motion_changes_nothing() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(100.0, 0.0), Bend::HorizontalFirst));
    let before = core.doc.wires().to_vec();
    let actions = drag(&mut core, pt(100.0, 0.0), pt(101.0, 1.0));
    assert!(!has_checkpoint(&actions));
    assert_eq!(core.doc.wires(), before.as_slice());
}

#[test]
fn endpoint_dropped_on_body_splits_it() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(200.0, 0.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(100.0, 100.0), pt(100.0, 60.0), Bend::HorizontalFirst));

    drag(&mut core, pt(100.0, 60.0), pt(100.0, 0.0));
    assert_eq!(core.doc.wires().len(), 3);
    assert_eq!(core.junctions(), vec![pt(100.0, 0.0)]);
}

// =============================================================
// Body drag
// =============================================================

#[test]
fn body_drag_bridges_terminal_and_merges_to_a_bend() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.doc.insert_wire(Wire::new(pt(140.0, 100.0), pt(140.0, 200.0), Bend::HorizontalFirst));

    let actions = drag(&mut core, pt(140.0, 150.0), pt(181.0, 150.0));
    assert!(has_checkpoint(&actions));

    let [w] = core.doc.wires() else {
        panic!("expected the bridge to merge into one wire");
    };
    assert!(!w.smart_bridge);
    let ends = [w.start, w.end];
    assert!(ends.contains(&pt(140.0, 100.0)));
    assert!(ends.contains(&pt(180.0, 200.0)));
    assert_eq!(w.corner(), Some(pt(180.0, 100.0)));
}

#[test]
fn body_drag_below_one_grid_step_rolls_back_bridges() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.doc.insert_wire(Wire::new(pt(140.0, 100.0), pt(140.0, 200.0), Bend::HorizontalFirst));
    let before = core.doc.wires().to_vec();

    let actions = drag(&mut core, pt(140.0, 150.0), pt(150.0, 150.0));
    assert!(!has_checkpoint(&actions));
    assert_eq!(core.doc.wires(), before.as_slice());
}

#[test]
fn cancel_restores_the_model() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(0.0, 200.0), Bend::HorizontalFirst));
    let before = core.doc.wires().to_vec();

    core.on_pointer_down(pt(0.0, 100.0), Button::Primary, none());
    core.on_pointer_move(pt(60.0, 100.0), none());
    assert_ne!(core.doc.wires(), before.as_slice());
    core.cancel();
    assert!(core.input.is_idle());
    assert_eq!(core.doc.wires(), before.as_slice());
}

// =============================================================
// Components
// =============================================================

#[test]
fn drop_names_and_selects() {
    let mut core = EngineCore::new();
    let actions = core.drop_component("resistor", pt(91.0, 108.0));
    assert!(has_checkpoint(&actions));
    assert!(matches!(&actions[1], Action::ComponentCreated { name, .. } if name == "R1"));
    let c = &core.doc.components()[0];
    assert_eq!(c.position, pt(100.0, 100.0));
    assert_eq!(core.ui.selected_components, vec![c.id]);

    core.drop_component("resistor", pt(300.0, 100.0));
    assert_eq!(core.doc.components()[1].name, "R2");
}

#[test]
fn drop_unknown_kind_is_ignored() {
    let mut core = EngineCore::new();
    assert!(core.drop_component("flux_capacitor", pt(0.0, 0.0)).is_empty());
    assert!(core.doc.is_empty());
}

#[test]
fn drop_on_wire_splices() {
    let mut core = EngineCore::new();
    core.doc.insert_wire(Wire::new(pt(0.0, 100.0), pt(200.0, 100.0), Bend::HorizontalFirst));
    let actions = core.drop_component("resistor", pt(100.0, 100.0));
    assert!(actions.iter().any(|a| matches!(a, Action::ComponentSpliced { .. })));

    assert_eq!(core.doc.wires().len(), 2);
    assert!(wire_with_end(&core, pt(60.0, 100.0)).is_some());
    assert!(wire_with_end(&core, pt(140.0, 100.0)).is_some());
    assert!(core.doc.wires().iter().all(|w| w.distance_to(pt(100.0, 100.0)) >= 40.0));
}

#[test]
fn component_drag_pulls_attached_wire() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.doc.insert_wire(Wire::new(pt(140.0, 100.0), pt(240.0, 100.0), Bend::HorizontalFirst));

    let actions = drag(&mut core, pt(100.0, 100.0), pt(100.0, 141.0));
    assert!(has_checkpoint(&actions));
    assert_eq!(core.doc.components()[0].position, pt(100.0, 140.0));
    let [w] = core.doc.wires() else {
        panic!("expected one wire");
    };
    assert_eq!(w.start, pt(140.0, 140.0));
    assert_eq!(w.end, pt(240.0, 100.0));
    assert_eq!(w.bend, Bend::HorizontalFirst);
}

#[test]
fn component_dragged_onto_wire_splices() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 0.0));
    core.doc.insert_wire(Wire::new(pt(0.0, 200.0), pt(300.0, 200.0), Bend::HorizontalFirst));

    let actions = drag(&mut core, pt(100.0, 0.0), pt(100.0, 200.0));
    assert!(actions.iter().any(|a| matches!(a, Action::ComponentSpliced { .. })));
    assert_eq!(core.doc.wires().len(), 2);
}

#[test]
fn rotate_and_flip_need_a_selection() {
    let mut core = EngineCore::new();
    assert!(core.rotate_selected(1).is_empty());
    core.drop_component("npn", pt(0.0, 0.0));
    let actions = core.rotate_selected(1);
    assert!(has_checkpoint(&actions));
    assert_eq!(core.doc.components()[0].rotation, Rotation::R270);
    core.flip_selected(Axis::Horizontal);
    assert!(core.doc.components()[0].flip_x);
    assert!(!core.doc.components()[0].flip_y);
}

#[test]
fn set_kind_label_and_value() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(0.0, 0.0));
    let id = core.doc.components()[0].id;
    assert!(has_checkpoint(&core.set_value(&id, "4k7".into())));
    assert!(has_checkpoint(&core.set_label(&id, "R_{load}".into())));
    assert!(has_checkpoint(&core.set_component_kind(&id, "npn")));
    assert!(core.set_component_kind(&id, "flux_capacitor").is_empty());

    let c = core.component(&id).expect("component");
    assert_eq!(c.value, "4k7");
    assert_eq!(c.label, "R_{load}");
    assert_eq!(c.kind, "npn");
    assert_eq!(c.symbol.terminals.len(), 3);
}

#[test]
fn delete_selected_prunes_selection() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(0.0, 0.0));
    let actions = core.delete_selected();
    assert!(has_checkpoint(&actions));
    assert!(core.doc.components().is_empty());
    assert!(!core.ui.has_selection());
    assert!(core.delete_selected().is_empty());
}

// =============================================================
// Area select
// =============================================================

#[test]
fn area_select_picks_centers_and_wire_ends() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.drop_component("resistor", pt(500.0, 500.0));
    core.doc.insert_wire(Wire::new(pt(200.0, 300.0), pt(400.0, 300.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(600.0, 0.0), pt(600.0, 40.0), Bend::HorizontalFirst));

    let actions = drag(&mut core, pt(300.0, 350.0), pt(0.0, 0.0));
    assert!(actions.iter().any(|a| matches!(a, Action::SelectionChanged)));
    assert_eq!(core.ui.selected_components, vec![core.doc.components()[0].id]);
    assert_eq!(core.ui.selected_wires, vec![core.doc.wires()[0].id]);
}

// =============================================================
// Clipboard
// =============================================================

#[test]
fn paste_offsets_renames_and_selects_the_copies() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    let lead = Wire::new(pt(140.0, 100.0), pt(200.0, 100.0), Bend::HorizontalFirst);
    core.ui.selected_wires.push(lead.id);
    core.doc.insert_wire(lead);
    assert!(core.copy_selected());

    let actions = core.paste();
    assert!(has_checkpoint(&actions));
    assert_eq!(core.doc.components().len(), 2);
    assert_eq!(core.doc.wires().len(), 2);

    let [c] = core.ui.selected_components.as_slice() else {
        panic!("expected the pasted component selected");
    };
    let pasted = core.component(c).expect("pasted component");
    assert_eq!(pasted.name, "R2");
    assert_eq!(pasted.position, pt(120.0, 120.0));
    let [w] = core.ui.selected_wires.as_slice() else {
        panic!("expected the pasted wire selected");
    };
    let w = core.wire(w).expect("pasted wire");
    assert_eq!((w.start, w.end), (pt(160.0, 120.0), pt(220.0, 120.0)));

    // Pasting again steps further instead of stacking.
    core.paste();
    let names: Vec<&str> = core.doc.components().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["R1", "R2", "R3"]);
    assert_eq!(core.doc.components()[2].position, pt(140.0, 140.0));
    assert_eq!(core.doc.wires().len(), 3);
}

#[test]
fn cut_then_paste_brings_the_selection_back() {
    let mut core = EngineCore::new();
    core.drop_component("capacitor", pt(0.0, 0.0));
    let actions = core.cut_selected();
    assert!(has_checkpoint(&actions));
    assert!(core.doc.components().is_empty());

    core.paste();
    let [c] = core.doc.components() else {
        panic!("expected one pasted component");
    };
    assert_eq!(c.kind, "capacitor");
    assert_eq!(c.position, pt(20.0, 20.0));
}

#[test]
fn empty_selection_or_clipboard_does_nothing() {
    let mut core = EngineCore::new();
    assert!(core.paste().is_empty());
    assert!(!core.copy_selected());
    assert!(core.cut_selected().is_empty());
    assert!(core.paste().is_empty());
}

#[test]
fn set_style_checkpoints_only_on_change() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(0.0, 0.0));
    let id = core.doc.components()[0].id;
    assert!(core.set_style(&id, "default".into()).is_empty());
    assert!(has_checkpoint(&core.set_style(&id, "european".into())));
    assert_eq!(core.component(&id).expect("component").style, "european");
    assert_eq!(core.snapshot().components[0].style, "european");
}

// =============================================================
// Snapshots and scene
// =============================================================

#[test]
fn checkpoint_restores_previous_state() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Wire);
    let actions = drag(&mut core, pt(0.0, 0.0), pt(100.0, 0.0));
    let Some(Action::Checkpoint(before)) = actions.first() else {
        panic!("expected checkpoint first");
    };
    let before = before.clone();
    assert_eq!(core.doc.wires().len(), 1);

    core.restore(&before).expect("restore");
    assert!(core.doc.wires().is_empty());
}

#[test]
fn scene_serializes_with_junctions_and_anchors() {
    let mut core = EngineCore::new();
    core.drop_component("resistor", pt(100.0, 100.0));
    core.drop_component("ground", pt(300.0, 300.0));
    core.doc.insert_wire(Wire::new(pt(0.0, 0.0), pt(200.0, 0.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(100.0, 0.0), pt(100.0, -60.0), Bend::HorizontalFirst));
    core.doc.insert_wire(Wire::new(pt(140.0, 100.0), pt(200.0, 40.0), Bend::VerticalFirst));

    let scene = core.scene();
    assert_eq!(scene.junctions, vec![pt(100.0, 0.0)]);
    assert_eq!(scene.components[0].terminals.len(), 2);
    assert_eq!(scene.wires[2].corner, Some(pt(140.0, 40.0)));
    assert!(scene.anchors.lookup(pt(140.0, 100.0)).is_none());
    assert_eq!(scene.anchors.lookup(pt(300.0, 260.0)), Some("GND1"));

    let json = serde_json::to_value(&scene).expect("json");
    assert_eq!(json["wires"][2]["bend"], "vh");
    assert_eq!(json["components"][0]["rotation"], 0);
}
