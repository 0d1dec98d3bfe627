use uuid::Uuid;

use super::*;

// =============================================================
// Tool / Modifiers
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
    assert_ne!(Tool::Select, Tool::Wire);
}

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
    assert!(!m.extends_selection());
}

#[test]
fn shift_ctrl_or_meta_extend_selection() {
    assert!(Modifiers { shift: true, ..Default::default() }.extends_selection());
    assert!(Modifiers { ctrl: true, ..Default::default() }.extends_selection());
    assert!(Modifiers { meta: true, ..Default::default() }.extends_selection());
    assert!(!Modifiers { alt: true, ..Default::default() }.extends_selection());
}

// =============================================================
// UiState
// =============================================================

#[test]
fn select_replaces_and_add_extends() {
    let mut ui = UiState::default();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    ui.select_component(a);
    ui.add_component(b);
    ui.add_component(b);
    assert_eq!(ui.selected_components, vec![a, b]);
    let w = Uuid::new_v4();
    ui.select_wire(w);
    assert!(ui.selected_components.is_empty());
    assert_eq!(ui.selected_wires, vec![w]);
    assert!(ui.has_selection());
    ui.clear_selection();
    assert!(!ui.has_selection());
}

#[test]
fn retain_drops_stale_ids() {
    let mut ui = UiState::default();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    ui.selected_components = vec![a, b];
    ui.selected_wires = vec![Uuid::new_v4()];
    ui.retain(|id| *id == a, |_| false);
    assert_eq!(ui.selected_components, vec![a]);
    assert!(ui.selected_wires.is_empty());
    assert!(ui.is_component_selected(&a));
    assert!(!ui.is_component_selected(&b));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
    assert!(InputState::default().selection_rect().is_none());
}

#[test]
fn area_select_rect_is_normalized() {
    let state = InputState::AreaSelecting { anchor: Point::new(50.0, 10.0), current: Point::new(10.0, 40.0) };
    let rect = state.selection_rect().expect("rect");
    assert_eq!(rect.min, Point::new(10.0, 10.0));
    assert_eq!(rect.max, Point::new(50.0, 40.0));
    assert!(!state.is_idle());
}
