use serde::Serialize;
use uuid::Uuid;

use crate::canon::{cleanup_wires, covers, split_wire_at_point, wire_through};
use crate::config::EditorConfig;
use crate::consts::{PIN_RADIUS, PROPAGATION_EPS};
use crate::doc::{Bend, Component, ComponentId, Endpoint, Rotation, Schematic, Wire, WireId};
use crate::geom::{Point, Rect, snap_point, snap_to_grid};
use crate::hit::{HitPart, hit_test, nearest_terminal};
use crate::input::{Button, InputState, Modifiers, Tool, UiState};
use crate::junction::find_junctions;
use crate::propagate::{Pinning, move_wire_segment, move_wires_with_component, propagate_move};
use crate::snap::{Snap, SnapTarget, resolve, resolve_excluding};
use crate::snapshot::{Snapshot, SnapshotError};
use crate::splice::insert_on_wire;
use crate::symbol::SymbolLibrary;
use crate::terminal::{AnchorTable, Terminal, all_terminals, terminals_of};
use crate::wire::Axis;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// Model state from before a committed edit, for the host's undo history.
    Checkpoint(Snapshot),
    WireCreated(WireId),
    ComponentCreated { id: ComponentId, name: String },
    /// A dropped or dragged component was spliced into a wire.
    ComponentSpliced { id: ComponentId },
    SelectionChanged,
    RenderNeeded,
}

/// A placed component as the renderer and emitter see it.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub id: ComponentId,
    pub name: String,
    pub kind: String,
    pub position: Point,
    pub rotation: Rotation,
    pub flip_x: bool,
    pub flip_y: bool,
    pub label: String,
    pub value: String,
    pub terminals: Vec<Terminal>,
}

/// A wire with its resolved corner.
#[derive(Debug, Clone, Serialize)]
pub struct WireView {
    pub id: WireId,
    pub start: Point,
    pub end: Point,
    pub bend: Bend,
    pub corner: Option<Point>,
}

/// Read-only output for the renderer and the text emitter.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub components: Vec<ComponentView>,
    pub wires: Vec<WireView>,
    pub junctions: Vec<Point>,
    pub anchors: AnchorTable,
}

impl Scene {
    #[must_use]
    pub fn build(doc: &Schematic) -> Self {
        let terminals = all_terminals(doc.components());
        let components = doc
            .components()
            .iter()
            .map(|c| ComponentView {
                id: c.id,
                name: c.name.clone(),
                kind: c.kind.clone(),
                position: c.position,
                rotation: c.rotation,
                flip_x: c.flip_x,
                flip_y: c.flip_y,
                label: c.label.clone(),
                value: c.value.clone(),
                terminals: terminals_of(c),
            })
            .collect();
        let wires = doc
            .wires()
            .iter()
            .map(|w| WireView { id: w.id, start: w.start, end: w.end, bend: w.bend, corner: w.corner() })
            .collect();
        Self {
            components,
            wires,
            junctions: find_junctions(doc.wires(), &terminals),
            anchors: AnchorTable::build(doc.components()),
        }
    }
}

/// Copied components and wires, held outside the model.
#[derive(Debug, Clone, Default)]
struct Clipboard {
    components: Vec<Component>,
    wires: Vec<Wire>,
}

impl Clipboard {
    fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for c in &mut self.components {
            c.position = c.position.offset(dx, dy);
        }
        for w in &mut self.wires {
            w.translate(dx, dy);
        }
    }
}

/// Core engine state: the model, the selection, and the active gesture.
///
/// Every committing call leaves the wire set canonical and returns a
/// [`Action::Checkpoint`] holding the state from before the edit.
pub struct EngineCore {
    pub doc: Schematic,
    pub library: SymbolLibrary,
    pub config: EditorConfig,
    pub ui: UiState,
    pub input: InputState,
    /// Model at pointer-down, restored on cancel and checkpointed on commit.
    before_gesture: Option<Schematic>,
    clipboard: Option<Clipboard>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default(), SymbolLibrary::builtin())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig, library: SymbolLibrary) -> Self {
        Self {
            doc: Schematic::new(),
            library,
            config,
            ui: UiState::default(),
            input: InputState::Idle,
            before_gesture: None,
            clipboard: None,
        }
    }

    // --- Tool ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    // --- Pointer lifecycle ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        match self.ui.tool {
            Tool::Wire => {
                let start = resolve(pt, &self.doc, &self.config);
                self.before_gesture = Some(self.doc.clone());
                self.input = InputState::DrawingWire { start, current: pt };
                vec![Action::RenderNeeded]
            }
            Tool::Select => self.begin_select(pt, modifiers),
        }
    }

    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let (next, changed) = match state {
            InputState::Idle => (InputState::Idle, false),
            InputState::DrawingWire { start, .. } => (InputState::DrawingWire { start, current: pt }, true),
            InputState::DraggingEndpoint { wire, end, moved } => {
                let stepped = self.drag_endpoint(&wire, end, pt);
                (InputState::DraggingEndpoint { wire, end, moved: moved || stepped }, stepped)
            }
            InputState::DraggingBody { wire, segment, anchor, moved } => match self.grid_step(anchor, pt) {
                Some((dx, dy)) => {
                    let (components, wires) = self.doc.parts_mut();
                    let terminals = all_terminals(components);
                    let stepped = move_wire_segment(wires, &wire, segment, dx, dy, Pinning::Bridges(&terminals));
                    let anchor = anchor.offset(dx, dy);
                    (InputState::DraggingBody { wire, segment, anchor, moved: moved || stepped }, stepped)
                }
                None => (InputState::DraggingBody { wire, segment, anchor, moved }, false),
            },
            InputState::DraggingComponents { components, wires, anchor, moved } => match self.grid_step(anchor, pt) {
                Some((dx, dy)) => {
                    self.move_selection(&components, &wires, dx, dy);
                    let anchor = anchor.offset(dx, dy);
                    (InputState::DraggingComponents { components, wires, anchor, moved: true }, true)
                }
                None => (InputState::DraggingComponents { components, wires, anchor, moved }, false),
            },
            InputState::AreaSelecting { anchor, .. } => (InputState::AreaSelecting { anchor, current: pt }, true),
        };
        self.input = next;
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::DrawingWire { start, .. } => self.finish_wire(&start, pt),
            InputState::DraggingEndpoint { wire, end, moved } => {
                if !moved {
                    self.before_gesture = None;
                    return Vec::new();
                }
                self.land_endpoint(&wire, end);
                cleanup_wires(&mut self.doc);
                tracing::debug!(wire = %wire, "endpoint drag committed");
                self.commit(Vec::new())
            }
            InputState::DraggingBody { wire, moved, .. } => {
                if !moved {
                    return self.rollback();
                }
                for w in self.doc.wires_mut() {
                    w.smart_bridge = false;
                }
                cleanup_wires(&mut self.doc);
                tracing::debug!(wire = %wire, "body drag committed");
                self.commit(Vec::new())
            }
            InputState::DraggingComponents { components, wires, moved, .. } => {
                if !moved {
                    self.before_gesture = None;
                    return Vec::new();
                }
                let mut extra = Vec::new();
                if let ([id], []) = (components.as_slice(), wires.as_slice())
                    && insert_on_wire(&mut self.doc, id, self.config.wire_hit_radius)
                {
                    extra.push(Action::ComponentSpliced { id: *id });
                }
                cleanup_wires(&mut self.doc);
                tracing::debug!(count = components.len(), "component drag committed");
                self.commit(extra)
            }
            InputState::AreaSelecting { anchor, .. } => {
                self.select_in_rect(Rect::from_corners(anchor, pt));
                vec![Action::SelectionChanged, Action::RenderNeeded]
            }
        }
    }

    /// Abort the active gesture, restoring the model exactly as it was at pointer-down.
    pub fn cancel(&mut self) -> Vec<Action> {
        if std::mem::take(&mut self.input).is_idle() {
            return Vec::new();
        }
        self.rollback()
    }

    // --- Placement and edits ---

    /// Place a new component of type `kind` at the grid point nearest `pt`,
    /// splicing it into a wire when it lands on one.
    pub fn drop_component(&mut self, kind: &str, pt: Point) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(symbol) = self.library.get(kind) else {
            return Vec::new();
        };
        let before = Snapshot::capture(&self.doc);
        let name = self.doc.next_name(&symbol.name_prefix);
        let component = Component::new(symbol, name.clone(), snap_point(pt, self.config.grid_size));
        let id = component.id;
        self.doc.insert_component(component);
        tracing::debug!(component = %id, name = %name, "component dropped");

        let mut actions = vec![Action::Checkpoint(before), Action::ComponentCreated { id, name }];
        if insert_on_wire(&mut self.doc, &id, self.config.wire_hit_radius) {
            actions.push(Action::ComponentSpliced { id });
        }
        cleanup_wires(&mut self.doc);
        self.ui.select_component(id);
        actions.push(Action::SelectionChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Rotate the selected components clockwise (as the user sees it) by quarter turns.
    pub fn rotate_selected(&mut self, turns: i32) -> Vec<Action> {
        let ids = self.ui.selected_components.clone();
        self.edit(|doc| {
            let mut changed = false;
            for id in &ids {
                if let Some(c) = doc.component_mut(id) {
                    c.rotation = c.rotation.turned_clockwise(turns);
                    changed = true;
                }
            }
            changed
        })
    }

    /// Toggle the mirror flag across `axis` on the selected components.
    ///
    /// `Axis::Horizontal` mirrors left-right (negates local x).
    pub fn flip_selected(&mut self, axis: Axis) -> Vec<Action> {
        let ids = self.ui.selected_components.clone();
        self.edit(|doc| {
            let mut changed = false;
            for id in &ids {
                if let Some(c) = doc.component_mut(id) {
                    match axis {
                        Axis::Horizontal => c.flip_x = !c.flip_x,
                        Axis::Vertical => c.flip_y = !c.flip_y,
                    }
                    changed = true;
                }
            }
            changed
        })
    }

    /// Change a component's symbol type in place.
    pub fn set_component_kind(&mut self, id: &ComponentId, kind: &str) -> Vec<Action> {
        let Some(symbol) = self.library.get(kind) else {
            return Vec::new();
        };
        self.edit(|doc| {
            let Some(c) = doc.component_mut(id) else {
                return false;
            };
            c.kind.clone_from(&symbol.key);
            c.category.clone_from(&symbol.category);
            c.symbol = symbol;
            true
        })
    }

    pub fn set_label(&mut self, id: &ComponentId, label: String) -> Vec<Action> {
        self.edit(|doc| {
            let Some(c) = doc.component_mut(id) else {
                return false;
            };
            c.label = label;
            true
        })
    }

    pub fn set_value(&mut self, id: &ComponentId, value: String) -> Vec<Action> {
        self.edit(|doc| {
            let Some(c) = doc.component_mut(id) else {
                return false;
            };
            c.value = value;
            true
        })
    }

    /// Set the emitter style variant (`"default"`, `"european"`).
    pub fn set_style(&mut self, id: &ComponentId, style: String) -> Vec<Action> {
        self.edit(|doc| {
            let Some(c) = doc.component_mut(id) else {
                return false;
            };
            if c.style == style {
                return false;
            }
            c.style = style;
            true
        })
    }

    /// Delete every selected component and wire.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let components = self.ui.selected_components.clone();
        let wires = self.ui.selected_wires.clone();
        let mut actions = self.edit(|doc| {
            let removed_components = components.iter().filter(|id| doc.remove_component(id).is_some()).count();
            let removed_wires = wires.iter().filter(|id| doc.remove_wire(id).is_some()).count();
            removed_components + removed_wires > 0
        });
        if !actions.is_empty() {
            actions.push(Action::SelectionChanged);
        }
        actions
    }

    // --- Clipboard ---

    /// Copy the selected components and wires. Returns whether anything was copied;
    /// an empty selection keeps the previous clipboard.
    pub fn copy_selected(&mut self) -> bool {
        let clip = Clipboard {
            components: self.ui.selected_components.iter().filter_map(|id| self.doc.component(id).cloned()).collect(),
            wires: self.ui.selected_wires.iter().filter_map(|id| self.doc.wire(id).cloned()).collect(),
        };
        if clip.is_empty() {
            return false;
        }
        tracing::debug!(components = clip.components.len(), wires = clip.wires.len(), "copied selection");
        self.clipboard = Some(clip);
        true
    }

    /// Copy the selection, then delete it.
    pub fn cut_selected(&mut self) -> Vec<Action> {
        if !self.input.is_idle() || !self.copy_selected() {
            return Vec::new();
        }
        self.delete_selected()
    }

    /// Insert fresh copies of the clipboard one grid step down and right of
    /// the previous paste, and select them.
    ///
    /// Pasted components take new names from the per-prefix counters.
    pub fn paste(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(clip) = self.clipboard.as_mut() else {
            return Vec::new();
        };
        let step = self.config.grid_size;
        clip.translate(step, step);
        let clip = clip.clone();

        let before = Snapshot::capture(&self.doc);
        let mut components = Vec::with_capacity(clip.components.len());
        for c in clip.components {
            let name = self.doc.next_name(&c.symbol.name_prefix);
            let pasted = Component { id: Uuid::new_v4(), name, ..c };
            components.push(pasted.id);
            self.doc.insert_component(pasted);
        }
        let mut wires = Vec::with_capacity(clip.wires.len());
        for w in clip.wires {
            let pasted = Wire::new(w.start, w.end, w.bend);
            wires.push(pasted.id);
            self.doc.insert_wire(pasted);
        }
        cleanup_wires(&mut self.doc);
        tracing::debug!(components = components.len(), wires = wires.len(), "pasted clipboard");

        self.ui.selected_components = components;
        self.ui.selected_wires = wires;
        self.prune_selection();
        vec![Action::Checkpoint(before), Action::SelectionChanged, Action::RenderNeeded]
    }

    // --- Snapshots ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.doc)
    }

    /// Replace the model with a snapshot (undo/redo from the host). Aborts any gesture.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnknownSymbol`] if the snapshot references a
    /// type missing from the library; the model is left unchanged.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<Vec<Action>, SnapshotError> {
        let doc = snapshot.restore(&self.library)?;
        self.input = InputState::Idle;
        self.before_gesture = None;
        self.doc = doc;
        self.prune_selection();
        Ok(vec![Action::SelectionChanged, Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::build(&self.doc)
    }

    #[must_use]
    pub fn junctions(&self) -> Vec<Point> {
        find_junctions(self.doc.wires(), &all_terminals(self.doc.components()))
    }

    #[must_use]
    pub fn anchor_table(&self) -> AnchorTable {
        AnchorTable::build(self.doc.components())
    }

    /// The wire that would be created if the pointer were released at its last position.
    #[must_use]
    pub fn wire_preview(&self) -> Option<Wire> {
        let InputState::DrawingWire { start, current } = &self.input else {
            return None;
        };
        let end = resolve(*current, &self.doc, &self.config);
        (end.point != start.point).then(|| Wire::new(start.point, end.point, self.draw_bend(start)))
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.doc.component(id)
    }

    #[must_use]
    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.doc.wire(id)
    }

    // --- Internals ---

    fn begin_select(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let Some(hit) = hit_test(pt, &self.doc, &self.config) else {
            self.ui.clear_selection();
            self.input = InputState::AreaSelecting { anchor: pt, current: pt };
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        };
        self.before_gesture = Some(self.doc.clone());
        match hit.part {
            HitPart::WireEndpoint(end) => {
                self.ui.select_wire(hit.id);
                self.input = InputState::DraggingEndpoint { wire: hit.id, end, moved: false };
            }
            HitPart::Component => {
                if modifiers.extends_selection() {
                    self.ui.add_component(hit.id);
                } else if !self.ui.is_component_selected(&hit.id) {
                    self.ui.select_component(hit.id);
                }
                self.input = InputState::DraggingComponents {
                    components: self.ui.selected_components.clone(),
                    wires: self.ui.selected_wires.clone(),
                    anchor: pt,
                    moved: false,
                };
            }
            HitPart::WireBody(segment) => {
                self.ui.select_wire(hit.id);
                self.insert_bridges(&hit.id);
                self.input = InputState::DraggingBody { wire: hit.id, segment, anchor: pt, moved: false };
            }
        }
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Add a zero-length smart bridge at each end of `id` that rests on a terminal.
    fn insert_bridges(&mut self, id: &WireId) {
        let Some(wire) = self.doc.wire(id) else {
            return;
        };
        let terminals = all_terminals(self.doc.components());
        let anchored: Vec<Point> = [wire.start, wire.end]
            .into_iter()
            .filter(|p| nearest_terminal(*p, &terminals, PIN_RADIUS).is_some())
            .collect();
        for p in anchored {
            let mut bridge = Wire::new(p, p, Bend::HorizontalFirst);
            bridge.smart_bridge = true;
            tracing::debug!(bridge = %bridge.id, x = p.x, y = p.y, "insert smart bridge");
            self.doc.insert_wire(bridge);
        }
    }

    /// Move a dragged endpoint to the snapped pointer. Returns whether it moved.
    fn drag_endpoint(&mut self, id: &WireId, end: Endpoint, pt: Point) -> bool {
        let Some(old) = self.doc.wire(id).map(|w| w.point(end)) else {
            return false;
        };
        let riders = self.wires_ending_at(old);
        let snap = resolve_excluding(pt, &self.doc, &self.config, &riders);
        if snap.point == old {
            return false;
        }
        if let Some(w) = self.doc.wire_mut(id) {
            w.set_point(end, snap.point);
        }
        propagate_move(self.doc.wires_mut(), *id, old, snap.point, Pinning::Off);
        true
    }

    /// Split whatever wire body the dropped endpoint landed on.
    fn land_endpoint(&mut self, id: &WireId, end: Endpoint) {
        let Some(p) = self.doc.wire(id).map(|w| w.point(end)) else {
            return;
        };
        let riders = self.wires_ending_at(p);
        let target = self
            .doc
            .wires()
            .iter()
            .rev()
            .find(|w| !riders.contains(&w.id) && w.passes_through(p))
            .map(|w| w.id);
        if let Some(target) = target {
            split_wire_at_point(self.doc.wires_mut(), &target, p);
        }
    }

    fn wires_ending_at(&self, p: Point) -> Vec<WireId> {
        self.doc
            .wires()
            .iter()
            .filter(|w| w.end_at(p, PROPAGATION_EPS).is_some())
            .map(|w| w.id)
            .collect()
    }

    /// Grid-quantized delta from `anchor` to `pt`, once the pointer has moved a full cell.
    fn grid_step(&self, anchor: Point, pt: Point) -> Option<(f64, f64)> {
        let grid = self.config.grid_size;
        let (dx, dy) = (pt.x - anchor.x, pt.y - anchor.y);
        if dx.abs() < grid && dy.abs() < grid {
            return None;
        }
        Some((snap_to_grid(dx, grid), snap_to_grid(dy, grid)))
    }

    /// Translate components (carrying their attached wires) and selected wires.
    ///
    /// A selected wire end that was already carried by a component is not
    /// moved again.
    fn move_selection(&mut self, components: &[ComponentId], wires: &[WireId], dx: f64, dy: f64) {
        let originals: Vec<(WireId, Point, Point)> = wires
            .iter()
            .filter_map(|id| self.doc.wire(id).map(|w| (w.id, w.start, w.end)))
            .collect();

        for id in components {
            let Some(c) = self.doc.component_mut(id) else {
                continue;
            };
            let before = terminals_of(c);
            c.position = c.position.offset(dx, dy);
            move_wires_with_component(self.doc.wires_mut(), &before, dx, dy);
        }

        for (id, start, end) in originals {
            for (e, orig) in [(Endpoint::Start, start), (Endpoint::End, end)] {
                let Some(w) = self.doc.wire_mut(&id) else {
                    break;
                };
                if w.point(e) != orig {
                    continue;
                }
                let new = orig.offset(dx, dy);
                w.set_point(e, new);
                propagate_move(self.doc.wires_mut(), id, orig, new, Pinning::Off);
            }
        }
    }

    fn finish_wire(&mut self, start: &Snap, pt: Point) -> Vec<Action> {
        let end = resolve(pt, &self.doc, &self.config);
        if end.point == start.point {
            self.before_gesture = None;
            return vec![Action::RenderNeeded];
        }
        let wire = Wire::new(start.point, end.point, self.draw_bend(start));
        if let Some(existing) = self.doc.wires().iter().find(|w| covers(w, &wire)) {
            tracing::debug!(wire = %existing.id, "drawn wire already covered");
            return self.rollback();
        }

        // Split bodies first so the merge pass sees the new topology.
        if let Some(id) = end.body_wire() {
            split_wire_at_point(self.doc.wires_mut(), &id, end.point);
        }
        if start.body_wire().is_some()
            && let Some(id) = wire_through(self.doc.wires(), start.point)
        {
            split_wire_at_point(self.doc.wires_mut(), &id, start.point);
        }

        let id = wire.id;
        self.doc.insert_wire(wire);
        cleanup_wires(&mut self.doc);
        tracing::debug!(wire = %id, "wire drawn");
        // Gone when the merge pass folded it into an older wire.
        let created = self.doc.wire(&id).map(|w| Action::WireCreated(w.id));
        self.commit(created.into_iter().collect())
    }

    /// Bend for a newly drawn wire: leave its start along the axis of what it starts from.
    fn draw_bend(&self, start: &Snap) -> Bend {
        match start.target {
            SnapTarget::Terminal(t) => Bend::with_leg_at(Endpoint::Start, t.axis),
            SnapTarget::WireEndpoint { wire, end } => self
                .doc
                .wire(&wire)
                .map_or(Bend::HorizontalFirst, |w| Bend::with_leg_at(Endpoint::Start, w.axis_at(end))),
            SnapTarget::WireBody { .. } | SnapTarget::Grid => Bend::HorizontalFirst,
        }
    }

    fn select_in_rect(&mut self, rect: Rect) {
        self.ui.selected_components = self
            .doc
            .components()
            .iter()
            .filter(|c| rect.contains(c.position))
            .map(|c| c.id)
            .collect();
        self.ui.selected_wires = self
            .doc
            .wires()
            .iter()
            .filter(|w| rect.contains(w.start) || rect.contains(w.end))
            .map(|w| w.id)
            .collect();
    }

    /// Apply a one-shot edit; on change, canonicalize and checkpoint.
    fn edit<F>(&mut self, apply: F) -> Vec<Action>
    where
        F: FnOnce(&mut Schematic) -> bool,
    {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let before = Snapshot::capture(&self.doc);
        if !apply(&mut self.doc) {
            return Vec::new();
        }
        cleanup_wires(&mut self.doc);
        self.prune_selection();
        vec![Action::Checkpoint(before), Action::RenderNeeded]
    }

    fn commit(&mut self, mut extra: Vec<Action>) -> Vec<Action> {
        self.prune_selection();
        let mut actions = Vec::with_capacity(extra.len() + 2);
        if let Some(before) = self.before_gesture.take() {
            actions.push(Action::Checkpoint(Snapshot::capture(&before)));
        }
        actions.append(&mut extra);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn rollback(&mut self) -> Vec<Action> {
        if let Some(before) = self.before_gesture.take() {
            self.doc = before;
        }
        self.prune_selection();
        vec![Action::RenderNeeded]
    }

    fn prune_selection(&mut self) {
        let doc = &self.doc;
        self.ui.retain(|id| doc.component(id).is_some(), |id| doc.wire(id).is_some());
    }
}
