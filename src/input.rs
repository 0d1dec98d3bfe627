//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the one active gesture between pointer-down and
//! pointer-up, carrying the context needed to compute incremental deltas and
//! to commit or roll back on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{ComponentId, Endpoint, WireId};
use crate::geom::{Point, Rect};
use crate::snap::Snap;
use crate::wire::WireSegment;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Select, drag and area-select.
    #[default]
    Select,
    /// Draw orthogonal wires.
    Wire,
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Whether the event extends the selection instead of replacing it.
    #[must_use]
    pub fn extends_selection(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    pub selected_components: Vec<ComponentId>,
    pub selected_wires: Vec<WireId>,
}

impl UiState {
    pub fn clear_selection(&mut self) {
        self.selected_components.clear();
        self.selected_wires.clear();
    }

    pub fn select_component(&mut self, id: ComponentId) {
        self.clear_selection();
        self.selected_components.push(id);
    }

    pub fn select_wire(&mut self, id: WireId) {
        self.clear_selection();
        self.selected_wires.push(id);
    }

    /// Add to the selection without clearing it.
    pub fn add_component(&mut self, id: ComponentId) {
        if !self.selected_components.contains(&id) {
            self.selected_components.push(id);
        }
    }

    #[must_use]
    pub fn is_component_selected(&self, id: &ComponentId) -> bool {
        self.selected_components.contains(id)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected_components.is_empty() || !self.selected_wires.is_empty()
    }

    /// Drop ids the predicates reject (deleted or replaced objects).
    pub fn retain<C, W>(&mut self, keep_component: C, keep_wire: W)
    where
        C: Fn(&ComponentId) -> bool,
        W: Fn(&WireId) -> bool,
    {
        self.selected_components.retain(|id| keep_component(id));
        self.selected_wires.retain(|id| keep_wire(id));
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to compute deltas
/// and commit on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new wire is being drawn from a snapped start.
    DrawingWire {
        /// Where the wire starts and what it attached to.
        start: Snap,
        /// Raw pointer position, for the preview.
        current: Point,
    },
    /// One end of a wire follows the pointer, dragging its cluster along.
    DraggingEndpoint {
        wire: WireId,
        end: Endpoint,
        /// Whether anything has moved yet.
        moved: bool,
    },
    /// One leg of a wire is dragged perpendicular to itself in grid steps.
    DraggingBody {
        wire: WireId,
        segment: WireSegment,
        /// Pointer position the accumulated grid steps are measured from.
        anchor: Point,
        moved: bool,
    },
    /// The selected components (and selected wires) move in grid steps.
    DraggingComponents {
        components: Vec<ComponentId>,
        wires: Vec<WireId>,
        anchor: Point,
        moved: bool,
    },
    /// A rubber-band selection rectangle.
    AreaSelecting { anchor: Point, current: Point },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The selection rectangle while area-selecting.
    #[must_use]
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            Self::AreaSelecting { anchor, current } => Some(Rect::from_corners(*anchor, *current)),
            _ => None,
        }
    }
}
