//! Document model: placed components, wires, and the in-memory store.
//!
//! This module defines what is on the schematic (`Component`, `Wire`) and
//! the runtime store that owns them (`Schematic`). Connectivity is not stored
//! anywhere: a wire is attached to a terminal or to another wire only because
//! their coordinates coincide. Derived facts (terminals, junctions) are
//! recomputed on demand by the sibling modules.
//!
//! Order matters. Components are kept in placement order (later ones are hit
//! first) and wires in insertion order (the canonicalizer scans pairs in this
//! order, and the emitter writes them in this order).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Point;
use crate::symbol::SymbolDef;

/// Unique identifier for a placed component.
pub type ComponentId = Uuid;

/// Unique identifier for a wire.
pub type WireId = Uuid;

/// A rotation value outside the four quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rotation must be 0, 90, 180 or 270 degrees, got {0}")]
pub struct InvalidRotation(pub u16);

/// Component rotation in degrees, counter-clockwise in the emitted drawing.
///
/// The editor presents clockwise rotation to the user, so rotating "right"
/// decreases the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            1 => Self::R90,
            2 => Self::R180,
            3 => Self::R270,
            _ => Self::R0,
        }
    }

    fn quarter_turns(self) -> i32 {
        i32::from(self.degrees() / 90)
    }

    /// Rotate clockwise as the user sees it by `turns` quarter turns.
    #[must_use]
    pub fn turned_clockwise(self, turns: i32) -> Self {
        Self::from_quarter_turns(self.quarter_turns() - turns)
    }

    /// Whether a horizontal symbol drawn at this rotation runs vertically.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }

    /// Rotate a local offset into world orientation.
    ///
    /// The stored angle is negated before rotating (+y is down on screen),
    /// so `R90` takes +x to -y.
    #[must_use]
    pub fn apply(self, p: Point) -> Point {
        match self {
            Self::R0 => p,
            Self::R90 => Point::new(p.y, -p.x),
            Self::R180 => Point::new(-p.x, -p.y),
            Self::R270 => Point::new(-p.y, p.x),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            other => Err(InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

/// A placed symbol instance.
#[derive(Debug, Clone)]
pub struct Component {
    pub id: ComponentId,
    /// Emitted name (`R1`, `Q2`); the prefix of anchor references.
    pub name: String,
    /// Symbol type key.
    pub kind: String,
    /// Palette category key.
    pub category: String,
    /// Center in world coordinates.
    pub position: Point,
    pub rotation: Rotation,
    /// Mirror about the local y axis (negates local x).
    pub flip_x: bool,
    /// Mirror about the local x axis (negates local y).
    pub flip_y: bool,
    /// Emitter style variant (`"default"`, `"european"`).
    pub style: String,
    pub label: String,
    pub value: String,
    /// Shared immutable definition for `kind`.
    pub symbol: Arc<SymbolDef>,
}

impl Component {
    /// Create an unrotated, unflipped instance of `symbol` at `position`.
    #[must_use]
    pub fn new(symbol: Arc<SymbolDef>, name: String, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind: symbol.key.clone(),
            category: symbol.category.clone(),
            position,
            rotation: Rotation::R0,
            flip_x: false,
            flip_y: false,
            style: "default".to_owned(),
            label: String::new(),
            value: String::new(),
            symbol,
        }
    }
}

/// Which axis a bent wire traverses first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bend {
    /// Horizontal then vertical; the corner is at `(end.x, start.y)`.
    #[default]
    #[serde(rename = "hv")]
    HorizontalFirst,
    /// Vertical then horizontal; the corner is at `(start.x, end.y)`.
    #[serde(rename = "vh")]
    VerticalFirst,
}

/// One of the two ends of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// An orthogonal wire: straight, or two legs joined at a corner chosen by `bend`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub start: Point,
    pub end: Point,
    pub bend: Bend,
    /// Transient marker for bridges inserted during a body drag. Never persisted.
    pub smart_bridge: bool,
}

impl Wire {
    #[must_use]
    pub fn new(start: Point, end: Point, bend: Bend) -> Self {
        Self { id: Uuid::new_v4(), start, end, bend, smart_bridge: false }
    }

    #[must_use]
    pub fn point(&self, end: Endpoint) -> Point {
        match end {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub fn set_point(&mut self, end: Endpoint, p: Point) {
        match end {
            Endpoint::Start => self.start = p,
            Endpoint::End => self.end = p,
        }
    }
}

/// In-memory store of components and wires.
#[derive(Debug, Clone, Default)]
pub struct Schematic {
    components: Vec<Component>,
    wires: Vec<Wire>,
    name_counters: HashMap<String, u32>,
}

impl Schematic {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Components ---

    /// Append a component. An existing component with the same id is replaced in place.
    pub fn insert_component(&mut self, component: Component) {
        if let Some(existing) = self.component_mut(&component.id) {
            *existing = component;
        } else {
            self.components.push(component);
        }
    }

    /// Remove a component by id, returning it if it was present.
    pub fn remove_component(&mut self, id: &ComponentId) -> Option<Component> {
        let idx = self.components.iter().position(|c| c.id == *id)?;
        Some(self.components.remove(idx))
    }

    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == *id)
    }

    pub fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == *id)
    }

    /// Components in placement order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    // --- Wires ---

    /// Append a wire. An existing wire with the same id is replaced in place.
    pub fn insert_wire(&mut self, wire: Wire) {
        if let Some(existing) = self.wire_mut(&wire.id) {
            *existing = wire;
        } else {
            self.wires.push(wire);
        }
    }

    /// Remove a wire by id, returning it if it was present.
    pub fn remove_wire(&mut self, id: &WireId) -> Option<Wire> {
        let idx = self.wires.iter().position(|w| w.id == *id)?;
        Some(self.wires.remove(idx))
    }

    #[must_use]
    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == *id)
    }

    pub fn wire_mut(&mut self, id: &WireId) -> Option<&mut Wire> {
        self.wires.iter_mut().find(|w| w.id == *id)
    }

    /// Wires in insertion order.
    #[must_use]
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Mutable access to the wire list for the connectivity algorithms.
    pub fn wires_mut(&mut self) -> &mut Vec<Wire> {
        &mut self.wires
    }

    /// Split borrow: components read-only, wires mutable.
    pub fn parts_mut(&mut self) -> (&[Component], &mut Vec<Wire>) {
        (&self.components, &mut self.wires)
    }

    // --- Naming ---

    /// Next generated name for `prefix` (`R1`, `R2`, ...). Advances the counter.
    pub fn next_name(&mut self, prefix: &str) -> String {
        let counter = self.name_counters.entry(prefix.to_owned()).or_insert(1);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        name
    }

    #[must_use]
    pub fn name_counters(&self) -> &HashMap<String, u32> {
        &self.name_counters
    }

    // --- Bulk ---

    /// Replace everything with the given contents.
    pub fn replace(&mut self, components: Vec<Component>, wires: Vec<Wire>, name_counters: HashMap<String, u32>) {
        self.components = components;
        self.wires = wires;
        self.name_counters = name_counters;
    }

    /// Returns `true` if there are no components and no wires.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty()
    }
}
