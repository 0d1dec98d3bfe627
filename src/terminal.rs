//! Terminal resolution: world-space connection points of placed components,
//! and the terminal-to-anchor table handed to the text emitter.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use serde::Serialize;

use crate::consts::MERGE_EPS;
use crate::doc::{Component, ComponentId};
use crate::geom::Point;
use crate::symbol::EmitStyle;
use crate::wire::Axis;

/// A computed connection point. Not stored; derived from its component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Terminal {
    /// World position.
    pub point: Point,
    /// Owning component.
    pub component_id: ComponentId,
    /// Index into the symbol's terminal list.
    pub index: usize,
    /// Direction the terminal points away from the component center.
    pub axis: Axis,
}

/// World-space terminals of `component`, in symbol order.
///
/// Each local offset is mirrored by the flip flags first, then rotated, then
/// translated to the component position.
#[must_use]
pub fn terminals_of(component: &Component) -> Vec<Terminal> {
    component
        .symbol
        .terminals
        .iter()
        .enumerate()
        .map(|(index, def)| {
            let mut local = def.offset;
            if component.flip_x {
                local.x = -local.x;
            }
            if component.flip_y {
                local.y = -local.y;
            }
            let rel = component.rotation.apply(local);
            Terminal {
                point: component.position.offset(rel.x, rel.y),
                component_id: component.id,
                index,
                axis: if rel.x.abs() >= rel.y.abs() { Axis::Horizontal } else { Axis::Vertical },
            }
        })
        .collect()
}

/// Terminals of every component, in placement then symbol order.
#[must_use]
pub fn all_terminals(components: &[Component]) -> Vec<Terminal> {
    components.iter().flat_map(terminals_of).collect()
}

/// Symbolic references for terminal positions (`"Q1.B"`, `"GND1"`).
///
/// Only node-style components contribute: path-style symbols are drawn
/// between coordinates and create no named anchors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnchorTable {
    entries: Vec<(Point, String)>,
}

impl AnchorTable {
    #[must_use]
    pub fn build(components: &[Component]) -> Self {
        let mut entries = Vec::new();
        for comp in components.iter().filter(|c| c.symbol.emit_style == EmitStyle::Node) {
            for term in terminals_of(comp) {
                let anchor = &comp.symbol.terminals[term.index].anchor;
                let reference = if anchor.is_empty() {
                    comp.name.clone()
                } else {
                    format!("{}.{anchor}", comp.name)
                };
                entries.push((term.point, reference));
            }
        }
        Self { entries }
    }

    /// Reference for a point, if a node terminal sits there.
    ///
    /// When several terminals coincide, the last placed component wins.
    #[must_use]
    pub fn lookup(&self, p: Point) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(q, _)| q.near(p, MERGE_EPS))
            .map(|(_, r)| r.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[(Point, String)] {
        &self.entries
    }
}
