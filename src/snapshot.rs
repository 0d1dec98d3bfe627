//! Persisted/undo state.
//!
//! A snapshot carries only what is needed to rebuild the model: component
//! identity, type, geometry and style fields, and wire geometry with its
//! bend. Terminals and junctions are derived again after a restore. The
//! smart-bridge flag has no field here, so it can never be persisted.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canon::cleanup_wires;
use crate::doc::{Bend, Component, ComponentId, Rotation, Schematic, Wire, WireId};
use crate::geom::Point;
use crate::symbol::SymbolLibrary;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown symbol type: {key}")]
    UnknownSymbol { key: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

fn default_style() -> String {
    "default".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: WireId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub bend: Bend,
}

/// A serializable copy of the whole model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub components: Vec<ComponentRecord>,
    pub wires: Vec<WireRecord>,
    #[serde(default)]
    pub name_counters: BTreeMap<String, u32>,
}

impl Snapshot {
    /// Copy the persistent state of `doc`.
    #[must_use]
    pub fn capture(doc: &Schematic) -> Self {
        let components = doc
            .components()
            .iter()
            .map(|c| ComponentRecord {
                id: c.id,
                name: c.name.clone(),
                kind: c.kind.clone(),
                category: c.category.clone(),
                x: c.position.x,
                y: c.position.y,
                rotation: c.rotation,
                flip_x: c.flip_x,
                flip_y: c.flip_y,
                style: c.style.clone(),
                label: c.label.clone(),
                value: c.value.clone(),
            })
            .collect();
        let wires = doc
            .wires()
            .iter()
            .map(|w| WireRecord { id: w.id, x1: w.start.x, y1: w.start.y, x2: w.end.x, y2: w.end.y, bend: w.bend })
            .collect();
        let name_counters = doc.name_counters().iter().map(|(k, v)| (k.clone(), *v)).collect();
        Self { components, wires, name_counters }
    }

    /// Rebuild a model, resolving symbol types against `library`, then canonicalize it.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnknownSymbol`] if a component's type is not in the library.
    pub fn restore(&self, library: &SymbolLibrary) -> Result<Schematic, SnapshotError> {
        let mut components = Vec::with_capacity(self.components.len());
        for rec in &self.components {
            let symbol = library
                .get(&rec.kind)
                .ok_or_else(|| SnapshotError::UnknownSymbol { key: rec.kind.clone() })?;
            let mut c = Component::new(symbol, rec.name.clone(), Point::new(rec.x, rec.y));
            c.id = rec.id;
            c.category.clone_from(&rec.category);
            c.rotation = rec.rotation;
            c.flip_x = rec.flip_x;
            c.flip_y = rec.flip_y;
            c.style.clone_from(&rec.style);
            c.label.clone_from(&rec.label);
            c.value.clone_from(&rec.value);
            components.push(c);
        }
        let wires = self
            .wires
            .iter()
            .map(|r| Wire { id: r.id, start: Point::new(r.x1, r.y1), end: Point::new(r.x2, r.y2), bend: r.bend, smart_bridge: false })
            .collect();

        let mut doc = Schematic::new();
        doc.replace(components, wires, self.name_counters.clone().into_iter().collect());
        let stats = cleanup_wires(&mut doc);
        tracing::debug!(
            components = doc.components().len(),
            wires = doc.wires().len(),
            pruned = stats.pruned,
            covered = stats.covered,
            merged = stats.merged,
            "restore snapshot"
        );
        Ok(doc)
    }

    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
