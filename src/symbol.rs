//! Symbol definitions: the immutable per-type data every placed component
//! refers to (terminal offsets, bounding box, emission metadata).
//!
//! Definitions are shared behind [`Arc`] by every instance of a type and are
//! never mutated after construction. [`SymbolLibrary::builtin`] carries the
//! editor's stock catalogue; hosts may register additional definitions.

#[cfg(test)]
#[path = "symbol_test.rs"]
mod symbol_test;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// How the emitter draws a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitStyle {
    /// Two-terminal path element drawn between its terminals. Creates no named anchors.
    Path,
    /// Named node placed at the component center, referenced through its anchors.
    Node,
}

/// One connection point of a symbol in symbol-local space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalDef {
    /// Offset from the symbol center (+y down).
    pub offset: Point,
    /// Semantic anchor name (`"left"`, `"G"`, `"in 1"`). Empty when unnamed.
    pub anchor: String,
}

/// Immutable description of a symbol type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    /// Type key used to look the symbol up (`"resistor"`, `"npn"`).
    pub key: String,
    /// Palette category key (`"resistors"`, `"transistors"`).
    pub category: String,
    /// Human-readable name.
    pub name: String,
    /// Name used by the text emitter.
    pub emit_name: String,
    /// Whether the emitter draws this as a path or a node.
    pub emit_style: EmitStyle,
    /// Prefix for generated component names (`"R"` for R1, R2, ...).
    pub name_prefix: String,
    /// Bounding box width in world units.
    pub width: f64,
    /// Bounding box height in world units.
    pub height: f64,
    /// Terminals in semantic order (e.g. base, collector, emitter).
    pub terminals: Vec<TerminalDef>,
}

impl SymbolDef {
    /// Number of terminals.
    #[must_use]
    pub fn pole_count(&self) -> usize {
        self.terminals.len()
    }
}

/// Registry of symbol definitions keyed by type.
#[derive(Debug, Clone, Default)]
pub struct SymbolLibrary {
    defs: HashMap<String, Arc<SymbolDef>>,
    order: Vec<String>,
}

impl SymbolLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock catalogue shipped with the editor.
    #[must_use]
    pub fn builtin() -> Self {
        let mut lib = Self::new();
        for entry in BUILTIN {
            lib.insert(entry.to_def());
        }
        lib
    }

    /// Register a definition, replacing any existing one with the same key.
    pub fn insert(&mut self, def: SymbolDef) {
        if !self.defs.contains_key(&def.key) {
            self.order.push(def.key.clone());
        }
        self.defs.insert(def.key.clone(), Arc::new(def));
    }

    /// Look up a definition by type key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<SymbolDef>> {
        self.defs.get(key).cloned()
    }

    /// All definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<SymbolDef>> {
        self.order.iter().filter_map(|k| self.defs.get(k))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

// =============================================================
// Built-in catalogue
// =============================================================

struct BuiltinSymbol {
    category: &'static str,
    key: &'static str,
    name: &'static str,
    emit_name: &'static str,
    style: EmitStyle,
    prefix: &'static str,
    size: (f64, f64),
    terminals: &'static [(f64, f64, &'static str)],
}

impl BuiltinSymbol {
    fn to_def(&self) -> SymbolDef {
        SymbolDef {
            key: self.key.to_owned(),
            category: self.category.to_owned(),
            name: self.name.to_owned(),
            emit_name: self.emit_name.to_owned(),
            emit_style: self.style,
            name_prefix: self.prefix.to_owned(),
            width: self.size.0,
            height: self.size.1,
            terminals: self
                .terminals
                .iter()
                .map(|&(x, y, anchor)| TerminalDef { offset: Point::new(x, y), anchor: anchor.to_owned() })
                .collect(),
        }
    }
}

const BIPOLE_80: &[(f64, f64, &str)] = &[(-40.0, 0.0, "left"), (40.0, 0.0, "right")];
const BIPOLE_60: &[(f64, f64, &str)] = &[(-30.0, 0.0, "left"), (30.0, 0.0, "right")];
const BIPOLE_60_BARE: &[(f64, f64, &str)] = &[(-30.0, 0.0, ""), (30.0, 0.0, "")];
const MONO_UP: &[(f64, f64, &str)] = &[(0.0, -40.0, "")];
const MONO_DOWN: &[(f64, f64, &str)] = &[(0.0, 40.0, "")];
const BJT_N: &[(f64, f64, &str)] = &[(-40.0, 0.0, "B"), (0.0, -40.0, "C"), (0.0, 40.0, "E")];
const BJT_P: &[(f64, f64, &str)] = &[(-40.0, 0.0, "B"), (0.0, 40.0, "C"), (0.0, -40.0, "E")];
const FET_N: &[(f64, f64, &str)] = &[(-40.0, 0.0, "G"), (0.0, -40.0, "D"), (0.0, 40.0, "S")];
const FET_P: &[(f64, f64, &str)] = &[(-40.0, 0.0, "G"), (0.0, 40.0, "D"), (0.0, -40.0, "S")];
const IGBT_N: &[(f64, f64, &str)] = &[(-40.0, 0.0, "G"), (0.0, -40.0, "C"), (0.0, 40.0, "E")];
const IGBT_P: &[(f64, f64, &str)] = &[(-40.0, 0.0, "G"), (0.0, 40.0, "C"), (0.0, -40.0, "E")];
const GATE_2IN: &[(f64, f64, &str)] = &[(-30.0, -10.0, "in 1"), (-30.0, 10.0, "in 2"), (30.0, 0.0, "out")];

macro_rules! sym {
    ($cat:literal, $key:literal, $name:literal, $emit:literal, $style:ident, $prefix:literal, $w:literal x $h:literal, $terms:expr) => {
        BuiltinSymbol {
            category: $cat,
            key: $key,
            name: $name,
            emit_name: $emit,
            style: EmitStyle::$style,
            prefix: $prefix,
            size: ($w, $h),
            terminals: $terms,
        }
    };
}

const BUILTIN: &[BuiltinSymbol] = &[
    // Monopoles
    sym!("monopoles", "ground", "Ground", "ground", Node, "GND", 40.0 x 60.0, MONO_UP),
    sym!("monopoles", "vcc", "VCC", "vcc", Node, "VCC", 40.0 x 60.0, MONO_DOWN),
    sym!("monopoles", "vee", "VEE", "vee", Node, "VEE", 40.0 x 60.0, MONO_UP),
    sym!("monopoles", "antenna", "Antenna", "antenna", Node, "ANT", 40.0 x 60.0, MONO_DOWN),
    // Resistors
    sym!("resistors", "resistor", "Resistor", "R", Path, "R", 80.0 x 20.0, BIPOLE_80),
    sym!("resistors", "varResistor", "Variable R", "vR", Path, "R", 80.0 x 40.0, BIPOLE_80),
    sym!("resistors", "potentiometer", "Potentiometer", "pR", Path, "POT", 80.0 x 40.0,
        &[(-40.0, 0.0, "left"), (40.0, 0.0, "right"), (0.0, -20.0, "wiper")]),
    // Capacitors and inductors
    sym!("dynamics", "capacitor", "Capacitor", "C", Path, "C", 80.0 x 30.0, BIPOLE_80),
    sym!("dynamics", "polarCap", "Electrolytic", "eC", Path, "C", 80.0 x 30.0, BIPOLE_80),
    sym!("dynamics", "varCapacitor", "Variable Cap", "vC", Path, "C", 60.0 x 35.0, BIPOLE_60),
    sym!("dynamics", "curvedCap", "Curved Cap", "cC", Path, "C", 60.0 x 30.0, BIPOLE_60),
    sym!("dynamics", "capSensor", "Cap Sensor", "sC", Path, "C", 60.0 x 40.0,
        &[(-30.0, 0.0, "left"), (30.0, 0.0, "right"), (0.0, -20.0, "tip"), (-10.0, 15.0, "wiper")]),
    sym!("dynamics", "piezoelectric", "Piezoelectric", "PZ", Path, "U", 80.0 x 30.0, BIPOLE_80),
    sym!("dynamics", "cpe", "CPE", "cpe", Path, "U", 80.0 x 30.0, BIPOLE_80),
    sym!("dynamics", "ferroCap", "Ferroelectric", "feC", Path, "C", 80.0 x 30.0, BIPOLE_80),
    sym!("dynamics", "inductor", "Inductor", "L", Path, "L", 80.0 x 30.0, BIPOLE_80),
    // Sources
    sym!("sources", "vsource", "DC Voltage", "vsource", Path, "V", 60.0 x 40.0, BIPOLE_60),
    sym!("sources", "isource", "DC Current", "isource", Path, "I", 60.0 x 40.0, BIPOLE_60),
    sym!("sources", "battery", "Battery", "battery1", Path, "V", 60.0 x 40.0, BIPOLE_60),
    sym!("sources", "vsourceAC", "AC source", "sV", Path, "V", 60.0 x 40.0, BIPOLE_60),
    sym!("sources", "fuse", "Fuse", "fuse", Path, "U", 60.0 x 20.0, BIPOLE_60),
    sym!("sources", "lamp", "Lamp", "lamp", Path, "U", 60.0 x 40.0, BIPOLE_60),
    // Diodes
    sym!("diodes", "diode", "Diode", "D", Path, "D", 60.0 x 30.0, BIPOLE_60),
    sym!("diodes", "zener", "Zener", "zD", Path, "D", 60.0 x 30.0, BIPOLE_60),
    sym!("diodes", "led", "LED", "leD", Path, "D", 60.0 x 40.0, BIPOLE_60),
    sym!("diodes", "photodiode", "Photodiode", "pD", Path, "D", 60.0 x 40.0, BIPOLE_60),
    // Transistors
    sym!("transistors", "npn", "NPN", "npn", Node, "Q", 50.0 x 80.0, BJT_N),
    sym!("transistors", "pnp", "PNP", "pnp", Node, "Q", 50.0 x 80.0, BJT_P),
    sym!("transistors", "nmos", "NMOS", "nmos", Node, "M", 50.0 x 80.0, FET_N),
    sym!("transistors", "pmos", "PMOS", "pmos", Node, "M", 50.0 x 80.0, FET_P),
    sym!("transistors", "nfet", "N-FET", "nfet", Node, "U", 50.0 x 80.0, FET_N),
    sym!("transistors", "pfet", "P-FET", "pfet", Node, "U", 50.0 x 80.0, FET_P),
    sym!("transistors", "njfet", "N-JFET", "njfet", Node, "U", 50.0 x 80.0, FET_N),
    sym!("transistors", "pjfet", "P-JFET", "pjfet", Node, "U", 50.0 x 80.0, FET_P),
    sym!("transistors", "nigbt", "N-IGBT", "nigbt", Node, "U", 50.0 x 80.0, IGBT_N),
    sym!("transistors", "pigbt", "P-IGBT", "pigbt", Node, "U", 50.0 x 80.0, IGBT_P),
    sym!("transistors", "hemt", "HEMT", "hemt", Node, "U", 50.0 x 80.0, FET_N),
    // Op-amps
    sym!("opamps", "opamp", "Op-Amp", "op amp", Node, "U", 80.0 x 60.0,
        &[(-40.0, -15.0, "-"), (-40.0, 15.0, "+"), (40.0, 0.0, "out")]),
    // Switches
    sym!("switches", "switchOpen", "Switch", "nos", Path, "SW", 60.0 x 30.0, BIPOLE_60_BARE),
    sym!("switches", "pushButton", "Push Button", "push button", Path, "SW", 60.0 x 30.0, BIPOLE_60_BARE),
    // Meters
    sym!("meters", "ammeter", "Ammeter", "ammeter", Path, "A", 60.0 x 40.0, BIPOLE_60_BARE),
    sym!("meters", "voltmeter", "Voltmeter", "voltmeter", Path, "V", 60.0 x 40.0, BIPOLE_60_BARE),
    // Logic gates
    sym!("gates", "andGate", "AND Gate", "and port", Node, "U", 60.0 x 45.0, GATE_2IN),
    sym!("gates", "orGate", "OR Gate", "or port", Node, "U", 60.0 x 45.0, GATE_2IN),
    sym!("gates", "notGate", "NOT Gate", "not port", Node, "U", 60.0 x 40.0, &[(-30.0, 0.0, "in"), (30.0, 0.0, "out")]),
];
