//! Wire and terminal connectivity engine for an orthogonal schematic editor.
//!
//! The crate owns the schematic model and every rule about how wires attach,
//! move, split and merge. A host (a browser canvas, a CLI, a test) feeds it
//! pointer events and edit commands, reads back a [`engine::Scene`] to draw,
//! and keeps the [`engine::Action::Checkpoint`] snapshots it is handed as its
//! undo history. Connectivity is purely geometric: nothing is linked by
//! reference, things are connected because their coordinates coincide.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`]: gestures, edits, scene output |
//! | [`doc`] | Components, wires and the in-memory [`doc::Schematic`] store |
//! | [`symbol`] | Symbol definitions and the built-in library |
//! | [`terminal`] | World-space terminals and the anchor table |
//! | [`wire`] | Wire shape queries: corner, legs, distance, axes |
//! | [`hit`] | Hit-testing for the select tool |
//! | [`snap`] | Snap resolution for drawing and endpoint drags |
//! | [`propagate`] | Moving connected wire ends along with an edit |
//! | [`canon`] | Cleanup: pruning, merging and splitting wires |
//! | [`junction`] | Junction classification and enumeration |
//! | [`splice`] | Inserting a two-terminal component into a wire |
//! | [`snapshot`] | Serializable model copies for undo and persistence |
//! | [`input`] | Tools, modifiers and the gesture state machine |
//! | [`config`] | Editor radii and grid size, with environment overrides |
//! | [`geom`] | Points, rectangles and grid snapping |
//! | [`consts`] | Fixed geometric tolerances and default radii |

pub mod canon;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod junction;
pub mod propagate;
pub mod snap;
pub mod snapshot;
pub mod splice;
pub mod symbol;
pub mod terminal;
pub mod wire;
