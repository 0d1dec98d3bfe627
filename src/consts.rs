//! Shared numeric constants for the schematic crate.

// ── Grid ────────────────────────────────────────────────────────

/// Default grid pitch in world units.
pub const GRID_SIZE: f64 = 20.0;

// ── Tolerances ──────────────────────────────────────────────────

/// Two points closer than this on both axes are the same electrical point.
pub const COINCIDENCE_EPS: f64 = 2.0;

/// Endpoint match tolerance used while propagating a moved point.
pub const PROPAGATION_EPS: f64 = 3.0;

/// Shared-endpoint and alignment tolerance used by the merge rule.
pub const MERGE_EPS: f64 = 1.0;

/// A wire whose extent is at most this on both axes is degenerate.
pub const DEGENERATE_LEN: f64 = 1.0;

/// A wire whose endpoints differ by less than this on an axis is aligned on it.
pub const ALIGN_EPS: f64 = 1.0;

/// Radius within which a smart bridge's first endpoint counts as resting on a terminal.
pub const PIN_RADIUS: f64 = 5.0;

// ── Default pointer radii ───────────────────────────────────────

/// Snap radius for component terminals.
pub const TERMINAL_SNAP_RADIUS: f64 = 15.0;

/// Snap radius for existing wire endpoints.
pub const WIRE_END_SNAP_RADIUS: f64 = 10.0;

/// Snap radius for landing on a wire body.
pub const WIRE_BODY_SNAP_RADIUS: f64 = 10.0;

/// Hit radius for grabbing a wire body with the select tool.
pub const WIRE_HIT_RADIUS: f64 = 12.0;

/// Hit radius for grabbing a wire endpoint with the select tool.
pub const ENDPOINT_GRAB_RADIUS: f64 = 8.0;

/// Extra padding around a symbol's bounding box for component hits.
pub const COMPONENT_HIT_PADDING: f64 = 10.0;
