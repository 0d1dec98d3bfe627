//! Junction classification.
//!
//! Candidate points are every wire end, every bend corner, and every
//! terminal. A point is a junction when three or more things connect there,
//! or when two connect and one of them is a wire passing straight through
//! (a T).

#[cfg(test)]
#[path = "junction_test.rs"]
mod junction_test;

use crate::consts::COINCIDENCE_EPS;
use crate::doc::Wire;
use crate::geom::Point;
use crate::terminal::Terminal;

/// Connections meeting at one point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connections {
    /// Wires ending or turning here, plus wires passing through.
    pub wires: usize,
    /// Terminals sitting here.
    pub terminals: usize,
    /// Whether at least one wire passes through without ending.
    pub mid_hit: bool,
}

impl Connections {
    #[must_use]
    pub fn total(self) -> usize {
        self.wires + self.terminals
    }

    #[must_use]
    pub fn is_junction(self) -> bool {
        self.total() >= 3 || (self.total() >= 2 && self.mid_hit)
    }
}

/// Count what connects at `p`.
#[must_use]
pub fn connections_at(p: Point, wires: &[Wire], terminals: &[Terminal]) -> Connections {
    let mut conn = Connections::default();
    for w in wires {
        if w.touches_at(p, COINCIDENCE_EPS) {
            conn.wires += 1;
        } else if w.passes_through(p) {
            conn.wires += 1;
            conn.mid_hit = true;
        }
    }
    conn.terminals = terminals.iter().filter(|t| t.point.near(p, COINCIDENCE_EPS)).count();
    conn
}

/// Whether `p` is an electrical junction. Merging across one would drop a connection.
#[must_use]
pub fn is_junction(p: Point, wires: &[Wire], terminals: &[Terminal]) -> bool {
    connections_at(p, wires, terminals).is_junction()
}

/// All junction points, one per distinct location, in discovery order.
#[must_use]
pub fn find_junctions(wires: &[Wire], terminals: &[Terminal]) -> Vec<Point> {
    let mut candidates: Vec<Point> = Vec::new();
    let points = wires
        .iter()
        .flat_map(|w| [Some(w.start), Some(w.end), w.corner()])
        .flatten()
        .chain(terminals.iter().map(|t| t.point));
    for p in points {
        if !candidates.iter().any(|c| c.near(p, COINCIDENCE_EPS)) {
            candidates.push(p);
        }
    }
    candidates.retain(|&p| is_junction(p, wires, terminals));
    candidates
}
