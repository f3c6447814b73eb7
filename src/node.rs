use core::hash::{Hash, Hasher};
use grid_util::Point;

use crate::key::CellKey;

/// Bookkeeping of one cell during a search. The node lives in the search arena; `parent` is the
/// arena index of the node it was reached from.
#[derive(Clone, Debug)]
pub struct SearchNode<C> {
    pub position: Point,
    pub g: C,
    pub h: C,
    pub parent: Option<usize>,
    pub closed: bool,
}

impl<C: Copy + core::ops::Add<Output = C>> SearchNode<C> {
    pub fn new(position: Point, g: C, h: C, parent: Option<usize>) -> SearchNode<C> {
        SearchNode {
            position,
            g,
            h,
            parent,
            closed: false,
        }
    }

    pub fn f(&self) -> C {
        self.g + self.h
    }
}

// Identity is the position; the costs are state attached to it.
impl<C> PartialEq for SearchNode<C> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<C> Eq for SearchNode<C> {}

impl<C> Hash for SearchNode<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        CellKey::of(&self.position).hash(state);
    }
}

/// A vertex of the waypoint graph. `ports` holds the two anchor cells used instead of the
/// waypoint itself when testing visibility through a narrow opening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waypoint {
    pub position: Point,
    pub ports: Option<[Point; 2]>,
}

impl Waypoint {
    pub fn new(position: Point) -> Waypoint {
        Waypoint {
            position,
            ports: None,
        }
    }

    pub fn with_ports(position: Point, ports: [Point; 2]) -> Waypoint {
        Waypoint {
            position,
            ports: Some(ports),
        }
    }

    /// The port closest to `target` by Manhattan distance, or the waypoint itself without ports.
    /// The first port wins ties.
    pub fn anchor_towards(&self, target: &Point) -> Point {
        match self.ports {
            Some([p1, p2]) => {
                if p2.manhattan_distance(target) < p1.manhattan_distance(target) {
                    p2
                } else {
                    p1
                }
            }
            None => self.position,
        }
    }
}
