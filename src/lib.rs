//! # waypoint_pathfinding
//!
//! Hierarchical pathfinding on a uniform 2D occupancy grid. A sparse visibility graph is placed on
//! the corners of the obstacles, a coarse router picks a sequence of waypoints through it, and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) searches between consecutive waypoints
//! are stitched into a cell-by-cell path. Every search records its passes so the exploration can
//! be replayed afterwards.
//!
//! The grid pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) which can be
//! used to skip searches for unreachable goals.
//!
//! ```
//! use grid_util::Point;
//! use waypoint_pathfinding::{OccupancyGrid, Pathfinder, PathfinderConfig};
//!
//! let grid = OccupancyGrid::from_ascii(&[".....", ".....", "##.##", ".....", "....."]);
//! let mut pathfinder = Pathfinder::new(grid, PathfinderConfig::default());
//! pathfinder.set_start(Point::new(0, 0)).unwrap();
//! pathfinder.set_end(Point::new(4, 4)).unwrap();
//! let result = pathfinder.find_path();
//! assert_eq!(result.path.len(), 9);
//! ```

pub mod astar;
pub mod coarse;
pub mod config;
pub mod error;
pub mod key;
pub mod node;
pub mod occupancy_grid;
pub mod pathfinder;
pub mod result;
pub mod solver;
pub mod stitch;
pub mod trace;
pub mod visibility;
pub mod waypoint_graph;

pub use config::{CoarseStrategy, Connectivity, MovementModel, PathfinderConfig};
pub use error::{CoarseFailure, GraphAnomaly, PlacementError, RouteFailure, SearchFailure};
pub use occupancy_grid::OccupancyGrid;
pub use pathfinder::Pathfinder;
pub use result::PathResult;
pub use trace::{ReplayEvent, SearchTrace, TraceStep};
pub use waypoint_graph::WaypointGraph;

/// Cost of a straight move in the octile movement model.
pub const DIRECT_COST: i32 = 10;
/// Cost of a diagonal move in the octile movement model, roughly `DIRECT_COST * sqrt(2)`.
pub const DIAGONAL_COST: i32 = 14;
pub const N_SMALLVEC_SIZE: usize = 8;

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_MAX_COARSE_ITERATIONS: usize = 1_000;
