//! Sparse visibility graph over the corners of the obstacles.
//!
//! Waypoints are placed where a taut path has to bend around an obstacle: diagonally off the
//! corners of walls, and beside the tips of one-cell-thick walls. A tip waypoint carries a port
//! pair, the two cells flanking it, and visibility is tested from the port facing the other
//! end instead of from the waypoint itself. Start and end are always waypoints.

use fxhash::FxBuildHasher;
use grid_util::{Point, ValueGrid};
use indexmap::IndexSet;
use log::{error, info};

use crate::astar::FxIndexMap;
use crate::error::GraphAnomaly;
use crate::key::CellKey;
use crate::node::Waypoint;
use crate::occupancy_grid::OccupancyGrid;
use crate::visibility::line_of_sight;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

const TIP_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const CORNER_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Scans every obstacle cell, in x-major order, for corner and wall-tip waypoints. When the same
/// cell qualifies several times the first detection is kept. Tip ports are kept even when one of
/// them is a wall; visibility is aimed from the port facing the other end.
pub fn detect_waypoints(grid: &OccupancyGrid) -> Vec<Waypoint> {
    let mut found: FxIndexMap<CellKey, Waypoint> = FxIndexMap::default();
    let free = |x: i32, y: i32| grid.is_free(&Point::new(x, y));
    for x in 0..grid.grid.width() as i32 {
        for y in 0..grid.grid.height() as i32 {
            if free(x, y) {
                continue;
            }
            // Tip of a wall: the cell beyond it and both cells beside it are open.
            let tip = TIP_DIRECTIONS.iter().find(|&&(dx, dy)| {
                let (px, py) = (dy.abs(), dx.abs());
                free(x + dx, y + dy) && free(x + px, y + py) && free(x - px, y - py)
            });
            if let Some(&(dx, dy)) = tip {
                let (px, py) = (dy.abs(), dx.abs());
                let position = Point::new(x + dx, y + dy);
                let ports = [
                    Point::new(position.x + px, position.y + py),
                    Point::new(position.x - px, position.y - py),
                ];
                found
                    .entry(CellKey::of(&position))
                    .or_insert(Waypoint::with_ports(position, ports));
                continue;
            }
            for (dx, dy) in CORNER_DIRECTIONS {
                if free(x + dx, y + dy) && free(x, y + dy) && free(x + dx, y) {
                    let position = Point::new(x + dx, y + dy);
                    found
                        .entry(CellKey::of(&position))
                        .or_insert(Waypoint::new(position));
                }
            }
        }
    }
    found.into_values().collect()
}

/// Checks that each port touches its waypoint orthogonally or diagonally.
pub fn validate_ports(waypoint: &Waypoint) -> Result<(), GraphAnomaly> {
    for port in waypoint.ports.iter().flatten() {
        let dx = (port.x - waypoint.position.x).abs();
        let dy = (port.y - waypoint.position.y).abs();
        if dx.max(dy) != 1 {
            return Err(GraphAnomaly::PortNotAdjacent {
                waypoint: waypoint.position,
                port: *port,
            });
        }
    }
    Ok(())
}

/// Whether `a` can see `b`. `a` looks from each of its ports, or from itself without ports, and
/// aims at the port of `b` closest to where it looks from.
pub fn can_link(grid: &OccupancyGrid, a: &Waypoint, b: &Waypoint) -> bool {
    match a.ports {
        Some(ports) => ports
            .iter()
            .any(|pa| line_of_sight(grid, pa, &b.anchor_towards(pa))),
        None => line_of_sight(grid, &a.position, &b.anchor_towards(&a.position)),
    }
}

/// Visibility graph between waypoints. Waypoint order is start, detected waypoints, end; each
/// neighbour set follows that order.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    waypoints: FxIndexMap<CellKey, Waypoint>,
    adjacency: Vec<FxIndexSet<usize>>,
    anomalies: Vec<GraphAnomaly>,
    start: Option<Point>,
    end: Option<Point>,
}

impl WaypointGraph {
    /// Detects waypoints on `grid` and links every pair that can see each other.
    pub fn build(grid: &OccupancyGrid, start: Point, end: Point) -> WaypointGraph {
        WaypointGraph::with_waypoints(grid, start, end, detect_waypoints(grid))
    }

    /// Builds the graph over the given waypoints plus start and end. Waypoints on the start or end
    /// cell are replaced by them.
    pub fn with_waypoints(
        grid: &OccupancyGrid,
        start: Point,
        end: Point,
        detected: Vec<Waypoint>,
    ) -> WaypointGraph {
        let mut anomalies = Vec::new();
        let mut waypoints: FxIndexMap<CellKey, Waypoint> = FxIndexMap::default();
        waypoints.insert(CellKey::of(&start), Waypoint::new(start));
        for mut waypoint in detected {
            if waypoint.position == start || waypoint.position == end {
                continue;
            }
            if let Err(anomaly) = validate_ports(&waypoint) {
                error!("Waypoint graph anomaly: {anomaly}");
                anomalies.push(anomaly);
                waypoint.ports = None;
            }
            waypoints
                .entry(CellKey::of(&waypoint.position))
                .or_insert(waypoint);
        }
        waypoints
            .entry(CellKey::of(&end))
            .or_insert(Waypoint::new(end));

        let n = waypoints.len();
        let mut adjacency: Vec<FxIndexSet<usize>> = vec![FxIndexSet::default(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (Some((_, a)), Some((_, b))) =
                    (waypoints.get_index(i), waypoints.get_index(j))
                else {
                    continue;
                };
                if can_link(grid, a, b) || can_link(grid, b, a) {
                    adjacency[i].insert(j);
                    adjacency[j].insert(i);
                }
            }
        }
        let graph = WaypointGraph {
            waypoints,
            adjacency,
            anomalies,
            start: Some(start),
            end: Some(end),
        };
        info!(
            "Built waypoint graph with {} waypoints and {} links",
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.values()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.index_of(point).is_some()
    }

    pub fn waypoint(&self, point: &Point) -> Option<&Waypoint> {
        self.index_of(point)
            .and_then(|i| self.waypoints.get_index(i))
            .map(|(_, w)| w)
    }

    pub fn ports(&self, point: &Point) -> Option<[Point; 2]> {
        self.waypoint(point).and_then(|w| w.ports)
    }

    pub(crate) fn index_of(&self, point: &Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        self.waypoints.get_index_of(&CellKey::of(point))
    }

    pub(crate) fn position_at(&self, index: usize) -> Option<Point> {
        self.waypoints.get_index(index).map(|(_, w)| w.position)
    }

    pub(crate) fn neighbour_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Waypoints visible from `point`, in waypoint order. Empty for positions that are not
    /// waypoints.
    pub fn neighbours(&self, point: &Point) -> Vec<Point> {
        match self.index_of(point) {
            Some(i) => self
                .neighbour_indices(i)
                .filter_map(|j| self.position_at(j))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_linked(&self, a: &Point, b: &Point) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.adjacency[i].contains(&j),
            _ => false,
        }
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|set| set.len()).sum::<usize>() / 2
    }

    /// Inconsistencies found while building, already logged.
    pub fn anomalies(&self) -> &[GraphAnomaly] {
        &self.anomalies
    }
}
