use std::time::Instant;

use grid_util::Point;
use log::{debug, info, warn};

use crate::coarse::coarse_route;
use crate::config::PathfinderConfig;
use crate::error::{CoarseFailure, PlacementError, RouteFailure};
use crate::occupancy_grid::OccupancyGrid;
use crate::result::PathResult;
use crate::solver::astar::AstarSolver;
use crate::stitch::stitch_route;
use crate::waypoint_graph::WaypointGraph;

/// Owns a grid with its start and end, keeps the waypoint graph in sync with edits and runs
/// route queries. Edits are rejected without any change when they would put the start or end on
/// a wall or outside the grid.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: OccupancyGrid,
    start: Option<Point>,
    end: Option<Point>,
    config: PathfinderConfig,
    graph: Option<WaypointGraph>,
    last_result: Option<PathResult>,
}

impl Pathfinder {
    pub fn new(mut grid: OccupancyGrid, config: PathfinderConfig) -> Pathfinder {
        grid.set_connectivity(config.movement.connectivity(), config.allow_corner_cutting);
        Pathfinder {
            grid,
            start: None,
            end: None,
            config,
            graph: None,
            last_result: None,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PathfinderConfig) {
        self.grid
            .set_connectivity(config.movement.connectivity(), config.allow_corner_cutting);
        self.config = config;
    }

    /// The waypoint graph of the current grid, available once start and end are both set.
    pub fn graph(&self) -> Option<&WaypointGraph> {
        self.graph.as_ref()
    }

    /// The result of the most recent query.
    pub fn last_result(&self) -> Option<&PathResult> {
        self.last_result.as_ref()
    }

    pub fn reset_result(&mut self) {
        self.last_result = None;
    }

    fn check_endpoint(&self, point: &Point) -> Result<(), PlacementError> {
        if !self.grid.in_bounds(point) {
            Err(PlacementError::OutOfBounds(*point))
        } else if self.grid.is_obstacle(point) {
            Err(PlacementError::Obstacle(*point))
        } else {
            Ok(())
        }
    }

    fn check_editable(&self, point: &Point) -> Result<(), PlacementError> {
        if !self.grid.in_bounds(point) {
            Err(PlacementError::OutOfBounds(*point))
        } else if Some(*point) == self.start || Some(*point) == self.end {
            Err(PlacementError::Reserved(*point))
        } else {
            Ok(())
        }
    }

    pub fn set_start(&mut self, point: Point) -> Result<(), PlacementError> {
        self.check_endpoint(&point)?;
        self.start = Some(point);
        self.rebuild_graph();
        Ok(())
    }

    pub fn set_end(&mut self, point: Point) -> Result<(), PlacementError> {
        self.check_endpoint(&point)?;
        self.end = Some(point);
        self.rebuild_graph();
        Ok(())
    }

    /// Flips a cell between wall and free and returns the new state.
    pub fn toggle_obstacle(&mut self, point: Point) -> Result<bool, PlacementError> {
        self.check_editable(&point)?;
        let blocked = self
            .grid
            .toggle(&point)
            .ok_or(PlacementError::OutOfBounds(point))?;
        self.rebuild_graph();
        Ok(blocked)
    }

    pub fn set_obstacle(&mut self, point: Point, blocked: bool) -> Result<(), PlacementError> {
        self.check_editable(&point)?;
        if self.grid.is_obstacle(&point) != blocked {
            self.grid.toggle(&point);
            self.rebuild_graph();
        }
        Ok(())
    }

    fn rebuild_graph(&mut self) {
        self.graph = match (self.start, self.end) {
            (Some(start), Some(end)) => Some(WaypointGraph::build(&self.grid, start, end)),
            _ => None,
        };
    }

    fn solver(&self) -> AstarSolver {
        AstarSolver::from_config(&self.config)
    }

    /// Routes over the waypoint graph, then stitches fine searches between the waypoints.
    pub fn find_path(&mut self) -> &PathResult {
        let started = Instant::now();
        self.grid.update();
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return self.finish(PathResult::failed(
                RouteFailure::NotConfigured,
                Vec::new(),
                started.elapsed(),
            ));
        };
        if self.graph.is_none() {
            self.rebuild_graph();
        }
        let route = match &self.graph {
            Some(graph) => coarse_route(
                graph,
                self.config.coarse_strategy,
                self.config.max_coarse_iterations,
            ),
            None => Err(CoarseFailure::MissingEndpoint),
        };
        let result = match route {
            Ok(route) => {
                debug!("Routing {start:?} -> {end:?} over {route:?}");
                stitch_route(&self.solver(), &self.grid, route, started)
            }
            Err(failure) => PathResult::failed(failure.into(), vec![start], started.elapsed()),
        };
        self.finish(result)
    }

    /// A single fine search from start to end, without the waypoint graph.
    pub fn find_path_direct(&mut self) -> &PathResult {
        let started = Instant::now();
        self.grid.update();
        let result = match (self.start, self.end) {
            (Some(start), Some(end)) => {
                stitch_route(&self.solver(), &self.grid, vec![start, end], started)
            }
            _ => PathResult::failed(RouteFailure::NotConfigured, Vec::new(), started.elapsed()),
        };
        self.finish(result)
    }

    fn finish(&mut self, result: PathResult) -> &PathResult {
        match &result.outcome {
            Ok(()) => info!(
                "Found path of {} cells in {} passes",
                result.path_length(),
                result.passes
            ),
            Err(failure) => warn!("No path after {} passes: {failure}", result.passes),
        }
        self.last_result.insert(result)
    }
}
