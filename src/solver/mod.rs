use crate::astar::{astar_traced, FailedSearch, SearchOutcome};
use crate::config::MovementModel;
use crate::error::SearchFailure;
use crate::occupancy_grid::OccupancyGrid;
use grid_util::Point;
use itertools::Itertools;
use log::info;

pub mod astar;
pub mod dijkstra;

/// Converts the integer cost to an approximate floating point equivalent where cardinal directions
/// have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32, movement: &MovementModel) -> f64 {
    (cost as f64) / (movement.direct_cost().max(1) as f64)
}

/// A single-resolution search over an [OccupancyGrid].
pub trait GridSolver {
    type Successors: IntoIterator<Item = (Point, i32)>;

    fn movement(&self) -> &MovementModel;

    fn max_iterations(&self) -> usize;

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    /// Skip searching when the grid components prove the goal unreachable.
    fn prune_unreachable(&self) -> bool {
        false
    }

    /// Uses the movement model's cost for one step between adjacent cells.
    fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        self.movement().step_cost(p2.x - p1.x, p2.y - p1.y)
    }

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors;

    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }

    fn get_path_cost_float(&self, path: &[Point]) -> f64 {
        convert_cost_to_unit_cost_float(self.get_path_cost(path), self.movement())
    }

    /// Runs the search between two cells, reporting the trace and the number of passes whether
    /// or not the goal is reached. An obstacle or out-of-bounds endpoint fails without a search.
    fn search(
        &self,
        grid: &OccupancyGrid,
        start: Point,
        goal: Point,
    ) -> Result<SearchOutcome<i32>, FailedSearch> {
        if grid.is_obstacle(&start) || grid.is_obstacle(&goal) {
            info!("{start:?} or {goal:?} is an obstacle, no search is run");
            return Err(FailedSearch::without_search(SearchFailure::Unreachable));
        }
        // The components can only be trusted when they are current and were generated with the
        // same neighbourhood as this solver moves in.
        if self.prune_unreachable()
            && !grid.components_dirty
            && grid.connectivity == self.movement().connectivity()
            && grid.unreachable(&start, &goal)
        {
            info!("{goal:?} is not reachable from {start:?}");
            return Err(FailedSearch::without_search(SearchFailure::Unreachable));
        }
        astar_traced(
            &start,
            &goal,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            self.max_iterations(),
        )
    }

    fn get_path_single_goal(
        &self,
        grid: &OccupancyGrid,
        start: Point,
        goal: Point,
    ) -> Option<Vec<Point>> {
        self.search(grid, start, goal).ok().map(|outcome| outcome.path)
    }
}
