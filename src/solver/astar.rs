use grid_util::Point;
use smallvec::SmallVec;

use crate::config::{MovementModel, PathfinderConfig};
use crate::occupancy_grid::OccupancyGrid;
use crate::solver::GridSolver;
use crate::{DEFAULT_MAX_ITERATIONS, N_SMALLVEC_SIZE};

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub movement: MovementModel,
    pub heuristic_factor: f32,
    pub max_iterations: usize,
    pub prune_unreachable: bool,
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            movement: MovementModel::default(),
            heuristic_factor: 1.0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prune_unreachable: false,
        }
    }

    pub fn with_movement(movement: MovementModel) -> AstarSolver {
        AstarSolver {
            movement,
            ..AstarSolver::new()
        }
    }

    pub fn from_config(config: &PathfinderConfig) -> AstarSolver {
        AstarSolver {
            movement: config.movement,
            heuristic_factor: config.heuristic_factor,
            max_iterations: config.max_iterations,
            prune_unreachable: config.prune_unreachable,
        }
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn movement(&self) -> &MovementModel {
        &self.movement
    }

    fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn prune_unreachable(&self) -> bool {
        self.prune_unreachable
    }

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors {
        grid.neighbours_and_cost(node, &self.movement)
    }

    /// Manhattan distance in straight-move costs, times the heuristic factor. Admissible for
    /// four-way movement with factor 1; with diagonal moves it overestimates, which is accepted
    /// in exchange for fewer expansions.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        ((p1.manhattan_distance(p2) * self.movement.direct_cost()) as f32 * self.heuristic_factor)
            as i32
    }
}

#[cfg(test)]
mod tests {
    use grid_util::ValueGrid;

    use super::*;
    use crate::error::SearchFailure;

    fn solver(allow_diag: bool) -> AstarSolver {
        if allow_diag {
            AstarSolver::with_movement(MovementModel::octile())
        } else {
            AstarSolver::new()
        }
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for allow_diag in [false, true] {
            let grid = OccupancyGrid::new(1, 1, false);
            let start = Point::new(0, 0);
            let path = solver(allow_diag)
                .get_path_single_goal(&grid, start, start)
                .unwrap();
            assert!(path.len() == 1);
        }
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        for (allow_diag, expected) in [(false, 5), (true, 4)] {
            let mut grid = OccupancyGrid::new(3, 3, false);
            grid.set(1, 1, true);
            let start = Point::new(0, 0);
            let end = Point::new(2, 2);
            let path = solver(allow_diag)
                .get_path_single_goal(&grid, start, end)
                .unwrap();
            assert_eq!(path.len(), expected);
        }
    }

    #[test]
    fn corner_cutting_lengthens_diagonal_path() {
        let mut grid = OccupancyGrid::new(3, 3, false);
        grid.set(1, 1, true);
        grid.allow_corner_cutting = false;
        let path = solver(true)
            .get_path_single_goal(&grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap();
        assert_eq!(path.len(), 5);
    }

    // Tests whether allowing diagonals has the expected effect on path existence in a minimal setting.
    #[test]
    fn test_diagonal_switch_path() {
        //  __
        // |#.|
        // |.#|
        //  __
        let grid = OccupancyGrid::from_ascii(&["#.", ".#"]);
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        assert!(solver(false).get_path_single_goal(&grid, start, goal).is_none());
        assert!(solver(true).get_path_single_goal(&grid, start, goal).is_some());
    }

    #[test]
    fn gap_in_wall() {
        // .....
        // .....
        // ##.##
        // .....
        // .....
        let grid = OccupancyGrid::from_ascii(&[".....", ".....", "##.##", ".....", "....."]);
        let path = solver(false)
            .get_path_single_goal(&grid, Point::new(0, 0), Point::new(4, 4))
            .unwrap();
        assert_eq!(path.len(), 9);
        assert!(path.contains(&Point::new(2, 2)));
    }

    #[test]
    fn enclosed_goal_closes_start_component() {
        // ...#.
        // ..#.#
        // ...#.
        let grid = OccupancyGrid::from_ascii(&["...#.", "..#.#", "...#."]);
        let failed = solver(false)
            .search(&grid, Point::new(0, 0), Point::new(3, 1))
            .unwrap_err();
        assert_eq!(failed.reason, SearchFailure::Unreachable);
        assert_eq!(failed.passes, grid.component_size(&Point::new(0, 0)));
        assert_eq!(failed.passes, 8);
    }

    #[test]
    fn pruned_search_reports_no_passes() {
        let grid = OccupancyGrid::from_ascii(&["...#.", "..#.#", "...#."]);
        let mut astar = solver(false);
        astar.prune_unreachable = true;
        let failed = astar
            .search(&grid, Point::new(0, 0), Point::new(3, 1))
            .unwrap_err();
        assert_eq!(failed.reason, SearchFailure::Unreachable);
        assert_eq!(failed.passes, 0);
    }

    #[test]
    fn wall_endpoints_are_unreachable() {
        let mut grid = OccupancyGrid::new(3, 3, false);
        grid.set(2, 2, true);
        let failed = solver(false)
            .search(&grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap_err();
        assert_eq!(failed.reason, SearchFailure::Unreachable);
        assert_eq!(failed.passes, 0);
    }

    #[test]
    fn iteration_cap() {
        let grid = OccupancyGrid::new(20, 20, false);
        let mut astar = solver(false);
        astar.max_iterations = 5;
        let failed = astar
            .search(&grid, Point::new(0, 0), Point::new(19, 19))
            .unwrap_err();
        assert_eq!(failed.reason, SearchFailure::IterationCapExceeded { cap: 5 });
    }

    #[test]
    fn path_cost_octile() {
        let astar = solver(true);
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        assert_eq!(astar.get_path_cost(&path), 24);
        assert!((astar.get_path_cost_float(&path) - 2.4).abs() < 1e-9);
    }
}
