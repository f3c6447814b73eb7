use grid_util::Point;
use smallvec::SmallVec;

use crate::config::MovementModel;
use crate::occupancy_grid::OccupancyGrid;
use crate::solver::GridSolver;
use crate::{DEFAULT_MAX_ITERATIONS, N_SMALLVEC_SIZE};

/// Uniform-cost search, used as the optimality reference for [AstarSolver](super::astar::AstarSolver).
#[derive(Clone, Debug)]
pub struct DijkstraSolver {
    pub movement: MovementModel,
    pub max_iterations: usize,
}

impl DijkstraSolver {
    pub fn new(movement: MovementModel) -> DijkstraSolver {
        DijkstraSolver {
            movement,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(Point, i32); N_SMALLVEC_SIZE]>;

    fn movement(&self) -> &MovementModel {
        &self.movement
    }

    fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn successors(&self, grid: &OccupancyGrid, node: &Point) -> Self::Successors {
        grid.neighbours_and_cost(node, &self.movement)
    }

    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
