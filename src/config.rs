//! Movement rules and search limits shared by the fine and coarse searches.

use crate::{DEFAULT_MAX_COARSE_ITERATIONS, DEFAULT_MAX_ITERATIONS, DIAGONAL_COST, DIRECT_COST};

/// Which neighbours of a cell a single move can reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

/// Transition costs of a single move on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementModel {
    /// Von Neumann neighbourhood where every move costs the same.
    FourWay { cost: i32 },
    /// Moore neighbourhood with separate costs for straight and diagonal moves.
    EightWay { direct: i32, diagonal: i32 },
}

impl Default for MovementModel {
    fn default() -> MovementModel {
        MovementModel::FourWay { cost: 1 }
    }
}

impl MovementModel {
    /// Octile-style integer costs, [DIRECT_COST] straight and [DIAGONAL_COST] diagonal.
    pub fn octile() -> MovementModel {
        MovementModel::EightWay {
            direct: DIRECT_COST,
            diagonal: DIAGONAL_COST,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        match self {
            MovementModel::FourWay { .. } => Connectivity::Four,
            MovementModel::EightWay { .. } => Connectivity::Eight,
        }
    }

    /// Cost of a straight move, which is also the unit the heuristic is scaled by.
    pub fn direct_cost(&self) -> i32 {
        match *self {
            MovementModel::FourWay { cost } => cost,
            MovementModel::EightWay { direct, .. } => direct,
        }
    }

    /// Cost of moving between two adjacent cells.
    pub fn step_cost(&self, dx: i32, dy: i32) -> i32 {
        match *self {
            MovementModel::FourWay { cost } => cost,
            MovementModel::EightWay { direct, diagonal } => {
                if dx != 0 && dy != 0 {
                    diagonal
                } else {
                    direct
                }
            }
        }
    }
}

/// How the coarse waypoint sequence is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CoarseStrategy {
    /// Walk to the unvisited visible waypoint with the smallest `g + h`, without backtracking.
    #[default]
    Greedy,
    /// Shortest path over the waypoint graph with Manhattan edge weights.
    ShortestPath,
}

/// Settings of a [Pathfinder](crate::Pathfinder) run.
#[derive(Clone, Debug)]
pub struct PathfinderConfig {
    pub movement: MovementModel,
    /// Scales the heuristic. Values above 1 trade path quality for fewer expansions
    /// (Weighted A*).
    pub heuristic_factor: f32,
    /// Allow diagonal moves between two blocked orthogonal cells.
    pub allow_corner_cutting: bool,
    /// Maximum number of nodes a single fine search may close.
    pub max_iterations: usize,
    /// Maximum number of moves of the coarse router.
    pub max_coarse_iterations: usize,
    pub coarse_strategy: CoarseStrategy,
    /// Skip the fine search when the connected components already prove the goal unreachable.
    /// Such runs report zero passes.
    pub prune_unreachable: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            movement: MovementModel::default(),
            heuristic_factor: 1.0,
            allow_corner_cutting: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_coarse_iterations: DEFAULT_MAX_COARSE_ITERATIONS,
            coarse_strategy: CoarseStrategy::Greedy,
            prune_unreachable: false,
        }
    }
}

impl PathfinderConfig {
    pub fn with_movement(mut self, movement: MovementModel) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_heuristic_factor(mut self, heuristic_factor: f32) -> Self {
        self.heuristic_factor = heuristic_factor;
        self
    }

    pub fn with_corner_cutting(mut self, allow: bool) -> Self {
        self.allow_corner_cutting = allow;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_coarse_iterations(mut self, max_coarse_iterations: usize) -> Self {
        self.max_coarse_iterations = max_coarse_iterations;
        self
    }

    pub fn with_coarse_strategy(mut self, strategy: CoarseStrategy) -> Self {
        self.coarse_strategy = strategy;
        self
    }

    pub fn with_prune_unreachable(mut self, prune: bool) -> Self {
        self.prune_unreachable = prune;
        self
    }
}
