use grid_util::Point;

/// Why a single fine search ended without a path.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    #[error("open set exhausted before the goal was reached")]
    Unreachable,
    #[error("gave up after closing {cap} nodes")]
    IterationCapExceeded { cap: usize },
}

/// Why the coarse router produced no waypoint sequence.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarseFailure {
    #[error("start or end is not part of the waypoint graph")]
    MissingEndpoint,
    #[error("no unvisited waypoint is visible from {at:?}")]
    DeadEnd { at: Point },
    #[error("gave up after {cap} waypoint moves")]
    IterationCapExceeded { cap: usize },
    #[error("end is not connected to start in the waypoint graph")]
    Disconnected,
}

/// Why a full route query failed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFailure {
    #[error("start and end must both be set")]
    NotConfigured,
    #[error("coarse routing failed: {0}")]
    Coarse(#[from] CoarseFailure),
    #[error("segment {index} from {from:?} to {to:?} failed: {reason}")]
    Segment {
        index: usize,
        from: Point,
        to: Point,
        reason: SearchFailure,
    },
}

impl RouteFailure {
    /// The fine search failure behind this route failure, if any.
    pub fn search_failure(&self) -> Option<SearchFailure> {
        match self {
            RouteFailure::Segment { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Rejected grid edit. The grid, start and end are left untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{0:?} is outside the grid")]
    OutOfBounds(Point),
    #[error("{0:?} is an obstacle")]
    Obstacle(Point),
    #[error("{0:?} holds the start or end")]
    Reserved(Point),
}

/// Internal inconsistency found while building the waypoint graph.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphAnomaly {
    #[error("port {port:?} of waypoint {waypoint:?} is neither axis-aligned nor diagonal to it")]
    PortNotAdjacent { waypoint: Point, port: Point },
}
