use core::fmt;
use std::time::Duration;

use grid_util::Point;

use crate::error::RouteFailure;
use crate::trace::SearchTrace;

/// Everything a route query produced, successful or not.
#[derive(Clone, Debug)]
pub struct PathResult {
    pub outcome: Result<(), RouteFailure>,
    /// Start to end inclusive; empty when no path was found.
    pub path: Vec<Point>,
    /// Waypoints the fine searches ran between.
    pub route: Vec<Point>,
    /// Nodes closed over all segment searches, including a failed one.
    pub passes: usize,
    pub elapsed: Duration,
    pub trace: SearchTrace,
}

impl PathResult {
    pub(crate) fn failed(
        failure: RouteFailure,
        route: Vec<Point>,
        elapsed: Duration,
    ) -> PathResult {
        PathResult {
            outcome: Err(failure),
            path: Vec::new(),
            route,
            passes: 0,
            elapsed,
            trace: SearchTrace::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn failure(&self) -> Option<RouteFailure> {
        self.outcome.err()
    }

    /// Number of positions on the path.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Ok(()) => write!(
                f,
                "End point reached!\nTime: {}ms\nPasses: {}\nPath length: {}",
                self.elapsed.as_millis(),
                self.passes,
                self.path_length()
            ),
            Err(failure) => write!(
                f,
                "End point couldn't be reached!\nTime: {}ms\nPasses: {}\nReason: {failure}",
                self.elapsed.as_millis(),
                self.passes
            ),
        }
    }
}
