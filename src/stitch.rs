//! Joins fine searches between consecutive route waypoints into one path.

use std::time::Instant;

use grid_util::Point;
use itertools::Itertools;
use log::{debug, warn};

use crate::error::RouteFailure;
use crate::occupancy_grid::OccupancyGrid;
use crate::result::PathResult;
use crate::solver::GridSolver;
use crate::trace::SearchTrace;

/// Runs `solver` between every pair of consecutive points of `route` and concatenates the
/// segments, dropping the position shared by two segments. A single point route is searched
/// against itself. The first failing segment ends the run.
pub fn stitch_route<S: GridSolver>(
    solver: &S,
    grid: &OccupancyGrid,
    route: Vec<Point>,
    started: Instant,
) -> PathResult {
    let segments: Vec<(Point, Point)> = match route.as_slice() {
        [only] => vec![(*only, *only)],
        _ => route.iter().copied().tuple_windows().collect(),
    };
    let mut path: Vec<Point> = Vec::new();
    let mut passes = 0;
    let mut trace = SearchTrace::new();
    let mut outcome = Ok(());
    for (index, (from, to)) in segments.into_iter().enumerate() {
        match solver.search(grid, from, to) {
            Ok(segment) => {
                debug!(
                    "Segment {index} {from:?} -> {to:?}: {} cells in {} passes",
                    segment.path.len(),
                    segment.passes
                );
                passes += segment.passes;
                trace.push_segment(segment.steps);
                let skip = usize::from(!path.is_empty());
                path.extend(segment.path.into_iter().skip(skip));
            }
            Err(failed) => {
                warn!("Segment {index} {from:?} -> {to:?} failed: {}", failed.reason);
                passes += failed.passes;
                trace.push_segment(failed.steps);
                outcome = Err(RouteFailure::Segment {
                    index,
                    from,
                    to,
                    reason: failed.reason,
                });
                path.clear();
                break;
            }
        }
    }
    PathResult {
        outcome,
        path,
        route,
        passes,
        elapsed: started.elapsed(),
        trace,
    }
}
