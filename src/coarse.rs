//! Chooses the sequence of waypoints the fine searches are run between.

use fxhash::FxHashSet;
use grid_util::Point;
use log::{debug, info, warn};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::config::CoarseStrategy;
use crate::error::CoarseFailure;
use crate::waypoint_graph::WaypointGraph;

/// Routes from the start to the end of `graph` with the given strategy. The route includes both
/// endpoints; it is a single point when they coincide.
pub fn coarse_route(
    graph: &WaypointGraph,
    strategy: CoarseStrategy,
    max_iterations: usize,
) -> Result<Vec<Point>, CoarseFailure> {
    let route = match strategy {
        CoarseStrategy::Greedy => greedy_route(graph, max_iterations),
        CoarseStrategy::ShortestPath => shortest_route(graph),
    }?;
    info!("Coarse route visits {} waypoints", route.len());
    Ok(route)
}

fn endpoints(graph: &WaypointGraph) -> Result<(usize, usize, Point), CoarseFailure> {
    let (Some(start), Some(end)) = (graph.start(), graph.end()) else {
        return Err(CoarseFailure::MissingEndpoint);
    };
    match (graph.index_of(&start), graph.index_of(&end)) {
        (Some(s), Some(e)) => Ok((s, e, end)),
        _ => Err(CoarseFailure::MissingEndpoint),
    }
}

/// Repeatedly steps to the unvisited neighbour with the smallest `g + h`, where `g` is the
/// Manhattan distance of the step and `h` the Manhattan distance to the end. Equal sums prefer the
/// smaller `h`, then the earlier neighbour. Never backtracks.
pub fn greedy_route(
    graph: &WaypointGraph,
    max_iterations: usize,
) -> Result<Vec<Point>, CoarseFailure> {
    let (start, end, end_point) = endpoints(graph)?;
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut current = start;
    let mut route = Vec::new();
    route.extend(graph.position_at(start));
    let mut moves = 0;
    while current != end {
        if moves >= max_iterations {
            warn!("Coarse routing gave up after {moves} moves");
            return Err(CoarseFailure::IterationCapExceeded {
                cap: max_iterations,
            });
        }
        let Some(here) = graph.position_at(current) else {
            return Err(CoarseFailure::MissingEndpoint);
        };
        let next = graph
            .neighbour_indices(current)
            .filter(|n| !visited.contains(n))
            .filter_map(|n| graph.position_at(n).map(|p| (n, p)))
            .min_by_key(|(_, p)| {
                let h = p.manhattan_distance(&end_point);
                (here.manhattan_distance(p) + h, h)
            });
        let Some((n, p)) = next else {
            warn!("Coarse routing is stuck at {here:?}");
            return Err(CoarseFailure::DeadEnd { at: here });
        };
        debug!("Coarse step {here:?} -> {p:?}");
        visited.insert(n);
        route.push(p);
        current = n;
        moves += 1;
    }
    Ok(route)
}

/// Shortest route over the waypoint graph with Manhattan edge weights.
pub fn shortest_route(graph: &WaypointGraph) -> Result<Vec<Point>, CoarseFailure> {
    let (start, end, end_point) = endpoints(graph)?;
    let mut network: UnGraph<Point, i32> = UnGraph::with_capacity(graph.len(), graph.edge_count());
    let nodes: Vec<NodeIndex> = graph
        .waypoints()
        .map(|w| network.add_node(w.position))
        .collect();
    for (i, &a) in nodes.iter().enumerate() {
        for j in graph.neighbour_indices(i).filter(|&j| j > i) {
            let b = nodes[j];
            let weight = network[a].manhattan_distance(&network[b]);
            network.add_edge(a, b, weight);
        }
    }
    let goal = nodes[end];
    let (cost, indices) = astar(
        &network,
        nodes[start],
        |n| n == goal,
        |e| *e.weight(),
        |n| network[n].manhattan_distance(&end_point),
    )
    .ok_or(CoarseFailure::Disconnected)?;
    debug!("Shortest coarse route has Manhattan length {cost}");
    Ok(indices.into_iter().map(|n| network[n]).collect())
}
