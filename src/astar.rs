//! This module implements a traced variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Nodes live in an arena keyed by [CellKey]; parents are arena indices. Every pass records which
//! node was closed and which nodes were discovered so the search can be replayed afterwards.
use fxhash::FxBuildHasher;
use grid_util::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::SearchFailure;
use crate::key::CellKey;
use crate::node::SearchNode;
use crate::trace::TraceStep;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first. Among equal estimates, the largest cost (deepest node)
        // and then the most recently pushed entry is popped first.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.cmp(&other.cost) {
                Ordering::Equal => self.sequence.cmp(&other.sequence),
                s => s,
            },
            s => s,
        }
    }
}

/// A successful search.
#[derive(Clone, Debug)]
pub struct SearchOutcome<C> {
    /// Positions from start to goal inclusive.
    pub path: Vec<Point>,
    pub cost: C,
    /// Number of closed nodes.
    pub passes: usize,
    /// Number of nodes that were ever discovered.
    pub discovered: usize,
    pub steps: Vec<TraceStep>,
}

/// A search that ended without reaching the goal, with the work done until then.
#[derive(Clone, Debug)]
pub struct FailedSearch {
    pub reason: SearchFailure,
    pub passes: usize,
    pub discovered: usize,
    pub steps: Vec<TraceStep>,
}

impl FailedSearch {
    pub(crate) fn without_search(reason: SearchFailure) -> FailedSearch {
        FailedSearch {
            reason,
            passes: 0,
            discovered: 0,
            steps: Vec::new(),
        }
    }
}

fn reverse_path<C>(nodes: &FxIndexMap<CellKey, SearchNode<C>>, start: usize) -> Vec<Point> {
    let node_at = |i: usize| nodes.get_index(i).map(|(_, node)| node);
    let mut path: Vec<Point> = std::iter::successors(node_at(start), |node| {
        node.parent.and_then(node_at)
    })
    .map(|node| node.position)
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `goal` is closed. `successors` yields the traversable neighbours of
/// a position with their move cost; obstacles must already be filtered out. Closed nodes are
/// never reopened. The search gives up once `max_iterations` nodes have been closed.
pub fn astar_traced<C, FN, IN, FH>(
    start: &Point,
    goal: &Point,
    mut successors: FN,
    mut heuristic: FH,
    max_iterations: usize,
) -> Result<SearchOutcome<C>, FailedSearch>
where
    C: Zero + Ord + Copy,
    FN: FnMut(&Point) -> IN,
    IN: IntoIterator<Item = (Point, C)>,
    FH: FnMut(&Point) -> C,
{
    let mut to_see = BinaryHeap::new();
    let mut nodes: FxIndexMap<CellKey, SearchNode<C>> = FxIndexMap::default();
    let mut steps: Vec<TraceStep> = Vec::new();
    let mut sequence = 0;
    let mut passes = 0;

    let start_h = heuristic(start);
    nodes.insert(
        CellKey::of(start),
        SearchNode::new(*start, Zero::zero(), start_h, None),
    );
    to_see.push(SmallestCostHolder {
        estimated_cost: start_h,
        cost: Zero::zero(),
        sequence,
        index: 0,
    });

    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let Some((_, node)) = nodes.get_index_mut(index) else {
            continue;
        };
        // A node may have been pushed several times when a cheaper way to reach it was found.
        // Only the entry matching its current cost counts, and only while it is open.
        if node.closed || cost > node.g {
            continue;
        }
        if passes >= max_iterations {
            warn!("Search from {start:?} to {goal:?} gave up after {passes} passes");
            return Err(FailedSearch {
                reason: SearchFailure::IterationCapExceeded {
                    cap: max_iterations,
                },
                passes,
                discovered: nodes.len(),
                steps,
            });
        }
        node.closed = true;
        passes += 1;
        let position = node.position;

        if position == *goal {
            steps.push(TraceStep {
                closed: position,
                opened: SmallVec::new(),
            });
            let path = reverse_path(&nodes, index);
            debug!("Reached {goal:?} from {start:?} in {passes} passes");
            return Ok(SearchOutcome {
                path,
                cost,
                passes,
                discovered: nodes.len(),
                steps,
            });
        }

        let mut opened = SmallVec::new();
        for (successor, move_cost) in successors(&position) {
            let new_cost = cost + move_cost;
            let (estimated_cost, n) = match nodes.entry(CellKey::of(&successor)) {
                Vacant(e) => {
                    let h = heuristic(&successor);
                    let n = e.index();
                    e.insert(SearchNode::new(successor, new_cost, h, Some(index)));
                    opened.push(successor);
                    (new_cost + h, n)
                }
                Occupied(mut e) => {
                    let n = e.index();
                    let existing = e.get_mut();
                    if existing.closed || existing.g <= new_cost {
                        continue;
                    }
                    existing.g = new_cost;
                    existing.parent = Some(index);
                    (new_cost + existing.h, n)
                }
            };
            sequence += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost,
                cost: new_cost,
                sequence,
                index: n,
            });
        }
        steps.push(TraceStep {
            closed: position,
            opened,
        });
    }
    debug!("Open set exhausted after {passes} passes, {goal:?} is unreachable from {start:?}");
    Err(FailedSearch {
        reason: SearchFailure::Unreachable,
        passes,
        discovered: nodes.len(),
        steps,
    })
}
