//! Observational record of a search, for consumers that replay it step by step after the search
//! has finished. Nothing here is read back by the search itself.

use grid_util::Point;
use smallvec::SmallVec;

/// One pass of a search: the node that was closed and the nodes discovered while expanding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub closed: Point,
    pub opened: SmallVec<[Point; 8]>,
}

/// What a replay consumer should show next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayEvent {
    Open(Point),
    Closed(Point),
    Path(Point),
}

/// Passes of one or more consecutive searches, indexed by a global pass number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTrace {
    steps: Vec<TraceStep>,
    segment_starts: Vec<usize>,
}

impl SearchTrace {
    pub fn new() -> SearchTrace {
        SearchTrace::default()
    }

    /// Appends the passes of the next segment search.
    pub fn push_segment(&mut self, steps: Vec<TraceStep>) {
        self.segment_starts.push(self.steps.len());
        self.steps.extend(steps);
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of recorded passes.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_starts.len()
    }

    pub fn opened_at(&self, pass: usize) -> &[Point] {
        self.steps
            .get(pass)
            .map(|s| s.opened.as_slice())
            .unwrap_or(&[])
    }

    pub fn closed_at(&self, pass: usize) -> Option<Point> {
        self.steps.get(pass).map(|s| s.closed)
    }

    /// Index of the segment search a global pass belongs to.
    pub fn segment_of(&self, pass: usize) -> Option<usize> {
        if pass >= self.steps.len() {
            return None;
        }
        Some(self.segment_starts.partition_point(|&start| start <= pass) - 1)
    }

    pub fn total_opened(&self) -> usize {
        self.steps.iter().map(|s| s.opened.len()).sum()
    }

    /// Events in display order: per pass the newly opened cells, then the closed cell, and
    /// finally every cell of `path`.
    pub fn replay<'a>(&'a self, path: &'a [Point]) -> impl Iterator<Item = ReplayEvent> + 'a {
        self.steps
            .iter()
            .flat_map(|step| {
                step.opened
                    .iter()
                    .map(|p| ReplayEvent::Open(*p))
                    .chain(std::iter::once(ReplayEvent::Closed(step.closed)))
            })
            .chain(path.iter().map(|p| ReplayEvent::Path(*p)))
    }
}
