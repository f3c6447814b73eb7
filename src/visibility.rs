//! Line of sight between cell centres.
//!
//! Coordinates are doubled so that cell centres and cell corners are both integers, which keeps
//! every intersection test exact: `line_of_sight(a, b) == line_of_sight(b, a)` for all cells.

use grid_util::Point;

use crate::occupancy_grid::OccupancyGrid;

type Vertex = (i64, i64);

fn centre(p: &Point) -> Vertex {
    (2 * p.x as i64 + 1, 2 * p.y as i64 + 1)
}

/// Whether segment `p1`-`p2` meets segment `p3`-`p4`, endpoints included. Parallel segments never
/// meet.
fn segments_intersect(p1: Vertex, p2: Vertex, p3: Vertex, p4: Vertex) -> bool {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;
    let (x4, y4) = p4;
    let mut den = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);
    if den == 0 {
        return false;
    }
    let mut ua = (x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3);
    let mut ub = (x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3);
    if den < 0 {
        den = -den;
        ua = -ua;
        ub = -ub;
    }
    (0..=den).contains(&ua) && (0..=den).contains(&ub)
}

/// Whether the segment between the centres of `a` and `b` touches the unit square of `cell`.
pub fn crosses_cell(a: &Point, b: &Point, cell: &Point) -> bool {
    let p1 = centre(a);
    let p2 = centre(b);
    let left = 2 * cell.x as i64;
    let bottom = 2 * cell.y as i64;
    let right = left + 2;
    let top = bottom + 2;
    segments_intersect(p1, p2, (left, bottom), (left, top))
        || segments_intersect(p1, p2, (right, bottom), (right, top))
        || segments_intersect(p1, p2, (left, bottom), (right, bottom))
        || segments_intersect(p1, p2, (left, top), (right, top))
}

/// Whether any obstacle cell in the bounding box of `a` and `b` blocks the straight segment
/// between their centres. Axis-aligned segments are blocked by any obstacle on their line.
pub fn line_of_sight(grid: &OccupancyGrid, a: &Point, b: &Point) -> bool {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    let axis_aligned = a.x == b.x || a.y == b.y;
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let cell = Point::new(x, y);
            if grid.is_obstacle(&cell) && (axis_aligned || crosses_cell(a, b, &cell)) {
                return false;
            }
        }
    }
    true
}
