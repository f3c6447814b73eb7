use crate::config::{Connectivity, MovementModel};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::grid::ValueGrid;
use grid_util::{BoolGrid, Point};
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

const CARDINAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// [OccupancyGrid] stores the raw [bool] cell values in a [BoolGrid], where a wall is [true] and a
/// free cell [false], and maintains the connected components of the free cells in a [UnionFind]
/// structure. Implements [ValueGrid] by building on [BoolGrid].
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    pub connectivity: Connectivity,
    pub allow_corner_cutting: bool,
}

impl OccupancyGrid {
    /// Builds a grid from a row-major grayscale raster with values in `0.0..=1.0`. Pixels darker
    /// than `sensitivity` become walls. Missing pixels are treated as walls.
    pub fn from_luminance(
        width: usize,
        height: usize,
        luminance: &[f32],
        sensitivity: f32,
    ) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(width, height, false);
        for y in 0..height {
            for x in 0..width {
                let value = luminance.get(y * width + x).copied().unwrap_or(0.0);
                grid.grid.set(x as i32, y as i32, value < sensitivity);
            }
        }
        grid.generate_components();
        grid
    }

    /// Parses rows of `#` (wall) and any other character (free). The first row is the top of the
    /// grid, i.e. the largest y, matching the [Display] output.
    pub fn from_ascii(rows: &[&str]) -> OccupancyGrid {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = OccupancyGrid::new(width, height, false);
        for (row_ix, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_ix) as i32;
            for (x, c) in row.chars().enumerate() {
                grid.grid.set(x as i32, y, c == '#');
            }
        }
        grid.generate_components();
        grid
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.grid.width()
            && (point.y as usize) < self.grid.height()
    }

    /// True outside the grid and on walls.
    pub fn is_obstacle(&self, point: &Point) -> bool {
        !self.in_bounds(point) || self.grid.get(point.x, point.y)
    }

    pub fn is_free(&self, point: &Point) -> bool {
        !self.is_obstacle(point)
    }

    fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.grid.width() + point.x as usize
    }

    /// Free in-bounds cells of the von Neumann neighbourhood.
    pub fn neighbours4(&self, point: &Point) -> SmallVec<[Point; 8]> {
        CARDINAL
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.is_free(p))
            .collect()
    }

    /// Free in-bounds cells of the Moore neighbourhood. Without corner cutting a diagonal cell
    /// also needs both orthogonal cells between it and `point` to be free.
    pub fn neighbours8(&self, point: &Point) -> SmallVec<[Point; 8]> {
        let mut neighbours = self.neighbours4(point);
        for (dx, dy) in DIAGONAL {
            let p = Point::new(point.x + dx, point.y + dy);
            if self.can_move_to(p, *point) {
                neighbours.push(p);
            }
        }
        neighbours
    }

    /// The neighbourhood selected by [OccupancyGrid::connectivity].
    pub fn neighbourhood(&self, point: &Point) -> SmallVec<[Point; 8]> {
        match self.connectivity {
            Connectivity::Four => self.neighbours4(point),
            Connectivity::Eight => self.neighbours8(point),
        }
    }

    /// Neighbours reachable in one move under `movement`, paired with the move cost.
    pub fn neighbours_and_cost(
        &self,
        pos: &Point,
        movement: &MovementModel,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        let neighbours = match movement.connectivity() {
            Connectivity::Four => self.neighbours4(pos),
            Connectivity::Eight => self.neighbours8(pos),
        };
        neighbours
            .into_iter()
            .map(|p| (p, movement.step_cost(p.x - pos.x, p.y - pos.y)))
            .collect()
    }

    /// Whether a single move from `start` to the adjacent cell `pos` is legal.
    pub fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        if !self.is_free(&pos) {
            return false;
        }
        let diagonal = pos.x != start.x && pos.y != start.y;
        if !diagonal || self.allow_corner_cutting {
            true
        } else {
            self.is_free(&Point::new(start.x, pos.y)) && self.is_free(&Point::new(pos.x, start.y))
        }
    }

    /// Flips a cell between wall and free. Returns the new state, or [None] when out of bounds.
    pub fn toggle(&mut self, point: &Point) -> Option<bool> {
        if !self.in_bounds(point) {
            return None;
        }
        let blocked = !self.grid.get(point.x, point.y);
        self.set(point.x, point.y, blocked);
        Some(blocked)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_free(start) && self.is_free(goal) {
            !self.components.equiv(self.ix(start), self.ix(goal))
        } else {
            true
        }
    }

    /// Number of free cells in the component of `point`, zero for obstacles.
    pub fn component_size(&self, point: &Point) -> usize {
        if self.is_obstacle(point) {
            return 0;
        }
        let component = self.get_component(point);
        let mut size = 0;
        for x in 0..self.grid.width() as i32 {
            for y in 0..self.grid.height() as i32 {
                let p = Point::new(x, y);
                if !self.grid.get(x, y) && self.get_component(&p) == component {
                    size += 1;
                }
            }
        }
        size
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width();
        let h = self.grid.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.ix(&point);
                // Half of the neighbourhood suffices, the other half links back to this cell.
                let forward: &[(i32, i32)] = match self.connectivity {
                    Connectivity::Four => &[(1, 0), (0, 1)],
                    Connectivity::Eight => &[(1, 0), (0, 1), (1, 1), (1, -1)],
                };
                for (dx, dy) in forward {
                    let p = Point::new(x + dx, y + dy);
                    if self.can_move_to(p, point) {
                        let ix = self.ix(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Switches the neighbourhood used for components. The components are regenerated on the
    /// next [update](Self::update).
    pub fn set_connectivity(&mut self, connectivity: Connectivity, allow_corner_cutting: bool) {
        if self.connectivity != connectivity || self.allow_corner_cutting != allow_corner_cutting
        {
            self.connectivity = connectivity;
            self.allow_corner_cutting = allow_corner_cutting;
            self.components_dirty = true;
        }
    }

    /// Renders the grid like [Display] with `S` and `E` marking start and end and `*` marking
    /// path cells.
    pub fn render_with(&self, start: Option<Point>, end: Option<Point>, path: &[Point]) -> String {
        let mut out = String::new();
        for y in (0..self.grid.height() as i32).rev() {
            for x in 0..self.grid.width() as i32 {
                let p = Point::new(x, y);
                let c = if Some(p) == start {
                    'S'
                } else if Some(p) == end {
                    'E'
                } else if self.grid.get(x, y) {
                    '#'
                } else if path.contains(&p) {
                    '*'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_with(None, None, &[]))
    }
}

impl ValueGrid<bool> for OccupancyGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        let mut base_grid = OccupancyGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            connectivity: Connectivity::Four,
            allow_corner_cutting: true,
        };
        base_grid.generate_components();
        base_grid
    }
    fn get(&self, x: i32, y: i32) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    fn set(&mut self, x: i32, y: i32, blocked: bool) {
        let p = Point::new(x, y);
        let was_blocked = self.grid.get(x, y);
        self.grid.set(x, y, blocked);
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let p_ix = self.ix(&p);
            for n in self.neighbourhood(&p) {
                let n_ix = self.ix(&n);
                self.components.union(p_ix, n_ix);
            }
            // Unblocking can also reconnect diagonals around this cell when corners may not be
            // cut, which the local union above does not see.
            if self.connectivity == Connectivity::Eight && !self.allow_corner_cutting {
                self.components_dirty = true;
            }
        }
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let mut grid = OccupancyGrid::new(3, 2, false);
        grid.set(1, 0, true);
        grid.set(1, 1, true);
        grid.generate_components();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_eq!(grid.component_size(&p1), 2);
        assert_eq!(grid.component_size(&p2), 0);
    }

    #[test]
    fn obstacles_outside_bounds() {
        let grid = OccupancyGrid::new(2, 2, false);
        assert!(grid.is_obstacle(&Point::new(-1, 0)));
        assert!(grid.is_obstacle(&Point::new(0, 2)));
        assert!(!grid.is_obstacle(&Point::new(1, 1)));
    }

    #[test]
    fn neighbourhoods_exclude_walls() {
        let mut grid = OccupancyGrid::new(3, 3, false);
        grid.set(1, 2, true);
        let centre = Point::new(1, 1);
        let n4 = grid.neighbours4(&centre);
        assert_eq!(n4.len(), 3);
        assert!(!n4.contains(&Point::new(1, 2)));
        assert_eq!(grid.neighbours8(&centre).len(), 7);
        assert_eq!(grid.neighbours4(&Point::new(0, 0)).len(), 2);
    }

    #[test]
    fn corner_cutting_switch() {
        //  __
        // |#.|
        // |.#|
        //  __
        let mut grid = OccupancyGrid::new(2, 2, false);
        grid.set(0, 1, true);
        grid.set(1, 0, true);
        let origin = Point::new(0, 0);
        assert!(grid.neighbours8(&origin).contains(&Point::new(1, 1)));
        grid.allow_corner_cutting = false;
        assert!(grid.neighbours8(&origin).is_empty());
    }

    // Tests whether allowing diagonals has the expected effect on diagonal reachability in a minimal setting.
    #[test]
    fn test_diagonal_switch_reachable() {
        let mut grid = OccupancyGrid::from_ascii(&["#.", ".#"]);
        let start = Point::new(0, 0);
        let end = Point::new(1, 1);
        assert!(grid.unreachable(&start, &end));
        grid.set_connectivity(Connectivity::Eight, true);
        grid.update();
        assert!(grid.reachable(&start, &end));
        grid.set_connectivity(Connectivity::Eight, false);
        grid.update();
        assert!(grid.unreachable(&start, &end));
    }

    #[test]
    fn unblocking_joins_components() {
        let mut grid = OccupancyGrid::from_ascii(&[".#."]);
        let left = Point::new(0, 0);
        let right = Point::new(2, 0);
        assert!(grid.unreachable(&left, &right));
        assert_eq!(grid.toggle(&Point::new(1, 0)), Some(false));
        assert!(grid.reachable(&left, &right));
        assert_eq!(grid.toggle(&Point::new(1, 0)), Some(true));
        assert!(grid.components_dirty);
        grid.update();
        assert!(grid.unreachable(&left, &right));
        assert_eq!(grid.toggle(&Point::new(5, 0)), None);
    }

    #[test]
    fn luminance_threshold() {
        let raster = [0.9, 0.1, 0.6, 0.4];
        let grid = OccupancyGrid::from_luminance(2, 2, &raster, 0.5);
        assert!(!grid.get(0, 0));
        assert!(grid.get(1, 0));
        assert!(!grid.get(0, 1));
        assert!(grid.get(1, 1));
    }

    #[test]
    fn ascii_round_trip_display() {
        let rows = ["..#", "#..", "..."];
        let grid = OccupancyGrid::from_ascii(&rows);
        assert!(grid.get(2, 2));
        assert!(grid.get(0, 1));
        assert_eq!(grid.to_string(), "..#\n#..\n...\n");
    }
}
