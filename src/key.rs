use grid_util::Point;

/// Canonical integer key of a grid cell, derived with the
/// [Szudzik pairing function](http://szudzik.com/ElegantPairing.pdf). The pairing is a bijection
/// on `u32 x u32`, so two distinct cells never share a key, including cells on the grid edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(pub u64);

impl CellKey {
    /// Pairs the coordinates of a point. Only defined for non-negative coordinates, which every
    /// in-bounds cell has.
    pub fn of(point: &Point) -> CellKey {
        debug_assert!(point.x >= 0 && point.y >= 0, "{point:?} has no cell key");
        let x = point.x as u32 as u64;
        let y = point.y as u32 as u64;
        if x >= y {
            CellKey(x * x + x + y)
        } else {
            CellKey(y * y + x)
        }
    }

    /// Inverts [CellKey::of].
    pub fn unpair(self) -> Point {
        let z = self.0;
        let s = isqrt(z);
        let rest = z - s * s;
        if rest < s {
            Point::new(rest as i32, s as i32)
        } else {
            Point::new(s as i32, (rest - s) as i32)
        }
    }
}

impl From<Point> for CellKey {
    fn from(point: Point) -> CellKey {
        CellKey::of(&point)
    }
}

// Floor of the square root, corrected for float rounding on large inputs.
fn isqrt(z: u64) -> u64 {
    let mut s = (z as f64).sqrt() as u64;
    while s * s > z {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= z {
        s += 1;
    }
    s
}
