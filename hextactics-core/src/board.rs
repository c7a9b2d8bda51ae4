//! Hex grid geometry with axial coordinates

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// Direction vectors in axial coordinates (dq, dr), flat-top layout.
/// Ring walking depends on this exact order.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube axis
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance between two hexes (cube metric)
    pub fn distance_to(&self, other: Hex) -> u32 {
        let dx = (self.q - other.q).unsigned_abs();
        let dy = (self.s() - other.s()).unsigned_abs();
        let dz = (self.r - other.r).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> u32 {
        self.distance_to(Hex::ORIGIN)
    }

    /// Check if this hex lies inside a hexagon of the given radius around the origin
    pub fn is_within(&self, radius: u32) -> bool {
        self.distance_to_center() <= radius
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Hex {
        let (dq, dr) = DIRECTIONS[direction % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, in `DIRECTIONS` order
    pub fn neighbors(&self) -> [Hex; 6] {
        std::array::from_fn(|dir| self.neighbor(dir))
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k)
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Hex::new(q, r)
    }
}

/// Unit vector for a direction index
pub fn direction(dir: usize) -> Hex {
    Hex::from(DIRECTIONS[dir % 6])
}

/// All hexes at exactly `radius` from `center`.
///
/// Starts at `center + direction(4) * radius` and walks six arcs of
/// `radius` steps, arc `i` along `direction(i)`.
pub fn ring(center: Hex, radius: u32) -> Vec<Hex> {
    if radius == 0 {
        return vec![center];
    }
    let steps = radius as i32;
    let mut out = Vec::with_capacity(6 * radius as usize);
    let mut cursor = center + direction(4) * steps;
    for side in 0..6 {
        for _ in 0..steps {
            out.push(cursor);
            cursor = cursor.neighbor(side);
        }
    }
    out
}

/// All hexes within `radius` of the origin.
///
/// Ordered by q ascending, then r ascending. World generation draws
/// random values in this order, so it must not change.
pub fn hexagon(radius: u32) -> Vec<Hex> {
    let radius = radius as i32;
    let mut out = Vec::new();
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            out.push(Hex::new(q, r));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn random_hex(rng: &mut ChaCha8Rng) -> Hex {
        Hex::new(rng.gen_range(-50..=50), rng.gen_range(-50..=50))
    }

    #[test]
    fn test_neighbors_order() {
        let n = Hex::new(2, -1).neighbors();
        assert_eq!(n[0], Hex::new(3, -1));
        assert_eq!(n[1], Hex::new(3, -2));
        assert_eq!(n[2], Hex::new(2, -2));
        assert_eq!(n[3], Hex::new(1, -1));
        assert_eq!(n[4], Hex::new(1, 0));
        assert_eq!(n[5], Hex::new(2, 0));
        for h in n {
            assert_eq!(h.distance_to(Hex::new(2, -1)), 1);
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(Hex::new(0, 0).distance_to_center(), 0);
        assert_eq!(Hex::new(1, 0).distance_to_center(), 1);
        assert_eq!(Hex::new(2, 2).distance_to_center(), 4);
        assert_eq!(Hex::new(3, -3).distance_to_center(), 3);
        assert_eq!(Hex::new(-2, 5).distance_to(Hex::new(1, 1)), 4);
    }

    #[test]
    fn test_distance_metric_axioms() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let a = random_hex(&mut rng);
            let b = random_hex(&mut rng);
            let c = random_hex(&mut rng);
            assert_eq!(a.distance_to(a), 0);
            assert_eq!(a.distance_to(b), b.distance_to(a));
            if a != b {
                assert!(a.distance_to(b) > 0);
            }
            assert!(a.distance_to(c) <= a.distance_to(b) + b.distance_to(c));
        }
    }

    #[test]
    fn test_ring_zero_is_center() {
        let c = Hex::new(4, -7);
        assert_eq!(ring(c, 0), vec![c]);
    }

    #[test]
    fn test_ring_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let center = random_hex(&mut rng);
            let k = rng.gen_range(1..=8u32);
            let cells = ring(center, k);
            assert_eq!(cells.len(), 6 * k as usize);
            let unique: HashSet<Hex> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len(), "ring has duplicates");
            for h in &cells {
                assert_eq!(center.distance_to(*h), k);
            }
        }
    }

    #[test]
    fn test_ring_starts_at_direction_four() {
        let cells = ring(Hex::ORIGIN, 2);
        assert_eq!(cells[0], Hex::new(-2, 2));
        assert_eq!(cells[1], Hex::new(-1, 2));
    }

    #[test]
    fn test_hexagon_size_and_order() {
        for radius in 0..6u32 {
            let cells = hexagon(radius);
            let n = radius as usize;
            assert_eq!(cells.len(), 3 * n * (n + 1) + 1);
            assert!(cells.iter().all(|h| h.is_within(radius)));
        }
        let cells = hexagon(1);
        assert_eq!(cells[0], Hex::new(-1, 0));
        assert_eq!(cells[1], Hex::new(-1, 1));
        assert_eq!(cells[2], Hex::new(0, -1));
    }
}
