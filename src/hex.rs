use serde::{Deserialize, Serialize};

/// Outer radius of the flat-top hex layout used to project directions into
/// world space.
pub const HEX_OUTER_RADIUS: f32 = 1.0;

const SQRT_3: f32 = 1.732_050_8;

/// Squared-magnitude dead zone below which a world vector does not resolve to
/// a direction.
const DEAD_ZONE_SQ: f32 = 0.1;

/// The six neighbor offsets. Enumeration order is fixed: direction ties break
/// toward the earliest entry, and every neighbor walk elsewhere follows this
/// order.
pub const DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
];

/// Axial hex coordinate `(q, r)` with implicit cube coordinate `s = -q - r`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit cube coordinate.
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    pub const fn offset(self, dir: HexCoord) -> HexCoord {
        HexCoord::new(self.q + dir.q, self.r + dir.r)
    }

    /// The six neighboring coordinates, in `DIRECTIONS` order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        DIRECTIONS.map(|dir| self.offset(dir))
    }

    /// Cube distance in hex steps.
    pub const fn distance(self, other: HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// World-space center of this coordinate in the fixed flat-top layout.
    pub fn to_world(self) -> (f32, f32) {
        let x = HEX_OUTER_RADIUS * 1.5 * self.q as f32;
        let z = HEX_OUTER_RADIUS * SQRT_3 * (self.r as f32 + self.q as f32 / 2.0);
        (x, z)
    }

    /// Resolves a world-space vector (e.g. camera-relative stick input mapped
    /// onto the ground plane by the host) to the hex direction it points along
    /// most closely, by maximal dot product. The first maximum wins. Inputs
    /// inside the dead zone resolve to `None`.
    pub fn direction_closest_to((x, z): (f32, f32)) -> Option<HexCoord> {
        if x * x + z * z < DEAD_ZONE_SQ {
            return None;
        }
        let mut best: Option<(HexCoord, f32)> = None;
        for dir in DIRECTIONS {
            let (dx, dz) = dir.to_world();
            let dot = x * dx + z * dz;
            match best {
                Some((_, best_dot)) if dot <= best_dot => {}
                _ => best = Some((dir, dot)),
            }
        }
        best.map(|(dir, _)| dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_unique_and_adjacent() {
        let center = HexCoord::new(2, -1);
        let neighbors = center.neighbors();

        for (i, a) in neighbors.iter().enumerate() {
            assert_eq!(center.distance(*a), 1);
            for b in &neighbors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn distance_matches_cube_metric() {
        let origin = HexCoord::ORIGIN;
        assert_eq!(origin.distance(HexCoord::new(2, -1)), 2);
        assert_eq!(origin.distance(HexCoord::new(-3, 3)), 3);
        assert_eq!(origin.distance(HexCoord::new(0, 4)), 4);
        assert_eq!(origin.distance(origin), 0);
    }

    #[test]
    fn direction_resolution_prefers_earlier_direction_on_ties() {
        // +x lands exactly between (1, 0) and (1, -1); enumeration order
        // breaks the tie toward (1, 0).
        let dir = HexCoord::direction_closest_to((1.0, 0.0));
        assert_eq!(dir, Some(HexCoord::new(1, 0)));
    }

    #[test]
    fn direction_resolution_picks_aligned_direction() {
        assert_eq!(
            HexCoord::direction_closest_to((0.0, 1.0)),
            Some(HexCoord::new(0, 1))
        );
        assert_eq!(
            HexCoord::direction_closest_to((0.0, -1.0)),
            Some(HexCoord::new(0, -1))
        );
        assert_eq!(
            HexCoord::direction_closest_to((-1.0, -0.1)),
            Some(HexCoord::new(-1, 0))
        );
    }

    #[test]
    fn direction_resolution_rejects_dead_zone_input() {
        assert_eq!(HexCoord::direction_closest_to((0.1, 0.1)), None);
        assert_eq!(HexCoord::direction_closest_to((0.0, 0.0)), None);
    }
}
