use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{DIRECTIONS, FieldError, HexCoord, Result, Tile};

/// Radius-bounded hexagonal tile map keyed by axial coordinate.
///
/// Iteration follows key order (q-major, r-minor). Placement passes collect
/// their candidate pools from that order before shuffling, which is what makes
/// a fixed seed reproduce a field bit for bit.
///
/// Serializes as a flat tile list (tiles carry their own coordinate), so grid
/// snapshots stay plain data in any format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "GridRepr", into = "GridRepr")]
pub struct HexGrid {
    tiles: BTreeMap<HexCoord, Tile>,
    radius: i32,
}

#[derive(Clone, Serialize, Deserialize)]
struct GridRepr {
    radius: i32,
    tiles: Vec<Tile>,
}

impl From<HexGrid> for GridRepr {
    fn from(grid: HexGrid) -> Self {
        Self {
            radius: grid.radius,
            tiles: grid.tiles.into_values().collect(),
        }
    }
}

impl From<GridRepr> for HexGrid {
    fn from(repr: GridRepr) -> Self {
        Self {
            tiles: repr.tiles.into_iter().map(|t| (t.coord(), t)).collect(),
            radius: repr.radius,
        }
    }
}

impl HexGrid {
    /// Builds one fresh tile for every axial coordinate within `radius` of
    /// the origin: `3r^2 + 3r + 1` tiles in total.
    pub fn generate(radius: i32) -> Result<HexGrid> {
        if radius < 0 {
            return Err(FieldError::InvalidRadius(radius));
        }
        let mut tiles = BTreeMap::new();
        for q in -radius..=radius {
            let r_min = (-radius).max(-q - radius);
            let r_max = radius.min(-q + radius);
            for r in r_min..=r_max {
                let coord = HexCoord::new(q, r);
                tiles.insert(coord, Tile::new(coord));
            }
        }
        Ok(HexGrid { tiles, radius })
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.keys().copied()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Neighbors of `coord` that exist in the grid, in direction order.
    pub fn neighbors_in_grid(&self, coord: HexCoord) -> SmallVec<[HexCoord; 6]> {
        DIRECTIONS
            .iter()
            .map(|&dir| coord.offset(dir))
            .filter(|neighbor| self.tiles.contains_key(neighbor))
            .collect()
    }
}
