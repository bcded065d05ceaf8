use alloc::collections::VecDeque;
use hashbrown::HashSet;

use crate::{HexCoord, HexGrid};

/// Outcome of revealing a tile. `Trap` is the end-of-episode signal the host
/// reacts to; the engine itself keeps accepting commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    Trap,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Safe | Self::Trap => true,
        }
    }
}

/// Reveals a single tile. No-op on missing, flagged, or already-revealed
/// tiles. Revealing a zero-danger tile cascades through the connected
/// zero-danger region; revealing a trap never cascades.
pub fn reveal_tile(grid: &mut HexGrid, coord: HexCoord) -> RevealOutcome {
    use RevealOutcome::*;

    let Some(tile) = grid.tile_mut(coord) else {
        return NoChange;
    };
    if !tile.reveal() {
        return NoChange;
    }
    if tile.is_trap() {
        log::debug!("trap triggered at {coord:?}");
        return Trap;
    }
    let danger = tile.danger();
    if danger == 0 {
        cascade(grid, coord);
    }
    Safe
}

/// Breadth-first flood fill from a revealed zero-danger tile. Neighbors are
/// revealed as they are visited; only zero-danger tiles propagate further.
/// Flagged tiles act as barriers and stay hidden.
pub fn cascade(grid: &mut HexGrid, start: HexCoord) {
    let mut visited: HashSet<HexCoord> = HashSet::new();
    visited.insert(start);
    let mut frontier: VecDeque<HexCoord> = VecDeque::new();
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        for neighbor in grid.neighbors_in_grid(current) {
            if visited.contains(&neighbor) {
                continue;
            }
            let Some(tile) = grid.tile_mut(neighbor) else {
                continue;
            };
            if !tile.reveal() {
                continue;
            }
            visited.insert(neighbor);
            log::trace!("cascade revealed {neighbor:?}");
            if tile.danger() == 0 {
                frontier.push_back(neighbor);
            }
        }
    }
}
