use serde::{Deserialize, Serialize};

use crate::HexCoord;

/// Per-cell state of a prospecting field.
///
/// The coordinate is fixed at creation and a revealed tile never becomes
/// hidden again. Everything else changes only through the documented
/// operations on the owning grid/engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coord: HexCoord,
    is_trap: bool,
    is_flagged: bool,
    is_revealed: bool,
    danger: u8,
    has_mineral: bool,
    has_disarmed_trap: bool,
}

impl Tile {
    pub const fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            is_trap: false,
            is_flagged: false,
            is_revealed: false,
            danger: 0,
            has_mineral: false,
            has_disarmed_trap: false,
        }
    }

    pub const fn coord(&self) -> HexCoord {
        self.coord
    }

    pub const fn is_trap(&self) -> bool {
        self.is_trap
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Count of adjacent traps, valid once trap placement has been finalized
    /// and danger values derived. Defusing a neighbor does not refresh it.
    pub const fn danger(&self) -> u8 {
        self.danger
    }

    pub const fn has_mineral(&self) -> bool {
        self.has_mineral
    }

    pub const fn has_disarmed_trap(&self) -> bool {
        self.has_disarmed_trap
    }

    pub(crate) fn arm_trap(&mut self) {
        self.is_trap = true;
    }

    pub(crate) fn set_danger(&mut self, danger: u8) {
        self.danger = danger;
    }

    /// Marks the tile mineral-bearing. A mineral displaces any trap here.
    pub(crate) fn place_mineral(&mut self) {
        self.has_mineral = true;
        self.is_trap = false;
    }

    /// Reveals the tile unless it is flagged or already revealed. Returns
    /// whether the tile changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.is_revealed || self.is_flagged {
            return false;
        }
        self.is_revealed = true;
        true
    }

    /// Flips the flag marker; revealed tiles cannot be flagged.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        if self.is_revealed {
            return false;
        }
        self.is_flagged = !self.is_flagged;
        true
    }

    /// Disarms a live trap, leaving the charge on the tile for pickup.
    pub(crate) fn defuse(&mut self) -> bool {
        if !self.is_trap {
            return false;
        }
        self.is_trap = false;
        self.has_disarmed_trap = true;
        true
    }

    pub(crate) fn extract_mineral(&mut self) -> bool {
        if !self.has_mineral {
            return false;
        }
        self.has_mineral = false;
        true
    }

    pub(crate) fn take_disarmed_trap(&mut self) -> bool {
        if !self.has_disarmed_trap {
            return false;
        }
        self.has_disarmed_trap = false;
        true
    }

    /// Visual identifier for the tile in its current state. The host maps
    /// these, together with the danger value, onto its own palette.
    pub const fn appearance(&self) -> TileAppearance {
        if !self.is_revealed {
            if self.is_flagged {
                return TileAppearance::Flagged;
            }
            return TileAppearance::Covered;
        }
        if self.is_trap {
            TileAppearance::Blasted
        } else if self.has_disarmed_trap {
            TileAppearance::Defused
        } else if self.danger == 0 {
            TileAppearance::Clear
        } else {
            TileAppearance::Danger(self.danger)
        }
    }
}

/// What a tile should look like, independent of any rendering backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAppearance {
    Covered,
    Flagged,
    Blasted,
    Defused,
    Clear,
    Danger(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_blocked_by_flag_and_is_monotonic() {
        let mut tile = Tile::new(HexCoord::ORIGIN);

        assert!(tile.toggle_flag());
        assert!(!tile.reveal());
        assert!(!tile.is_revealed());

        assert!(tile.toggle_flag());
        assert!(tile.reveal());
        assert!(tile.is_revealed());
        assert!(!tile.reveal());
        assert!(tile.is_revealed());
    }

    #[test]
    fn revealed_tile_cannot_be_flagged() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.reveal();

        assert!(!tile.toggle_flag());
        assert!(!tile.is_flagged());
    }

    #[test]
    fn mineral_displaces_trap() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.arm_trap();
        tile.place_mineral();

        assert!(tile.has_mineral());
        assert!(!tile.is_trap());
    }

    #[test]
    fn defuse_leaves_a_disarmed_charge() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.arm_trap();

        assert!(tile.defuse());
        assert!(!tile.is_trap());
        assert!(tile.has_disarmed_trap());

        assert!(!tile.defuse());
        assert!(tile.take_disarmed_trap());
        assert!(!tile.has_disarmed_trap());
    }

    #[test]
    fn appearance_tracks_tile_state() {
        use TileAppearance::*;

        let mut tile = Tile::new(HexCoord::ORIGIN);
        assert_eq!(tile.appearance(), Covered);

        tile.toggle_flag();
        assert_eq!(tile.appearance(), Flagged);
        tile.toggle_flag();

        tile.set_danger(3);
        tile.reveal();
        assert_eq!(tile.appearance(), Danger(3));

        tile.set_danger(0);
        assert_eq!(tile.appearance(), Clear);

        tile.arm_trap();
        assert_eq!(tile.appearance(), Blasted);
        tile.defuse();
        assert_eq!(tile.appearance(), Defused);
    }

    #[test]
    fn tile_round_trips_as_plain_data() {
        let mut tile = Tile::new(HexCoord::new(2, -1));
        tile.arm_trap();
        tile.set_danger(0);
        tile.toggle_flag();

        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }
}
