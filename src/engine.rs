use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a defuse attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DefuseOutcome {
    NoChange,
    Defused,
}

impl DefuseOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Defused)
    }
}

/// Outcome of a mineral extraction attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExtractOutcome {
    NoChange,
    Extracted,
}

impl ExtractOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Extracted)
    }
}

/// Outcome of a selection command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    NoChange,
    Changed,
}

impl SelectionOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a mode-transition request. Rejected requests leave the state
/// untouched and emit nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModeOutcome {
    NoChange,
    Switched(InteractionState),
}

impl ModeOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Switched(_))
    }
}

/// Notifications accumulated by the engine, in order, and drained by the host
/// once per frame via [`ProspectingEngine::take_events`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    StateChanged(InteractionState),
    SelectedTileChanged(HexCoord),
    MineralQuotaUpdated { collected: u32, total: u32 },
    TrapTriggered(HexCoord),
    ExplosiveDetonated,
    ExplosiveThrown { target: HexCoord },
}

/// Owns a generated field and the interaction state machine around it.
///
/// All mutation goes through the command methods below; collaborators
/// (camera rig, movement, UI) observe the engine by draining its event queue
/// rather than subscribing to global delegates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProspectingEngine {
    config: FieldConfig,
    grid: HexGrid,
    state: InteractionState,
    selected: Option<HexCoord>,
    minerals_collected: u32,
    mineral_total: u32,
    events: Vec<EngineEvent>,
}

impl ProspectingEngine {
    /// Generates a field from `config` and reveals the starting area around
    /// the origin (the safe zone opens through the cascade).
    pub fn new<G: FieldGenerator>(config: FieldConfig, generator: G) -> Result<Self> {
        let mut grid = generator.generate(&config)?;
        let mineral_total = grid.tiles().filter(|tile| tile.has_mineral()).count() as u32;
        let _ = reveal_tile(&mut grid, HexCoord::ORIGIN);
        Ok(Self {
            config,
            grid,
            state: InteractionState::default(),
            selected: None,
            minerals_collected: 0,
            mineral_total,
            events: Vec::new(),
        })
    }

    pub fn from_seed(config: FieldConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomFieldGenerator::new(seed))
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.grid.tile(coord)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.tiles()
    }

    pub fn appearance(&self, coord: HexCoord) -> Option<TileAppearance> {
        self.grid.tile(coord).map(Tile::appearance)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected_tile(&self) -> Option<HexCoord> {
        self.selected
    }

    pub fn minerals_collected(&self) -> u32 {
        self.minerals_collected
    }

    pub fn mineral_total(&self) -> u32 {
        self.mineral_total
    }

    /// Events accumulated since the last drain, oldest first.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    /// Reveals a tile, cascading through zero-danger regions. A `Trap`
    /// outcome is also queued as an event for collaborators.
    pub fn reveal(&mut self, coord: HexCoord) -> RevealOutcome {
        let outcome = reveal_tile(&mut self.grid, coord);
        if outcome == RevealOutcome::Trap {
            self.events.push(EngineEvent::TrapTriggered(coord));
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coord: HexCoord) -> FlagOutcome {
        let Some(tile) = self.grid.tile_mut(coord) else {
            return FlagOutcome::NoChange;
        };
        if tile.toggle_flag() {
            FlagOutcome::Changed
        } else {
            FlagOutcome::NoChange
        }
    }

    /// Disarms a trap in place. Neighboring danger values are not refreshed:
    /// a defused trap keeps contributing to the displayed numbers.
    pub fn defuse_trap(&mut self, coord: HexCoord) -> DefuseOutcome {
        let Some(tile) = self.grid.tile_mut(coord) else {
            return DefuseOutcome::NoChange;
        };
        if tile.defuse() {
            log::debug!("trap defused at {coord:?}");
            DefuseOutcome::Defused
        } else {
            log::debug!("defuse request ignored at {coord:?}");
            DefuseOutcome::NoChange
        }
    }

    pub fn extract_mineral(&mut self, coord: HexCoord) -> ExtractOutcome {
        let Some(tile) = self.grid.tile_mut(coord) else {
            return ExtractOutcome::NoChange;
        };
        if !tile.extract_mineral() {
            return ExtractOutcome::NoChange;
        }
        self.minerals_collected += 1;
        self.events.push(EngineEvent::MineralQuotaUpdated {
            collected: self.minerals_collected,
            total: self.mineral_total,
        });
        ExtractOutcome::Extracted
    }

    /// Moves the selection cursor to `coord`. Only live while a selection
    /// state is active and the coordinate exists in the grid.
    pub fn set_selected_tile(&mut self, coord: HexCoord) -> SelectionOutcome {
        if !self.state.is_selecting() || !self.grid.contains(coord) {
            return SelectionOutcome::NoChange;
        }
        if self.selected == Some(coord) {
            return SelectionOutcome::NoChange;
        }
        self.selected = Some(coord);
        self.events.push(EngineEvent::SelectedTileChanged(coord));
        SelectionOutcome::Changed
    }

    /// Resolves a camera-relative world vector to a hex direction and moves
    /// the selection to that neighbor, if the grid has one there.
    pub fn navigate_selection(&mut self, world_dir: (f32, f32)) -> SelectionOutcome {
        if !self.state.is_selecting() {
            return SelectionOutcome::NoChange;
        }
        let Some(origin) = self.selected else {
            return SelectionOutcome::NoChange;
        };
        let Some(dir) = HexCoord::direction_closest_to(world_dir) else {
            return SelectionOutcome::NoChange;
        };
        self.set_selected_tile(origin.offset(dir))
    }

    /// Toggles between exploration and the prospecting overlay. While
    /// carrying an explosive the same input detonates the charge instead.
    pub fn toggle_prospect(&mut self) -> ModeOutcome {
        let detonating = self.state == InteractionState::CarryingExplosive;
        let outcome = self.apply_input(ModeInput::ToggleProspect);
        if detonating && outcome.has_update() {
            self.events.push(EngineEvent::ExplosiveDetonated);
        }
        outcome
    }

    /// Confirms the targeted tile from prospecting mode, entering tile
    /// selection with the cursor on `target`.
    pub fn begin_tile_selection(&mut self, target: HexCoord) -> ModeOutcome {
        if self.state != InteractionState::Prospecting || !self.grid.contains(target) {
            return ModeOutcome::NoChange;
        }
        let outcome = self.apply_input(ModeInput::Confirm);
        if outcome.has_update() {
            self.set_selected_tile(target);
        }
        outcome
    }

    pub fn confirm_selection(&mut self) -> ModeOutcome {
        if self.state != InteractionState::TileSelection {
            return ModeOutcome::NoChange;
        }
        self.apply_input(ModeInput::Confirm)
    }

    pub fn cancel_selection(&mut self) -> ModeOutcome {
        if self.state != InteractionState::TileSelection {
            return ModeOutcome::NoChange;
        }
        self.apply_input(ModeInput::Cancel)
    }

    /// Picks up a previously defused charge from `coord`, removing it from
    /// the tile and entering the carrying state.
    pub fn pick_up_explosive(&mut self, coord: HexCoord) -> ModeOutcome {
        if self.state != InteractionState::Exploration {
            return ModeOutcome::NoChange;
        }
        let Some(tile) = self.grid.tile_mut(coord) else {
            return ModeOutcome::NoChange;
        };
        if !tile.take_disarmed_trap() {
            return ModeOutcome::NoChange;
        }
        self.apply_input(ModeInput::PickUpExplosive)
    }

    /// Starts aiming a throw of the carried charge, with the cursor on
    /// `target`.
    pub fn enter_throw_aim(&mut self, target: HexCoord) -> ModeOutcome {
        if self.state != InteractionState::CarryingExplosive || !self.grid.contains(target) {
            return ModeOutcome::NoChange;
        }
        let outcome = self.apply_input(ModeInput::EnterThrowAim);
        if outcome.has_update() {
            self.set_selected_tile(target);
        }
        outcome
    }

    /// Releases the throw at the aimed tile. The host resolves the projectile
    /// from the queued event; the engine returns to exploration immediately.
    pub fn confirm_throw(&mut self) -> ModeOutcome {
        if self.state != InteractionState::ThrowObject {
            return ModeOutcome::NoChange;
        }
        let target = self.selected;
        let outcome = self.apply_input(ModeInput::ConfirmThrow);
        if outcome.has_update() {
            if let Some(target) = target {
                self.events.push(EngineEvent::ExplosiveThrown { target });
            }
        }
        outcome
    }

    fn apply_input(&mut self, input: ModeInput) -> ModeOutcome {
        match self.state.transition(input) {
            Some(next) => {
                self.switch_to(next);
                ModeOutcome::Switched(next)
            }
            None => ModeOutcome::NoChange,
        }
    }

    fn switch_to(&mut self, next: InteractionState) {
        let leaving_selection = self.state.is_selecting();
        self.state = next;
        if leaving_selection && !next.is_selecting() {
            self.selected = None;
        }
        log::debug!("interaction state changed to {next:?}");
        self.events.push(EngineEvent::StateChanged(next));
    }
}
