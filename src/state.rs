use serde::{Deserialize, Serialize};

/// Interaction mode of a play session. Exactly one is active at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    /// Free 3D movement.
    Exploration,
    /// The holographic prospecting overlay is up.
    Prospecting,
    /// A tile is selected and tile-local actions are offered.
    TileSelection,
    /// The player carries a disarmed explosive charge.
    CarryingExplosive,
    /// Aiming a throw of the carried charge.
    ThrowObject,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::Exploration
    }
}

/// Discrete inputs fed to the mode state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeInput {
    ToggleProspect,
    Confirm,
    Cancel,
    PickUpExplosive,
    EnterThrowAim,
    ConfirmThrow,
}

impl InteractionState {
    /// Whether tile selection is live in this state.
    pub const fn is_selecting(self) -> bool {
        matches!(self, Self::TileSelection | Self::ThrowObject)
    }

    /// The successor state for `input`, or `None` when the input is not legal
    /// here. Callers drop illegal inputs silently; rejection is not an error.
    pub const fn transition(self, input: ModeInput) -> Option<InteractionState> {
        use InteractionState::*;
        use ModeInput::*;

        match (self, input) {
            (Exploration, ToggleProspect) => Some(Prospecting),
            (Prospecting, ToggleProspect) => Some(Exploration),
            (Prospecting, Confirm) => Some(TileSelection),
            (TileSelection, Confirm) => Some(Prospecting),
            (TileSelection, Cancel) => Some(Prospecting),
            (Exploration, PickUpExplosive) => Some(CarryingExplosive),
            // While carrying, the prospect toggle detonates the charge.
            (CarryingExplosive, ToggleProspect) => Some(Exploration),
            (CarryingExplosive, EnterThrowAim) => Some(ThrowObject),
            (ThrowObject, ConfirmThrow) => Some(Exploration),
            _ => None,
        }
    }
}
