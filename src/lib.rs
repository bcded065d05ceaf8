#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use hex::*;
pub use reveal::*;
pub use state::*;
pub use tile::*;

mod engine;
mod error;
mod generator;
mod grid;
mod hex;
pub mod placement;
mod reveal;
mod state;
mod tile;

/// Tuning for a generated prospecting field.
///
/// `cluster_weights` maps mineral cluster sizes to relative sampling weights;
/// they do not need to sum to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub grid_radius: i32,
    pub trap_density: f32,
    pub safe_zone_radius: i32,
    pub mineral_quota: u32,
    pub cluster_weights: Vec<(u8, f32)>,
}

impl FieldConfig {
    pub fn new_unchecked(
        grid_radius: i32,
        trap_density: f32,
        safe_zone_radius: i32,
        mineral_quota: u32,
        cluster_weights: Vec<(u8, f32)>,
    ) -> Self {
        Self {
            grid_radius,
            trap_density,
            safe_zone_radius,
            mineral_quota,
            cluster_weights,
        }
    }

    pub fn new(
        grid_radius: i32,
        trap_density: f32,
        safe_zone_radius: i32,
        mineral_quota: u32,
        cluster_weights: Vec<(u8, f32)>,
    ) -> Result<Self> {
        let config = Self::new_unchecked(
            grid_radius,
            trap_density,
            safe_zone_radius,
            mineral_quota,
            cluster_weights,
        );
        config.validate()?;
        Ok(config)
    }

    /// Rejects out-of-range parameters before anything is generated from them.
    pub fn validate(&self) -> Result<()> {
        if self.grid_radius < 0 {
            return Err(FieldError::InvalidRadius(self.grid_radius));
        }
        if self.safe_zone_radius < 0 {
            return Err(FieldError::InvalidRadius(self.safe_zone_radius));
        }
        if !(0.0..=1.0).contains(&self.trap_density) {
            return Err(FieldError::InvalidDensity(self.trap_density));
        }
        let malformed = self
            .cluster_weights
            .iter()
            .any(|&(size, weight)| size == 0 || weight < 0.0 || !weight.is_finite());
        if malformed {
            return Err(FieldError::InvalidClusterWeights);
        }
        let has_positive = self.cluster_weights.iter().any(|&(_, weight)| weight > 0.0);
        if self.mineral_quota > 0 && !has_positive {
            return Err(FieldError::InvalidClusterWeights);
        }
        Ok(())
    }

    /// Tile count of a full hexagonal grid of `grid_radius`.
    pub const fn total_tiles(&self) -> u32 {
        let r = self.grid_radius as i64;
        (3 * r * r + 3 * r + 1) as u32
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_radius: 5,
            trap_density: 0.15,
            safe_zone_radius: 1,
            mineral_quota: 12,
            cluster_weights: vec![(1, 0.5), (2, 0.35), (3, 0.15)],
        }
    }
}
