use rand::prelude::*;

use super::FieldGenerator;
use crate::{FieldConfig, HexCoord, HexGrid, Result, placement};

/// Seeded generation strategy: carve the safe zone around the origin, scatter
/// traps outside it, derive danger values, then grow mineral clusters in the
/// space left over. The same seed and config reproduce the field bit for bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: &FieldConfig) -> Result<HexGrid> {
        config.validate()?;
        let mut grid = HexGrid::generate(config.grid_radius)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let zone = placement::safe_zone(&grid, HexCoord::ORIGIN, config.safe_zone_radius);
        let traps = placement::place_traps(&mut grid, &zone, config.trap_density, &mut rng);
        placement::calculate_danger_values(&mut grid);

        let mut excluded = zone;
        excluded.extend_from_slice(&traps);
        let minerals = placement::place_minerals(
            &mut grid,
            &excluded,
            config.mineral_quota,
            &config.cluster_weights,
            &mut rng,
        );

        log::debug!(
            "generated field: {} tiles, {} traps, {} minerals (seed {})",
            grid.len(),
            traps.len(),
            minerals,
            self.seed
        );
        Ok(grid)
    }
}
