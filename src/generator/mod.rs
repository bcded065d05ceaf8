use crate::{FieldConfig, HexGrid, Result};

pub use random::*;

mod random;

/// Builds a fully-populated prospecting field from a config: grid, traps,
/// danger values, and mineral clusters.
pub trait FieldGenerator {
    fn generate(self, config: &FieldConfig) -> Result<HexGrid>;
}
