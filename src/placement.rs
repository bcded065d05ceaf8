//! Field population passes: safe-zone carving, trap scattering, danger-value
//! derivation, and clustered mineral placement.
//!
//! Every pass that draws randomness takes the caller's rng, so a seeded
//! generator reproduces the exact same field. Candidate pools are collected in
//! grid order before shuffling for the same reason.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;

use crate::{HexCoord, HexGrid};

/// All in-grid coordinates within `safe_radius` of `center`, in grid order.
/// The zone is the exclusion set for trap and mineral placement and the first
/// area revealed to the player.
pub fn safe_zone(grid: &HexGrid, center: HexCoord, safe_radius: i32) -> Vec<HexCoord> {
    if safe_radius < 0 {
        return Vec::new();
    }
    grid.coords()
        .filter(|coord| coord.distance(center) <= safe_radius as u32)
        .collect()
}

/// Scatters `floor(len * density)` traps uniformly over the tiles outside
/// `excluded`, shuffle-then-take. Returns the trapped coordinates; a pool
/// smaller than the request is filled completely and logged, not an error.
pub fn place_traps<R: Rng>(
    grid: &mut HexGrid,
    excluded: &[HexCoord],
    density: f32,
    rng: &mut R,
) -> Vec<HexCoord> {
    let excluded: HashSet<HexCoord> = excluded.iter().copied().collect();
    let mut pool: Vec<HexCoord> = grid
        .coords()
        .filter(|coord| !excluded.contains(coord))
        .collect();

    let requested = (grid.len() as f32 * density) as usize;
    let count = requested.min(pool.len());
    if count < requested {
        log::warn!("trap pool exhausted, placing {count} of {requested} requested traps");
    }

    pool.shuffle(rng);
    pool.truncate(count);
    for &coord in &pool {
        if let Some(tile) = grid.tile_mut(coord) {
            tile.arm_trap();
        }
    }
    pool
}

/// Derives every non-trap tile's danger value: the count of its in-grid
/// neighbors that are traps. Must run after trap placement is finalized;
/// rerunning is idempotent while trap state is unchanged.
pub fn calculate_danger_values(grid: &mut HexGrid) {
    let traps: HashSet<HexCoord> = grid
        .tiles()
        .filter(|tile| tile.is_trap())
        .map(|tile| tile.coord())
        .collect();

    let coords: Vec<HexCoord> = grid.coords().collect();
    for coord in coords {
        let danger = grid
            .neighbors_in_grid(coord)
            .iter()
            .filter(|neighbor| traps.contains(*neighbor))
            .count() as u8;
        if let Some(tile) = grid.tile_mut(coord) {
            if !tile.is_trap() {
                tile.set_danger(danger);
            }
        }
    }
}

/// Grows mineral clusters over the tiles outside `excluded` (the safe zone
/// and the trap set) until `quota` tiles are mineral-bearing or the pool runs
/// dry. Cluster sizes are sampled from `weights` by cumulative-weight
/// selection, clamped to the remaining quota. Returns the number of minerals
/// placed; falling short of the quota is a degraded outcome, not an error.
pub fn place_minerals<R: Rng>(
    grid: &mut HexGrid,
    excluded: &[HexCoord],
    quota: u32,
    weights: &[(u8, f32)],
    rng: &mut R,
) -> u32 {
    let excluded: HashSet<HexCoord> = excluded.iter().copied().collect();
    let mut available: BTreeSet<HexCoord> = grid
        .coords()
        .filter(|coord| !excluded.contains(coord))
        .collect();
    let mut placed = 0u32;

    'quota: while placed < quota && !available.is_empty() {
        let remaining = (quota - placed) as usize;
        let sampled = sample_cluster_size(weights, rng).min(remaining);

        let mut starts: Vec<HexCoord> = available.iter().copied().collect();
        starts.shuffle(rng);

        // Try the sampled size from every start; a cramped pool falls back to
        // smaller clusters before the pass gives up.
        let mut target = sampled;
        loop {
            let cluster = starts
                .iter()
                .find_map(|&start| grow_cluster(&available, target, start, rng));
            if let Some(cluster) = cluster {
                for &coord in &cluster {
                    if let Some(tile) = grid.tile_mut(coord) {
                        tile.place_mineral();
                    }
                    available.remove(&coord);
                }
                placed += cluster.len() as u32;
                continue 'quota;
            }
            if target <= 1 {
                break 'quota;
            }
            target -= 1;
        }
    }

    if placed < quota {
        log::warn!("mineral pool exhausted, placed {placed} of {quota} requested minerals");
    }
    placed
}

/// Cumulative-weight selection over the cluster size table: normalize, draw a
/// uniform value, pick the first size whose cumulative weight covers it.
fn sample_cluster_size<R: Rng>(weights: &[(u8, f32)], rng: &mut R) -> usize {
    let total: f32 = weights.iter().map(|&(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return 1;
    }
    let draw = rng.random::<f32>() * total;
    let mut cumulative = 0.0;
    for &(size, weight) in weights {
        cumulative += weight.max(0.0);
        if cumulative >= draw {
            return size.max(1) as usize;
        }
    }
    weights.last().map_or(1, |&(size, _)| size.max(1) as usize)
}

/// Randomized depth-first growth of a connected cluster of exactly `target`
/// tiles out of `available`, starting at `start`. Backtracks through other
/// frontier orders before reporting failure.
fn grow_cluster<R: Rng>(
    available: &BTreeSet<HexCoord>,
    target: usize,
    start: HexCoord,
    rng: &mut R,
) -> Option<Vec<HexCoord>> {
    let mut cluster = Vec::with_capacity(target);
    let mut members = HashSet::new();
    cluster.push(start);
    members.insert(start);

    if extend_cluster(available, target, &mut cluster, &mut members, rng) {
        Some(cluster)
    } else {
        None
    }
}

fn extend_cluster<R: Rng>(
    available: &BTreeSet<HexCoord>,
    target: usize,
    cluster: &mut Vec<HexCoord>,
    members: &mut HashSet<HexCoord>,
    rng: &mut R,
) -> bool {
    if cluster.len() == target {
        return true;
    }

    let mut frontier: Vec<HexCoord> = Vec::new();
    for &member in cluster.iter() {
        for neighbor in member.neighbors() {
            if available.contains(&neighbor)
                && !members.contains(&neighbor)
                && !frontier.contains(&neighbor)
            {
                frontier.push(neighbor);
            }
        }
    }
    frontier.shuffle(rng);

    for candidate in frontier {
        cluster.push(candidate);
        members.insert(candidate);
        if extend_cluster(available, target, cluster, members, rng) {
            return true;
        }
        cluster.pop();
        members.remove(&candidate);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn seeded() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn safe_zone_collects_tiles_within_radius() {
        let grid = HexGrid::generate(3).unwrap();
        let zone = safe_zone(&grid, HexCoord::ORIGIN, 1);
        assert_eq!(zone.len(), 7);
        for coord in zone {
            assert!(coord.distance(HexCoord::ORIGIN) <= 1);
        }
    }

    #[test]
    fn traps_never_land_in_the_excluded_zone() {
        let mut grid = HexGrid::generate(3).unwrap();
        let zone = safe_zone(&grid, HexCoord::ORIGIN, 1);
        // Full density traps every tile the exclusion leaves open.
        let placed = place_traps(&mut grid, &zone, 1.0, &mut seeded());

        assert_eq!(placed.len(), grid.len() - zone.len());
        for coord in grid.coords() {
            let is_safe = coord.distance(HexCoord::ORIGIN) <= 1;
            assert_eq!(grid.tile(coord).unwrap().is_trap(), !is_safe);
        }
    }

    #[test]
    fn trap_count_is_floor_of_density_times_grid_size() {
        let mut grid = HexGrid::generate(2).unwrap();
        // 19 tiles * 0.15 = 2.85, floor 2.
        let placed = place_traps(&mut grid, &[], 0.15, &mut seeded());
        assert_eq!(placed.len(), 2);
    }

    #[test]
    fn danger_is_zero_iff_no_neighbor_is_a_trap() {
        let mut grid = HexGrid::generate(2).unwrap();
        grid.tile_mut(HexCoord::new(1, 0)).unwrap().arm_trap();
        grid.tile_mut(HexCoord::new(0, 1)).unwrap().arm_trap();
        calculate_danger_values(&mut grid);

        for tile in grid.tiles() {
            if tile.is_trap() {
                continue;
            }
            let adjacent_traps = tile
                .coord()
                .neighbors()
                .iter()
                .filter(|n| grid.tile(**n).is_some_and(|t| t.is_trap()))
                .count();
            assert_eq!(tile.danger() as usize, adjacent_traps);
            assert_eq!(tile.danger() == 0, adjacent_traps == 0);
        }
        // (1, 1) and (0, 0) touch both traps.
        assert_eq!(grid.tile(HexCoord::new(1, 1)).unwrap().danger(), 2);
        assert_eq!(grid.tile(HexCoord::ORIGIN).unwrap().danger(), 2);
    }

    #[test]
    fn danger_derivation_is_idempotent() {
        let mut grid = HexGrid::generate(2).unwrap();
        place_traps(&mut grid, &[], 0.2, &mut seeded());
        calculate_danger_values(&mut grid);
        let snapshot = grid.clone();
        calculate_danger_values(&mut grid);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn minerals_avoid_excluded_tiles_and_meet_the_quota() {
        let mut grid = HexGrid::generate(3).unwrap();
        let zone = safe_zone(&grid, HexCoord::ORIGIN, 1);
        let mut rng = seeded();
        let traps = place_traps(&mut grid, &zone, 0.2, &mut rng);
        calculate_danger_values(&mut grid);

        let mut excluded = zone.clone();
        excluded.extend_from_slice(&traps);
        let placed = place_minerals(&mut grid, &excluded, 6, &[(2, 1.0)], &mut rng);

        assert_eq!(placed, 6);
        let mut minerals = 0;
        for tile in grid.tiles() {
            if tile.has_mineral() {
                minerals += 1;
                assert!(!tile.is_trap());
                assert!(tile.coord().distance(HexCoord::ORIGIN) > 1);
            }
        }
        assert_eq!(minerals, 6);
    }

    #[test]
    fn fixed_size_clusters_stay_connected() {
        let mut grid = HexGrid::generate(3).unwrap();
        let placed = place_minerals(&mut grid, &[], 3, &[(3, 1.0)], &mut seeded());
        assert_eq!(placed, 3);

        let minerals: Vec<HexCoord> = grid
            .tiles()
            .filter(|tile| tile.has_mineral())
            .map(|tile| tile.coord())
            .collect();
        assert_eq!(minerals.len(), 3);
        for &coord in &minerals {
            let linked = coord
                .neighbors()
                .iter()
                .any(|neighbor| minerals.contains(neighbor));
            assert!(linked, "cluster tile {coord:?} has no mineral neighbor");
        }
    }

    #[test]
    fn exhausted_pool_under_fulfills_the_quota() {
        let mut grid = HexGrid::generate(1).unwrap();
        let placed = place_minerals(&mut grid, &[], 50, &[(2, 1.0)], &mut seeded());
        assert_eq!(placed, 7);
        assert!(grid.tiles().all(|tile| tile.has_mineral()));
    }

    #[test]
    fn cluster_size_sampling_follows_cumulative_weights() {
        let mut rng = seeded();
        let weights = vec![(2, 1.0), (5, 0.0)];
        for _ in 0..32 {
            assert_eq!(sample_cluster_size(&weights, &mut rng), 2);
        }
        assert_eq!(sample_cluster_size(&[], &mut rng), 1);
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let build = || {
            let mut grid = HexGrid::generate(4).unwrap();
            let zone = safe_zone(&grid, HexCoord::ORIGIN, 1);
            let mut rng = SmallRng::seed_from_u64(99);
            let traps = place_traps(&mut grid, &zone, 0.2, &mut rng);
            calculate_danger_values(&mut grid);
            let mut excluded = zone;
            excluded.extend_from_slice(&traps);
            place_minerals(&mut grid, &excluded, 8, &[(1, 0.5), (2, 0.5)], &mut rng);
            grid
        };
        assert_eq!(build(), build());
    }
}
