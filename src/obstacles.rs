use crate::grid::{Cell, Grid, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.05;

/// Spawns dynamic walls on empty cells while a search is running.
///
/// Searches call [`ObstacleInjector::maybe_inject`] once per expansion step.
#[derive(Clone)]
pub struct ObstacleInjector {
    rng: StdRng,
    probability: f64,
    enabled: bool,
    spawned: usize,
}

impl ObstacleInjector {
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ObstacleInjector {
            rng,
            probability,
            enabled: true,
            spawned: 0,
        }
    }

    /// An injector that never touches the grid.
    pub fn disabled() -> Self {
        ObstacleInjector {
            rng: StdRng::seed_from_u64(0),
            probability: 0.0,
            enabled: false,
            spawned: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Dynamic walls placed since construction or the last [`reset_count`](Self::reset_count).
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn reset_count(&mut self) {
        self.spawned = 0;
    }

    /// With probability `self.probability`, turns one uniformly chosen empty
    /// cell into a dynamic wall. Start, target and walls are never touched.
    pub fn maybe_inject(&mut self, grid: &mut Grid) -> Option<Position> {
        if !self.enabled || self.rng.gen::<f64>() >= self.probability {
            return None;
        }

        let empty = grid.positions_of(Cell::Empty);
        let &pos = empty.choose(&mut self.rng)?;
        grid.set_cell(pos, Cell::DynamicWall).ok()?;
        self.spawned += 1;
        log::trace!("Spawned dynamic wall at {pos}");
        Some(pos)
    }
}

impl Default for ObstacleInjector {
    fn default() -> Self {
        Self::new(DEFAULT_OBSTACLE_PROBABILITY, None)
    }
}
