use crate::algorithms::{SearchLimits, DEFAULT_DEPTH_LIMIT, DEFAULT_MAX_DEPTH};
use crate::obstacles::{ObstacleInjector, DEFAULT_OBSTACLE_PROBABILITY};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 8)]
    pub rows: usize,

    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Share of cells turned into static walls.
    #[arg(long, default_value_t = 0.20)]
    pub obstacle_ratio: f64,

    /// BFS, DFS, UCS, DLS, IDDFS, Bidirectional, or "all" to compare them.
    #[arg(long, default_value = "BFS")]
    pub algorithm: String,

    /// Chance per expansion step of spawning a dynamic wall.
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_PROBABILITY)]
    pub obstacle_prob: f64,

    #[arg(long, default_value_t = false)]
    pub no_dynamic_obstacles: bool,

    #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,

    /// Last depth limit tried by IDDFS.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[arg(long, default_value_t = 200)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Seeds grid generation and obstacle injection.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn compare_all(&self) -> bool {
        self.algorithm.eq_ignore_ascii_case("all")
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            depth_limit: self.depth_limit,
            max_depth: self.max_depth,
        }
    }

    pub fn injector(&self) -> ObstacleInjector {
        if self.no_dynamic_obstacles {
            ObstacleInjector::disabled()
        } else {
            // Offset so the obstacle stream differs from the grid layout stream.
            let seed = self.seed.map(|seed| seed.wrapping_add(1));
            ObstacleInjector::new(self.obstacle_prob, seed)
        }
    }
}
