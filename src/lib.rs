pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod obstacles;
pub mod path;
pub mod render;
pub mod runner;
pub mod statistics;

pub use algorithms::{Algorithm, SearchLimits, SearchObserver, SearchState, Snapshot};
pub use error::{Result, SearchError};
pub use grid::{Cell, Grid, Position};
pub use obstacles::ObstacleInjector;
pub use runner::{RunResult, SearchRunner};
