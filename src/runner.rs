use crate::algorithms::{Algorithm, PositionSet, SearchContext, SearchLimits, SearchObserver};
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::obstacles::ObstacleInjector;
use crate::path;
use std::fmt;
use std::time::{Duration, Instant};

/// Outcome of one search run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub algorithm: Algorithm,
    /// Start to target inclusive; empty when no route was found.
    pub path: Vec<Position>,
    pub explored: PositionSet,
    pub explored_count: usize,
    pub path_cost_steps: usize,
    /// Orthogonal steps cost 1, diagonal steps cost √2.
    pub path_cost: f64,
    pub expansions: usize,
    pub dynamic_walls_spawned: usize,
    pub elapsed: Duration,
    pub aborted: bool,
}

impl RunResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm : {}", self.algorithm)?;
        writeln!(f, "Explored  : {} nodes", self.explored_count)?;
        writeln!(f, "Path len  : {} steps", self.path_cost_steps)?;
        writeln!(f, "Path cost : {:.3}", self.path_cost)?;
        writeln!(f, "Path      : {}", format_path(&self.path))?;
        writeln!(f, "Dyn walls : {}", self.dynamic_walls_spawned)?;
        if self.aborted {
            writeln!(f, "Aborted by observer")?;
        }
        Ok(())
    }
}

/// Orchestrates single search runs over a grid.
pub struct SearchRunner {
    injector: ObstacleInjector,
    limits: SearchLimits,
}

impl SearchRunner {
    pub fn new(injector: ObstacleInjector) -> Self {
        SearchRunner {
            injector,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn run(&mut self, grid: &mut Grid, algorithm: Algorithm) -> Result<RunResult> {
        self.execute(grid, algorithm, None)
    }

    /// Like [`run`](Self::run), reporting each step and the final path to `observer`.
    pub fn run_observed(
        &mut self,
        grid: &mut Grid,
        algorithm: Algorithm,
        observer: &mut dyn SearchObserver,
    ) -> Result<RunResult> {
        self.execute(grid, algorithm, Some(observer))
    }

    fn execute(
        &mut self,
        grid: &mut Grid,
        algorithm: Algorithm,
        observer: Option<&mut dyn SearchObserver>,
    ) -> Result<RunResult> {
        let cleared = grid.clear_dynamic();
        if cleared > 0 {
            log::debug!("Cleared {cleared} dynamic walls from the previous run");
        }
        let (start, target) = grid.endpoints()?;
        self.injector.reset_count();

        let started = Instant::now();
        let mut ctx = SearchContext::new(grid, &mut self.injector);
        if let Some(observer) = observer {
            ctx = ctx.with_observer(observer);
        }
        let state = algorithm.search(&mut ctx, start, target, self.limits);
        let elapsed = started.elapsed();

        // An aborted search never reports a route, even if it had discovered one.
        let path = if state.aborted {
            Vec::new()
        } else {
            path::reconstruct(&state.predecessors, start, target)
        };
        ctx.complete(&path);

        let result = RunResult {
            algorithm,
            path_cost_steps: path::steps(&path),
            path_cost: path::cost(&path),
            explored_count: state.explored.len(),
            expansions: state.expansions(),
            explored: state.explored,
            path,
            dynamic_walls_spawned: self.injector.spawned(),
            elapsed,
            aborted: state.aborted,
        };
        report(&result);
        Ok(result)
    }
}

fn report(result: &RunResult) {
    if result.found() {
        log::info!(
            "{} done | Nodes explored: {} | Path length: {} steps | Path: {}",
            result.algorithm,
            result.explored_count,
            result.path_cost_steps,
            format_path(&result.path)
        );
    } else {
        log::info!(
            "{}: no path found | Nodes explored: {}",
            result.algorithm,
            result.explored_count
        );
    }
}

/// Renders a route as `[(r, c), (r, c), ...]`.
pub fn format_path(path: &[Position]) -> String {
    let cells: Vec<String> = path.iter().map(Position::to_string).collect();
    format!("[{}]", cells.join(", "))
}

/// Runs every algorithm on its own copy of `grid`, each with a clone of
/// `injector` so all of them face the same obstacle stream.
pub fn compare_all(
    grid: &Grid,
    injector: &ObstacleInjector,
    limits: SearchLimits,
) -> Result<Vec<RunResult>> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut grid = grid.clone();
            SearchRunner::new(injector.clone())
                .with_limits(limits)
                .run(&mut grid, algorithm)
        })
        .collect()
}
