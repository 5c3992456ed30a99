//! Uninformed search strategies over a [`Grid`].
//!
//! Every search runs on a [`SearchContext`], which owns the per-step
//! protocol: one obstacle-injection draw before each expansion and one
//! observer notification after it.

pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod iddfs;
pub mod ucs;

use crate::error::{Result, SearchError};
use crate::grid::{Grid, Position};
use crate::obstacles::ObstacleInjector;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

/// Parent link per discovered position; the root maps to `None`.
pub type Predecessors = FxHashMap<Position, Option<Position>>;
pub type PositionSet = FxHashSet<Position>;

pub const DEFAULT_DEPTH_LIMIT: usize = 5;
pub const DEFAULT_MAX_DEPTH: usize = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls,
        Algorithm::Iddfs,
        Algorithm::Bidirectional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Dls => "DLS",
            Algorithm::Iddfs => "IDDFS",
            Algorithm::Bidirectional => "Bidirectional",
        }
    }

    /// Runs this strategy from `start` towards `target`.
    pub fn search(
        self,
        ctx: &mut SearchContext<'_>,
        start: Position,
        target: Position,
        limits: SearchLimits,
    ) -> SearchState {
        match self {
            Algorithm::Bfs => bfs::search(ctx, start, target),
            Algorithm::Dfs => dfs::search(ctx, start, target, None),
            Algorithm::Ucs => ucs::search(ctx, start, target),
            Algorithm::Dls => dfs::search(ctx, start, target, Some(limits.depth_limit)),
            Algorithm::Iddfs => iddfs::search(ctx, start, target, limits.max_depth),
            Algorithm::Bidirectional => bidirectional::search(ctx, start, target),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SearchError::UnknownAlgorithm(s.to_string()))
    }
}

/// Depth bounds for the depth-limited strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest level DLS expands from.
    pub depth_limit: usize,
    /// Last depth limit IDDFS tries.
    pub max_depth: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Working result of one search invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub predecessors: Predecessors,
    pub explored: PositionSet,
    /// Positions in the order they were expanded.
    pub expansion_order: Vec<Position>,
    /// Best known path cost per position (UCS only).
    pub costs: FxHashMap<Position, f64>,
    /// Where the two frontiers touched (Bidirectional only).
    pub meeting_point: Option<Position>,
    /// Depth limits attempted, in order (IDDFS only).
    pub depth_limits_tried: Vec<usize>,
    /// Set when the observer asked the search to stop.
    pub aborted: bool,
}

impl SearchState {
    /// Records `pos` as expanded; false if it already was.
    fn explore(&mut self, pos: Position) -> bool {
        if !self.explored.insert(pos) {
            return false;
        }
        self.expansion_order.push(pos);
        true
    }

    pub fn expansions(&self) -> usize {
        self.expansion_order.len()
    }

    pub fn reached(&self, target: Position) -> bool {
        self.predecessors.contains_key(&target)
    }
}

/// What an observer sees after each expansion.
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub frontier: &'a PositionSet,
    pub explored: &'a PositionSet,
}

/// Visualization and cancellation hook.
///
/// `on_step` runs synchronously once per expansion; returning
/// `ControlFlow::Break(())` stops the search after the current step.
pub trait SearchObserver {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()>;

    fn on_complete(&mut self, _grid: &Grid, _path: &[Position]) {}
}

impl<F> SearchObserver for F
where
    F: FnMut(&Snapshot<'_>) -> ControlFlow<()>,
{
    fn on_step(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        self(snapshot)
    }
}

/// Exclusive access to the grid and its collaborators for one run.
pub struct SearchContext<'a> {
    grid: &'a mut Grid,
    injector: &'a mut ObstacleInjector,
    observer: Option<&'a mut dyn SearchObserver>,
}

impl<'a> SearchContext<'a> {
    pub fn new(grid: &'a mut Grid, injector: &'a mut ObstacleInjector) -> Self {
        SearchContext {
            grid,
            injector,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Gives the injector its per-expansion chance to spawn a dynamic wall.
    fn begin_step(&mut self) {
        self.injector.maybe_inject(self.grid);
    }

    fn neighbors(&self, pos: &Position) -> Vec<Position> {
        self.grid.neighbors(pos)
    }

    /// Notifies the observer, if any. The sets are only materialised when observed.
    fn end_step<F, E>(&mut self, frontier: F, explored: E) -> ControlFlow<()>
    where
        F: IntoIterator<Item = Position>,
        E: IntoIterator<Item = Position>,
    {
        let Some(observer) = self.observer.as_deref_mut() else {
            return ControlFlow::Continue(());
        };
        let frontier: PositionSet = frontier.into_iter().collect();
        let explored: PositionSet = explored.into_iter().collect();
        observer.on_step(&Snapshot {
            grid: &*self.grid,
            frontier: &frontier,
            explored: &explored,
        })
    }

    /// Hands the final path to the observer.
    pub fn complete(&mut self, path: &[Position]) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_complete(&*self.grid, path);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm_identifiers() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("bidirectional".parse::<Algorithm>().unwrap(), Algorithm::Bidirectional);
        assert_eq!(" iddfs ".parse::<Algorithm>().unwrap(), Algorithm::Iddfs);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "A*".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, SearchError::UnknownAlgorithm("A*".to_string()));
    }

    #[test]
    fn test_closure_observer_sees_every_step() {
        let mut grid: Grid = "S...\n....\n...T".parse().unwrap();
        let (start, target) = grid.endpoints().unwrap();
        let mut injector = ObstacleInjector::disabled();
        let mut steps = 0;
        let mut observer = |snapshot: &Snapshot<'_>| {
            steps += 1;
            assert!(!snapshot.explored.is_empty());
            ControlFlow::Continue(())
        };

        let state = {
            let mut ctx = SearchContext::new(&mut grid, &mut injector).with_observer(&mut observer);
            Algorithm::Bfs.search(&mut ctx, start, target, SearchLimits::default())
        };

        // No snapshot is taken once the target is dequeued.
        assert_eq!(steps, state.expansions() - 1);
    }

    #[test]
    fn test_observer_can_abort() {
        let mut grid: Grid = "S.........\n..........\n.........T".parse().unwrap();
        let (start, target) = grid.endpoints().unwrap();

        for algorithm in Algorithm::ALL {
            let mut injector = ObstacleInjector::disabled();
            let mut observer = |_: &Snapshot<'_>| ControlFlow::Break(());
            let mut ctx = SearchContext::new(&mut grid, &mut injector).with_observer(&mut observer);
            let state = algorithm.search(&mut ctx, start, target, SearchLimits::default());

            assert!(state.aborted, "{algorithm} ignored the abort");
            assert!(state.expansions() <= 2, "{algorithm} kept expanding");
        }
    }
}
