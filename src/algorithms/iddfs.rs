use super::{dfs, SearchContext, SearchState};
use crate::grid::Position;

/// Iterative-deepening DFS over depth limits `1..=max_depth`.
///
/// Each limit restarts from scratch. Returns the first run that reaches the
/// target, or the last one attempted.
pub fn search(
    ctx: &mut SearchContext<'_>,
    start: Position,
    target: Position,
    max_depth: usize,
) -> SearchState {
    let mut state = SearchState::default();
    let mut tried = Vec::new();

    for limit in 1..=max_depth {
        log::debug!("IDDFS trying depth limit {limit}");
        state = dfs::search(ctx, start, target, Some(limit));
        tried.push(limit);
        if state.aborted || state.reached(target) {
            break;
        }
    }

    state.depth_limits_tried = tried;
    state
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_static;
    use super::super::{Algorithm, SearchLimits};
    use crate::grid::{Grid, Position};
    use crate::path::reconstruct;

    #[test]
    fn test_deepens_until_target_found() {
        let grid: Grid = "S..T".parse().unwrap();
        let state = run_static(Algorithm::Iddfs, &grid, SearchLimits::default());
        let path = reconstruct(&state.predecessors, Position::new(0, 0), Position::new(0, 3));

        assert_eq!(state.depth_limits_tried, vec![1, 2, 3]);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_exhausts_all_limits_when_unreachable() {
        let grid: Grid = "S.#T".parse().unwrap();
        let limits = SearchLimits {
            max_depth: 6,
            ..SearchLimits::default()
        };
        let state = run_static(Algorithm::Iddfs, &grid, limits);

        assert_eq!(state.depth_limits_tried, (1..=6).collect::<Vec<_>>());
        assert!(!state.reached(Position::new(0, 3)));
        assert_eq!(state.explored.len(), 2);
    }
}
