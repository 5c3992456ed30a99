use super::{SearchContext, SearchState};
use crate::grid::Position;
use std::collections::hash_map::Entry;
use std::collections::VecDeque;

/// Breadth-first search in level order.
///
/// A predecessor is recorded on first discovery and never overwritten, so a
/// successful run yields a path with the fewest steps.
pub fn search(ctx: &mut SearchContext<'_>, start: Position, target: Position) -> SearchState {
    let mut state = SearchState::default();
    let mut queue = VecDeque::from([start]);
    state.predecessors.insert(start, None);

    while !queue.is_empty() {
        ctx.begin_step();
        let Some(current) = queue.pop_front() else {
            break;
        };
        state.explore(current);

        if current == target {
            return state;
        }

        for next in ctx.neighbors(&current) {
            if let Entry::Vacant(entry) = state.predecessors.entry(next) {
                entry.insert(Some(current));
                queue.push_back(next);
            }
        }

        let explored = state.explored.iter().copied();
        if ctx.end_step(queue.iter().copied(), explored).is_break() {
            state.aborted = true;
            break;
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run_static;
    use super::super::{Algorithm, SearchLimits};
    use crate::grid::{Grid, Position};
    use crate::path::reconstruct;

    #[test]
    fn test_open_three_by_three_goes_diagonal() {
        let grid: Grid = "S..\n...\n..T".parse().unwrap();
        let state = run_static(Algorithm::Bfs, &grid, SearchLimits::default());
        let path = reconstruct(&state.predecessors, Position::new(0, 0), Position::new(2, 2));

        assert!(state.explored.len() <= 9);
        assert_eq!(
            path,
            vec![Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn test_routes_around_wall() {
        let grid: Grid = "S#.\n.#.\n..T".parse().unwrap();
        let state = run_static(Algorithm::Bfs, &grid, SearchLimits::default());
        let path = reconstruct(&state.predecessors, Position::new(0, 0), Position::new(2, 2));

        assert_eq!(
            path,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_unreachable_target_explores_component() {
        let grid: Grid = "S.#..\n..#.T\n..#..".parse().unwrap();
        let state = run_static(Algorithm::Bfs, &grid, SearchLimits::default());

        assert!(!state.reached(Position::new(1, 4)));
        assert_eq!(state.explored.len(), 6);
    }
}
