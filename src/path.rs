use crate::algorithms::Predecessors;
use crate::grid::{step_cost, Position};

/// Walks predecessor links back from `target` and returns the route from `start`.
///
/// Returns an empty path when `target` was never reached. The walk stops at a
/// root link, at `start`, or once it has taken more steps than there are links,
/// and the returned path always begins with `start`.
pub fn reconstruct(predecessors: &Predecessors, start: Position, target: Position) -> Vec<Position> {
    if !predecessors.contains_key(&target) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(pos) = current {
        if pos == start || path.len() > predecessors.len() {
            break;
        }
        path.push(pos);
        current = predecessors.get(&pos).copied().flatten();
    }
    path.push(start);
    path.reverse();
    path
}

/// Number of moves along a path; zero for empty and single-cell paths.
pub fn steps(path: &[Position]) -> usize {
    path.len().saturating_sub(1)
}

/// Sum of orthogonal and diagonal step costs along a path.
pub fn cost(path: &[Position]) -> f64 {
    path.windows(2).map(|pair| step_cost(pair[0], pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DIAGONAL_STEP_COST;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_missing_target_gives_empty_path() {
        let mut predecessors = Predecessors::default();
        predecessors.insert(p(0, 0), None);
        predecessors.insert(p(0, 1), Some(p(0, 0)));

        assert!(reconstruct(&predecessors, p(0, 0), p(3, 3)).is_empty());
    }

    #[test]
    fn test_walks_chain_in_order() {
        let mut predecessors = Predecessors::default();
        predecessors.insert(p(0, 0), None);
        predecessors.insert(p(1, 1), Some(p(0, 0)));
        predecessors.insert(p(2, 1), Some(p(1, 1)));
        predecessors.insert(p(0, 1), Some(p(0, 0)));

        let path = reconstruct(&predecessors, p(0, 0), p(2, 1));
        assert_eq!(path, vec![p(0, 0), p(1, 1), p(2, 1)]);
    }

    #[test]
    fn test_broken_chain_still_begins_at_start() {
        // (5, 5) is a root that is not the start.
        let mut predecessors = Predecessors::default();
        predecessors.insert(p(5, 5), None);
        predecessors.insert(p(5, 6), Some(p(5, 5)));

        let path = reconstruct(&predecessors, p(0, 0), p(5, 6));
        assert_eq!(path, vec![p(0, 0), p(5, 5), p(5, 6)]);
    }

    #[test]
    fn test_cyclic_chain_terminates() {
        let mut predecessors = Predecessors::default();
        predecessors.insert(p(1, 1), Some(p(1, 2)));
        predecessors.insert(p(1, 2), Some(p(1, 1)));

        let path = reconstruct(&predecessors, p(0, 0), p(1, 1));
        assert_eq!(path.first(), Some(&p(0, 0)));
        assert!(path.len() <= predecessors.len() + 2);
    }

    #[test]
    fn test_steps_and_cost() {
        let path = vec![p(0, 0), p(1, 1), p(1, 2)];
        assert_eq!(steps(&path), 2);
        assert!((cost(&path) - (1.0 + DIAGONAL_STEP_COST)).abs() < 1e-9);
        assert_eq!(steps(&[]), 0);
        assert_eq!(cost(&[p(4, 4)]), 0.0);
    }
}
