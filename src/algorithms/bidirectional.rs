use super::{Predecessors, SearchContext, SearchState};
use crate::grid::Position;
use std::collections::hash_map::Entry;
use std::collections::VecDeque;
use std::iter;

/// One side of a bidirectional sweep.
struct Sweep {
    visited: Predecessors,
    queue: VecDeque<Position>,
}

impl Sweep {
    fn rooted_at(root: Position) -> Self {
        let mut visited = Predecessors::default();
        visited.insert(root, None);
        Sweep {
            visited,
            queue: VecDeque::from([root]),
        }
    }

    /// Expands the head of the queue; returns the first neighbor `other` has seen.
    fn advance(
        &mut self,
        ctx: &SearchContext<'_>,
        other: &Sweep,
        order: &mut Vec<Position>,
    ) -> Option<Position> {
        let current = self.queue.pop_front()?;
        order.push(current);
        for next in ctx.neighbors(&current) {
            if let Entry::Vacant(entry) = self.visited.entry(next) {
                entry.insert(Some(current));
                self.queue.push_back(next);
            }
            if other.visited.contains_key(&next) {
                return Some(next);
            }
        }
        None
    }

    /// Follows parent links from `pos` to this sweep's root.
    fn walk(&self, pos: Option<Position>) -> impl Iterator<Item = Position> + '_ {
        iter::successors(pos, |p| self.visited.get(p).copied().flatten())
    }
}

struct Sweeps {
    forward: Sweep,
    backward: Sweep,
    meeting: Option<Position>,
    order: Vec<Position>,
    aborted: bool,
}

fn sweep(ctx: &mut SearchContext<'_>, start: Position, target: Position) -> Sweeps {
    let mut forward = Sweep::rooted_at(start);
    let mut backward = Sweep::rooted_at(target);
    let mut order = Vec::new();
    let mut meeting = None;
    let mut aborted = false;

    while !forward.queue.is_empty() || !backward.queue.is_empty() {
        ctx.begin_step();

        meeting = forward.advance(ctx, &backward, &mut order);
        if meeting.is_some() {
            break;
        }
        meeting = backward.advance(ctx, &forward, &mut order);
        if meeting.is_some() {
            break;
        }

        let frontier = forward.queue.iter().chain(&backward.queue).copied();
        let explored = forward.visited.keys().chain(backward.visited.keys()).copied();
        if ctx.end_step(frontier, explored).is_break() {
            aborted = true;
            break;
        }
    }

    Sweeps {
        forward,
        backward,
        meeting,
        order,
        aborted,
    }
}

/// Breadth-first sweeps from both ends, one expansion per side per step.
///
/// Stops the moment either side discovers a position the other has already
/// visited and accepts that first contact, so the route is not guaranteed to
/// be the shortest. The explored set is everything either side has visited.
pub fn search(ctx: &mut SearchContext<'_>, start: Position, target: Position) -> SearchState {
    let Sweeps {
        forward,
        backward,
        meeting,
        order,
        aborted,
    } = sweep(ctx, start, target);

    let mut state = SearchState {
        explored: forward.visited.keys().chain(backward.visited.keys()).copied().collect(),
        expansion_order: order,
        meeting_point: meeting,
        aborted,
        ..SearchState::default()
    };

    let Some(meet) = meeting else {
        return state;
    };
    log::debug!("Bidirectional frontiers met at {meet}");

    let mut route: Vec<Position> = forward.walk(Some(meet)).collect();
    route.reverse();
    route.extend(backward.walk(backward.visited.get(&meet).copied().flatten()));

    state.predecessors = route
        .iter()
        .enumerate()
        .map(|(i, &pos)| (pos, i.checked_sub(1).map(|prev| route[prev])))
        .collect();
    state
}
