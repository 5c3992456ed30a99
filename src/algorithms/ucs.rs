use super::{SearchContext, SearchState};
use crate::grid::{step_cost, Position};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Entry in the UCS priority queue.
#[derive(Clone, Copy, PartialEq, Debug)]
struct QueueEntry {
    cost: f64,
    pos: Position,
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior; equal costs fall back to position order.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

/// Uniform-cost search with lazy deletion.
///
/// A cheaper route to a neighbor pushes a fresh entry and leaves the stale
/// one in the heap; stale entries are skipped when popped because their
/// position is already explored.
pub fn search(ctx: &mut SearchContext<'_>, start: Position, target: Position) -> SearchState {
    let mut state = SearchState::default();
    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry {
        cost: 0.0,
        pos: start,
    });
    state.predecessors.insert(start, None);
    state.costs.insert(start, 0.0);

    while !heap.is_empty() {
        ctx.begin_step();
        let Some(QueueEntry { cost, pos: current }) = heap.pop() else {
            break;
        };
        if !state.explore(current) {
            continue;
        }

        if current == target {
            break;
        }

        for next in ctx.neighbors(&current) {
            let new_cost = cost + step_cost(current, next);
            let improves = state
                .costs
                .get(&next)
                .map_or(true, |&known| new_cost < known);
            if improves {
                state.costs.insert(next, new_cost);
                state.predecessors.insert(next, Some(current));
                heap.push(QueueEntry {
                    cost: new_cost,
                    pos: next,
                });
            }
        }

        let frontier = heap.iter().map(|entry| entry.pos);
        if ctx.end_step(frontier, state.explored.iter().copied()).is_break() {
            state.aborted = true;
            break;
        }
    }

    state
}
