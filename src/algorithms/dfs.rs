use super::{Predecessors, SearchContext, SearchState};
use crate::grid::Position;
use std::iter;
use std::rc::Rc;

/// One root-to-node chain on the DFS stack.
///
/// Sibling entries share their common prefix, so every stack entry carries
/// its own predecessor chain without copying a map per push.
struct Branch {
    pos: Position,
    parent: Option<Rc<Branch>>,
}

impl Branch {
    fn root(pos: Position) -> Rc<Self> {
        Rc::new(Branch { pos, parent: None })
    }

    fn child(self: &Rc<Self>, pos: Position) -> Rc<Self> {
        Rc::new(Branch {
            pos,
            parent: Some(Rc::clone(self)),
        })
    }

    fn chain(&self) -> impl Iterator<Item = &Branch> {
        iter::successors(Some(self), |branch| branch.parent.as_deref())
    }

    fn contains(&self, pos: Position) -> bool {
        self.chain().any(|branch| branch.pos == pos)
    }

    fn predecessors(&self) -> Predecessors {
        self.chain()
            .map(|branch| (branch.pos, branch.parent.as_ref().map(|parent| parent.pos)))
            .collect()
    }
}

impl Drop for Branch {
    // Unlink iteratively; long chains would otherwise recurse once per node.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(rc) = parent {
            match Rc::try_unwrap(rc) {
                Ok(mut branch) => parent = branch.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Depth-first search, optionally depth-limited.
///
/// With `limit = Some(n)`, nodes at depth `n` are still explored but their
/// children are never pushed. A position explored once is skipped on every
/// later pop, which is what makes depth-limited runs incomplete. The returned
/// predecessors are the chain of the last expanded node.
pub fn search(
    ctx: &mut SearchContext<'_>,
    start: Position,
    target: Position,
    limit: Option<usize>,
) -> SearchState {
    let mut state = SearchState::default();
    let mut stack = vec![(Branch::root(start), 0usize)];
    let mut last: Option<Rc<Branch>> = None;

    while !stack.is_empty() {
        ctx.begin_step();
        let Some((branch, depth)) = stack.pop() else {
            break;
        };
        let current = branch.pos;
        if !state.explore(current) {
            continue;
        }
        last = Some(Rc::clone(&branch));

        if current == target {
            break;
        }

        if limit.map_or(true, |limit| depth < limit) {
            for next in ctx.neighbors(&current) {
                if !branch.contains(next) {
                    stack.push((branch.child(next), depth + 1));
                }
            }
        }

        let frontier = stack.iter().map(|(branch, _)| branch.pos);
        if ctx.end_step(frontier, state.explored.iter().copied()).is_break() {
            state.aborted = true;
            break;
        }
    }

    if let Some(branch) = last {
        state.predecessors = branch.predecessors();
    }
    state
}
