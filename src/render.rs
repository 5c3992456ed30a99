use crate::algorithms::{PositionSet, SearchObserver, Snapshot};
use crate::grid::{Cell, Grid, Position};
use rustc_hash::FxHashSet;
use std::fmt::Write;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

pub const LEGEND: &str =
    "Legend: S=Start, T=Target, #=Wall, X=Dynamic wall, f=Frontier, o=Explored, *=Path, .=Empty";

/// Draws the grid with search overlays.
///
/// Markers and walls win over the path, the path over the frontier, and the
/// frontier over explored cells.
pub fn render(grid: &Grid, frontier: &PositionSet, explored: &PositionSet, path: &[Position]) -> String {
    let path: FxHashSet<Position> = path.iter().copied().collect();
    let (rows, cols) = grid.dimensions();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{:2}", col % 10);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:2} ");
        for col in 0..cols {
            let pos = Position::new(row, col);
            let glyph = match grid.get(pos).unwrap_or(Cell::Empty) {
                Cell::Empty if path.contains(&pos) => '*',
                Cell::Empty if frontier.contains(&pos) => 'f',
                Cell::Empty if explored.contains(&pos) => 'o',
                cell => cell.glyph(),
            };
            let _ = write!(out, "{glyph} ");
        }
        out.push('\n');
    }
    out
}

/// Terminal host that redraws after every step and paces the search.
pub struct TerminalRenderer {
    delay: Duration,
    steps: usize,
}

impl TerminalRenderer {
    pub fn new(delay: Duration) -> Self {
        TerminalRenderer { delay, steps: 0 }
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}

impl SearchObserver for TerminalRenderer {
    fn on_step(&mut self, snapshot: &Snapshot<'_>) -> ControlFlow<()> {
        self.steps += 1;
        self.clear_screen();
        println!("{LEGEND}");
        println!(
            "Step {} | Frontier: {} | Explored: {}",
            self.steps,
            snapshot.frontier.len(),
            snapshot.explored.len()
        );
        print!("{}", render(snapshot.grid, snapshot.frontier, snapshot.explored, &[]));
        thread::sleep(self.delay);
        ControlFlow::Continue(())
    }

    fn on_complete(&mut self, grid: &Grid, path: &[Position]) {
        self.clear_screen();
        println!("{LEGEND}");
        println!("Finished after {} steps", self.steps);
        let empty = PositionSet::default();
        print!("{}", render(grid, &empty, &empty, path));
        self.steps = 0;
    }
}
