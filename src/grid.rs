use crate::error::{Result, SearchError};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A cell coordinate, `row` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Distance under 8-directional movement where every step counts as one.
    pub fn chebyshev(&self, other: &Position) -> usize {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }

    fn offset(&self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Permanent for the lifetime of the grid.
    Wall,
    /// Spawned during a search, cleared at the start of every run.
    DynamicWall,
    Start,
    Target,
}

impl Cell {
    pub fn is_blocked(self) -> bool {
        matches!(self, Cell::Wall | Cell::DynamicWall)
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::DynamicWall => 'X',
            Cell::Start => 'S',
            Cell::Target => 'T',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'X' => Some(Cell::DynamicWall),
            'S' => Some(Cell::Start),
            'T' => Some(Cell::Target),
            _ => None,
        }
    }
}

/// Neighbor offsets in N, E, S, SE, W, NW, NE, SW order.
///
/// Searches break ties by this order, so it must not change.
pub const MOVES: [(isize, isize); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (1, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

pub const ORTHOGONAL_STEP_COST: f64 = 1.0;
/// Exactly √2 rather than the rounded 1.414.
pub const DIAGONAL_STEP_COST: f64 = std::f64::consts::SQRT_2;

/// Cost of moving between two adjacent cells.
pub fn step_cost(a: Position, b: Position) -> f64 {
    if a.row == b.row || a.col == b.col {
        ORTHOGONAL_STEP_COST
    } else {
        DIAGONAL_STEP_COST
    }
}

/// Fixed-shape 2D cell store.
///
/// Holding exactly one start and one target is established at construction
/// and not re-checked by mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates an obstacle-free grid with the given start and target.
    pub fn new(rows: usize, cols: usize, start: Position, target: Position) -> Result<Self> {
        if rows.saturating_mul(cols) < 2 {
            return Err(SearchError::InvalidDimensions { rows, cols });
        }
        let mut grid = Grid {
            rows,
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        };
        if start == target {
            return Err(SearchError::InvalidLayout(format!(
                "start and target share cell {start}"
            )));
        }
        grid.set_cell(start, Cell::Start)?;
        grid.set_cell(target, Cell::Target)?;
        Ok(grid)
    }

    /// Generates a grid with a random start, a distinct random target and
    /// `round(rows * cols * obstacle_ratio)` walls on the remaining cells.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        obstacle_ratio: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let total = rows.saturating_mul(cols);
        if total < 2 {
            return Err(SearchError::InvalidDimensions { rows, cols });
        }

        let start = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        let target = loop {
            let candidate = Position::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            if candidate != start {
                break candidate;
            }
        };
        let mut grid = Grid::new(rows, cols, start, target)?;

        // Rejection sampling; capped so it always terminates.
        let wanted = (total as f64 * obstacle_ratio.max(0.0)).round() as usize;
        let total_walls = wanted.min(total - 2);
        let mut walls_placed = 0;
        while walls_placed < total_walls {
            let row = rng.gen_range(0..rows);
            let col = rng.gen_range(0..cols);
            if grid.cells[row][col] == Cell::Empty {
                grid.cells[row][col] = Cell::Wall;
                walls_placed += 1;
            }
        }

        Ok(grid)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn cell_at(&self, pos: Position) -> Result<Cell> {
        self.get(pos).ok_or_else(|| self.out_of_bounds(pos))
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> Result<()> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        self.cells[pos.row][pos.col] = cell;
        Ok(())
    }

    /// First cell in row-major order holding `cell`.
    pub fn find(&self, cell: Cell) -> Option<Position> {
        self.positions().find(|&pos| self.cells[pos.row][pos.col] == cell)
    }

    /// Locates the start and target cells.
    pub fn endpoints(&self) -> Result<(Position, Position)> {
        match (self.find(Cell::Start), self.find(Cell::Target)) {
            (Some(start), Some(target)) => Ok((start, target)),
            _ => Err(SearchError::MissingStartOrTarget),
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    pub fn positions_of(&self, cell: Cell) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.cells[pos.row][pos.col] == cell)
            .collect()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Turns every dynamic wall back into an empty cell and returns how many there were.
    pub fn clear_dynamic(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().flatten() {
            if *cell == Cell::DynamicWall {
                *cell = Cell::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    /// Up to eight in-bounds, unblocked cells adjacent to `pos`, in [`MOVES`] order.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(MOVES.len());
        for &(d_row, d_col) in &MOVES {
            let Some(next) = pos.offset(d_row, d_col) else {
                continue;
            };
            match self.get(next) {
                Some(cell) if !cell.is_blocked() => neighbors.push(next),
                _ => {}
            }
        }
        neighbors
    }

    fn out_of_bounds(&self, pos: Position) -> SearchError {
        SearchError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl FromStr for Grid {
    type Err = SearchError;

    /// Parses one glyph per cell, one line per row; blank lines are ignored.
    fn from_str(layout: &str) -> Result<Self> {
        let mut cells = Vec::new();
        for line in layout.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = line
                .chars()
                .map(|glyph| {
                    Cell::from_glyph(glyph)
                        .ok_or_else(|| SearchError::InvalidLayout(format!("unknown glyph '{glyph}'")))
                })
                .collect::<Result<Vec<_>>>()?;
            cells.push(row);
        }

        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(SearchError::InvalidLayout("empty layout".to_string()));
        }
        if cells.iter().any(|row| row.len() != cols) {
            return Err(SearchError::InvalidLayout("rows differ in length".to_string()));
        }

        let grid = Grid { rows, cols, cells };
        for marker in [Cell::Start, Cell::Target] {
            let found = grid.count(marker);
            if found != 1 {
                return Err(SearchError::InvalidLayout(format!(
                    "expected exactly one '{}', found {found}",
                    marker.glyph()
                )));
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        Grid::new(rows, cols, Position::new(0, 0), Position::new(rows - 1, cols - 1)).unwrap()
    }

    #[test]
    fn test_neighbors_follow_move_order() {
        let grid = open_grid(3, 3);
        let center = Position::new(1, 1);
        let expected = vec![
            Position::new(0, 1),
            Position::new(1, 2),
            Position::new(2, 1),
            Position::new(2, 2),
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(0, 2),
            Position::new(2, 0),
        ];
        assert_eq!(grid.neighbors(&center), expected);
    }

    #[test]
    fn test_neighbors_respect_bounds() {
        let grid = open_grid(3, 3);
        let corner = grid.neighbors(&Position::new(0, 0));
        assert_eq!(
            corner,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_neighbors_skip_static_and_dynamic_walls() {
        let mut grid = open_grid(3, 3);
        grid.set_cell(Position::new(0, 1), Cell::Wall).unwrap();
        grid.set_cell(Position::new(1, 1), Cell::DynamicWall).unwrap();

        let neighbors = grid.neighbors(&Position::new(0, 0));
        assert_eq!(neighbors, vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_step_cost() {
        let a = Position::new(2, 2);
        assert_eq!(step_cost(a, Position::new(1, 2)), 1.0);
        assert_eq!(step_cost(a, Position::new(2, 3)), 1.0);
        assert!((step_cost(a, Position::new(3, 3)) - 1.414_213_56).abs() < 1e-6);
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut grid = open_grid(2, 2);
        let err = grid.set_cell(Position::new(2, 0), Cell::Wall).unwrap_err();
        assert!(matches!(err, SearchError::OutOfBounds { rows: 2, cols: 2, .. }));
        assert!(grid.cell_at(Position::new(0, 5)).is_err());
    }

    #[test]
    fn test_find_and_endpoints() {
        let mut grid = open_grid(3, 4);
        assert_eq!(grid.find(Cell::Target), Some(Position::new(2, 3)));
        assert_eq!(
            grid.endpoints().unwrap(),
            (Position::new(0, 0), Position::new(2, 3))
        );

        grid.set_cell(Position::new(2, 3), Cell::Empty).unwrap();
        assert_eq!(grid.endpoints(), Err(SearchError::MissingStartOrTarget));
    }

    #[test]
    fn test_clear_dynamic_keeps_static_walls() {
        let mut grid: Grid = "S.X\n#X.\n..T".parse().unwrap();
        assert_eq!(grid.clear_dynamic(), 2);
        assert_eq!(grid.count(Cell::DynamicWall), 0);
        assert_eq!(grid.count(Cell::Wall), 1);
    }

    #[test]
    fn test_generate_places_markers_and_walls() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::generate(8, 10, 0.20, &mut rng).unwrap();

        assert_eq!(grid.dimensions(), (8, 10));
        assert_eq!(grid.count(Cell::Start), 1);
        assert_eq!(grid.count(Cell::Target), 1);
        assert_eq!(grid.count(Cell::Wall), 16);
    }

    #[test]
    fn test_generate_caps_wall_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::generate(2, 2, 1.0, &mut rng).unwrap();
        assert_eq!(grid.count(Cell::Wall), 2);
        assert!(Grid::generate(1, 1, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_parse_round_trips_through_display() {
        let layout = "S.#\n.X.\n#.T\n";
        let grid: Grid = layout.parse().unwrap();
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn test_parse_rejects_bad_layouts() {
        assert!("S.?\n..T".parse::<Grid>().is_err());
        assert!("S..\n.T".parse::<Grid>().is_err());
        assert!("S..\n...".parse::<Grid>().is_err());
        assert!("SS.\n..T".parse::<Grid>().is_err());
        assert!("".parse::<Grid>().is_err());
    }
}
