use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use smallvec::SmallVec;

use super::Side;
use crate::error::ParseBoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Discs in a row needed to win.
pub const CONNECT: usize = 4;

/// Legal columns in ascending order. Never longer than `COLS`, so it stays on
/// the stack inside the search.
pub type LegalColumns = SmallVec<[usize; COLS]>;

/// Four `(row, col)` coordinates that together form a potential winning line.
pub type Line = [(usize, usize); CONNECT];

/// Every line of four on the board: horizontal, vertical, `\` diagonal, then
/// `/` diagonal.
static LINES: LazyLock<Vec<Line>> = LazyLock::new(|| {
    let horizontal = (0..ROWS)
        .flat_map(|row| (0..=COLS - CONNECT).map(move |col| line(row, col, 0, 1)));
    let vertical = (0..COLS)
        .flat_map(|col| (0..=ROWS - CONNECT).map(move |row| line(row, col, 1, 0)));
    let diagonal_down = (0..=ROWS - CONNECT)
        .flat_map(|row| (0..=COLS - CONNECT).map(move |col| line(row, col, 1, 1)));
    let diagonal_up = (CONNECT - 1..ROWS)
        .flat_map(|row| (0..=COLS - CONNECT).map(move |col| line(row, col, -1, 1)));

    horizontal
        .chain(vertical)
        .chain(diagonal_down)
        .chain(diagonal_up)
        .collect()
});

fn line(row: usize, col: usize, d_row: isize, d_col: isize) -> Line {
    std::array::from_fn(|i| {
        let i = i as isize;
        (
            (row as isize + d_row * i) as usize,
            (col as isize + d_col * i) as usize,
        )
    })
}

/// All 69 lines of four, in scan order.
pub fn lines() -> &'static [Line] {
    &LINES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The side owning this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Side::Red),
            Cell::Yellow => Some(Side::Yellow),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,

    #[error("column index out of range")]
    InvalidColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Drop a disc for `side` into `col`, returning the row where it landed.
    pub fn apply_move(&mut self, col: usize, side: Side) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        // Top cell is empty, so the scan always finds a slot.
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull)?;
        self.cells[row][col] = side.to_cell();
        Ok(row)
    }

    /// Clear the cell filled by the most recent `apply_move` in `col`.
    ///
    /// Callers must undo in LIFO order with the row `apply_move` returned;
    /// the board keeps no history of its own.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn undo_move(&mut self, col: usize, row: usize) {
        debug_assert!(
            row == 0 || self.cells[row - 1][col] == Cell::Empty,
            "undo_move({col}, {row}) is not the top disc of its column"
        );
        self.cells[row][col] = Cell::Empty;
    }

    /// Whether `side` has four discs in a line anywhere on the board.
    pub fn has_won(&self, side: Side) -> bool {
        let cell = side.to_cell();
        lines()
            .iter()
            .any(|line| line.iter().all(|&(row, col)| self.cells[row][col] == cell))
    }

    /// Whether every column is full. Only a draw once neither side has won.
    pub fn is_draw(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// Columns that can still take a disc, ascending.
    pub fn legal_columns(&self) -> LegalColumns {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Number of discs on the board.
    pub fn disc_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines of `.`, `R` and `Y`, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(ParseBoardError::RowCount(rows.len()));
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let width = text.chars().count();
            if width != COLS {
                return Err(ParseBoardError::RowWidth { row, width });
            }
            for (col, ch) in text.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'R' | 'r' => Cell::Red,
                    'Y' | 'y' => Cell::Yellow,
                    _ => return Err(ParseBoardError::UnknownCell { row, col, ch }),
                };
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(ParseBoardError::FloatingDisc { row, col });
                }
            }
        }

        Ok(board)
    }
}
