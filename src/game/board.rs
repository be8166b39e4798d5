use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

/// Cell coordinates `(row, col)` of a winning run.
pub type Line = [(usize, usize); CONNECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// The player occupying this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is out of range")]
    ColumnOutOfRange(usize),
}

/// The playing grid.
///
/// Row 0 is the bottom row, where pieces land first; row `ROWS - 1` is the
/// top. Pieces are only ever added at the lowest empty row of a column, so
/// within a column every empty cell sits above every occupied one.
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
    /// Row 0 is the bottom, row 5 is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Whether a piece can still be dropped into `col`
    pub fn is_column_playable(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Columns that still accept a piece, left to right
    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(|&col| self.is_column_playable(col))
    }

    /// Row a piece dropped into `col` would land on
    pub fn lowest_empty_row(&self, col: usize) -> Result<usize, BoardError> {
        if col >= COLS {
            return Err(BoardError::ColumnOutOfRange(col));
        }

        (0..ROWS)
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(BoardError::ColumnFull(col))
    }

    /// Put `player`'s piece at (row, col).
    ///
    /// The cell must be empty. Callers obtain `row` from
    /// [`Board::lowest_empty_row`], which keeps the gravity invariant.
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        debug_assert_eq!(
            self.cells[row][col],
            Cell::Empty,
            "cell ({row}, {col}) is already occupied"
        );
        self.cells[row][col] = player.to_cell();
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Check whether `player` has four in a row anywhere on the board
    pub fn has_connected_four(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First run of four `player` pieces found by a full scan.
    ///
    /// Runs are searched horizontally, vertically, along the ascending
    /// diagonal (row and column increasing) and along the descending
    /// diagonal (row decreasing, column increasing), in that order.
    pub fn winning_line(&self, player: Player) -> Option<Line> {
        let cell = player.to_cell();
        let check = |line: Line| {
            line.iter()
                .all(|&(row, col)| self.cells[row][col] == cell)
                .then_some(line)
        };

        // Horizontal
        for row in 0..ROWS {
            for col in 0..=COLS - CONNECT {
                if let Some(line) = check(std::array::from_fn(|i| (row, col + i))) {
                    return Some(line);
                }
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..=ROWS - CONNECT {
                if let Some(line) = check(std::array::from_fn(|i| (row + i, col))) {
                    return Some(line);
                }
            }
        }

        // Ascending diagonal
        for row in 0..=ROWS - CONNECT {
            for col in 0..=COLS - CONNECT {
                if let Some(line) = check(std::array::from_fn(|i| (row + i, col + i))) {
                    return Some(line);
                }
            }
        }

        // Descending diagonal
        for row in CONNECT - 1..ROWS {
            for col in 0..=COLS - CONNECT {
                if let Some(line) = check(std::array::from_fn(|i| (row - i, col + i))) {
                    return Some(line);
                }
            }
        }

        None
    }

    /// Check whether the piece at (row, col) is part of four in a row.
    ///
    /// Only the four lines through the cell are inspected.
    pub fn wins_through(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        [(0, 1), (1, 0), (1, 1), (-1, 1)].iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= CONNECT
        })
    }

    /// Count consecutive `cell` pieces starting next to (row, col) and
    /// walking in direction (dr, dc)
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
