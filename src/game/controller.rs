use super::board::Line;
use super::{Board, Cell, Player};

/// Where a game stands after the last accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    InProgress,
    Won(Player),
    Draw,
}

impl Status {
    /// Won and Draw accept no further moves
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Cell a piece landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub status: Status,
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is not playable")]
    InvalidColumn(usize),

    #[error("the game is already over")]
    GameAlreadyOver,
}

/// Owns one game's board, whose turn it is, and whether the game has ended.
///
/// [`GameController::attempt_move`] is the only mutating operation. A
/// controller is driven by one caller at a time; start a new game by
/// constructing a new controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameController {
    board: Board,
    current_player: Player,
    status: Status,
    move_count: usize,
    last_placement: Option<Placement>,
}

/// Start a fresh game: empty board, Player 1 to move.
pub fn new_game() -> GameController {
    GameController::new()
}

impl GameController {
    pub fn new() -> Self {
        GameController {
            board: Board::new(),
            current_player: Player::One,
            status: Status::InProgress,
            move_count: 0,
            last_placement: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    /// Player whose piece the next accepted move places
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of accepted moves so far
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// The run that decided the game, if it has been won
    pub fn winning_line(&self) -> Option<Line> {
        match self.status {
            Status::Won(player) => self.board.winning_line(player),
            Status::InProgress | Status::Draw => None,
        }
    }

    /// Drop the current player's piece into `col`.
    ///
    /// The win check runs before the draw check, so a move that fills the
    /// board and completes four in a row wins. Rejected moves leave the
    /// game untouched.
    pub fn attempt_move(&mut self, col: usize) -> Result<MoveOutcome, MoveError> {
        if self.is_terminal() {
            log::debug!("rejected move in column {col}: game is over");
            return Err(MoveError::GameAlreadyOver);
        }

        if !self.board.is_column_playable(col) {
            log::debug!("rejected move in column {col}: not playable");
            return Err(MoveError::InvalidColumn(col));
        }

        let row = match self.board.lowest_empty_row(col) {
            Ok(row) => row,
            Err(err) => unreachable!("playable column has no empty row: {err}"),
        };

        let player = self.current_player;
        self.board.place(row, col, player);
        self.move_count += 1;
        let placement = Placement { row, col };
        self.last_placement = Some(placement);
        log::debug!("move {}: {player} -> ({row}, {col})", self.move_count);

        if self.board.has_connected_four(player) {
            self.status = Status::Won(player);
            log::info!("{player} wins after {} moves", self.move_count);
        } else if self.board.is_full() {
            self.status = Status::Draw;
            log::info!("draw after {} moves", self.move_count);
        } else {
            self.current_player = player.other();
        }

        Ok(MoveOutcome {
            status: self.status,
            placement,
        })
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};

    /// Columns whose alternating fill leaves a 42-piece board without four
    /// in a row for either player
    const DRAW_SEQUENCE: [usize; 42] = [
        0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, //
        2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, //
        4, 5, 4, 5, 4, 5, 5, 4, 5, 4, 5, 4, //
        6, 6, 6, 6, 6, 6,
    ];

    /// The 42nd move fills the board and also completes a run for Player 2
    const WIN_ON_LAST_MOVE: [usize; 42] = [
        1, 2, 4, 6, 5, 2, 1, 0, 2, 5, 4, 0, 6, 5, 4, 1, 5, 2, 1, 6, 3, //
        4, 0, 4, 5, 2, 5, 4, 6, 2, 6, 3, 6, 0, 1, 1, 0, 0, 3, 3, 3, 3,
    ];

    fn play(game: &mut GameController, columns: &[usize]) -> MoveOutcome {
        let mut last = None;
        for &col in columns {
            last = Some(game.attempt_move(col).unwrap());
        }
        last.expect("at least one move")
    }

    #[test]
    fn test_new_game() {
        let game = new_game();
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.last_placement(), None);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_attempt_move() {
        let mut game = new_game();
        let outcome = game.attempt_move(3).unwrap();

        assert_eq!(outcome.status, Status::InProgress);
        assert_eq!(outcome.placement, Placement { row: 0, col: 3 });
        assert_eq!(game.cell_at(0, 3), Cell::PlayerOne);
        assert_eq!(game.current_player(), Player::Two);

        let outcome = game.attempt_move(3).unwrap();
        assert_eq!(outcome.placement, Placement { row: 1, col: 3 });
        assert_eq!(game.cell_at(1, 3), Cell::PlayerTwo);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.last_placement(), Some(outcome.placement));
    }

    #[test]
    fn test_vertical_win() {
        let mut game = new_game();
        play(&mut game, &[3, 0, 3, 0, 3, 0]);
        assert_eq!(game.status(), Status::InProgress);

        let outcome = game.attempt_move(3).unwrap();
        assert_eq!(outcome.status, Status::Won(Player::One));
        assert_eq!(outcome.placement, Placement { row: 3, col: 3 });
        for row in 0..4 {
            assert_eq!(game.cell_at(row, 3), Cell::PlayerOne);
        }
        assert_eq!(game.winning_line(), Some([(0, 3), (1, 3), (2, 3), (3, 3)]));
        // The turn does not pass once the game is decided
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn test_diagonal_win_after_fourth_piece() {
        let mut game = new_game();
        let setup = [0, 1, 1, 2, 3, 2, 2, 3, 6, 3];
        for &col in &setup {
            game.attempt_move(col).unwrap();
            assert!(!game.board().has_connected_four(Player::One));
            assert_eq!(game.status(), Status::InProgress);
        }

        let outcome = game.attempt_move(3).unwrap();
        assert_eq!(outcome.placement, Placement { row: 3, col: 3 });
        assert_eq!(outcome.status, Status::Won(Player::One));
        assert_eq!(game.winning_line(), Some([(0, 0), (1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn test_draw() {
        let mut game = new_game();
        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();
        for &col in rest {
            assert_eq!(game.attempt_move(col).unwrap().status, Status::InProgress);
        }

        let outcome = game.attempt_move(*last).unwrap();
        assert_eq!(outcome.status, Status::Draw);
        assert!(game.board().is_full());
        assert_eq!(game.move_count(), ROWS * COLS);
        assert_eq!(game.winning_line(), None);
    }

    #[test]
    fn test_win_takes_precedence_over_draw() {
        let mut game = new_game();
        let outcome = play(&mut game, &WIN_ON_LAST_MOVE);

        assert!(game.board().is_full());
        assert_eq!(outcome.status, Status::Won(Player::Two));
    }

    #[test]
    fn test_out_of_range_column() {
        let mut game = new_game();
        play(&mut game, &[2, 4]);
        let before = game.clone();

        assert_eq!(game.attempt_move(COLS), Err(MoveError::InvalidColumn(COLS)));
        assert_eq!(game.attempt_move(usize::MAX), Err(MoveError::InvalidColumn(usize::MAX)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_column_rejected() {
        let mut game = new_game();
        play(&mut game, &[0; ROWS]);
        let before = game.clone();

        assert_eq!(game.attempt_move(0), Err(MoveError::InvalidColumn(0)));
        assert_eq!(game, before);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn test_terminal_game_rejects_moves() {
        let mut game = new_game();
        play(&mut game, &[3, 0, 3, 0, 3, 0, 3]);
        let before = game.clone();

        for col in 0..=COLS {
            assert_eq!(game.attempt_move(col), Err(MoveError::GameAlreadyOver));
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_draw_is_terminal() {
        let mut game = new_game();
        play(&mut game, &DRAW_SEQUENCE);
        assert_eq!(game.attempt_move(0), Err(MoveError::GameAlreadyOver));
        assert_eq!(game.status(), Status::Draw);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let mut game = new_game();
        play(&mut game, &[1, 1, 5]);

        let status = game.status();
        let cells: Vec<Cell> = (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .map(|(row, col)| game.cell_at(row, col))
            .collect();

        for _ in 0..3 {
            assert_eq!(game.status(), status);
            let again: Vec<Cell> = (0..ROWS)
                .flat_map(|row| (0..COLS).map(move |col| (row, col)))
                .map(|(row, col)| game.cell_at(row, col))
                .collect();
            assert_eq!(again, cells);
        }
    }

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(7).to_string(),
            "column 7 is not playable"
        );
        assert_eq!(
            MoveError::GameAlreadyOver.to_string(),
            "the game is already over"
        );
    }
}
