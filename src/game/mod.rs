//! Core Connect Four game logic: the gravity board, player types, and the
//! turn/game-over state machine that drives them.

mod board;
mod controller;
mod player;

pub use board::{Board, BoardError, Cell, Line, COLS, CONNECT, ROWS};
pub use controller::{new_game, GameController, MoveError, MoveOutcome, Placement, Status};
pub use player::Player;
