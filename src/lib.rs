//! # Connect Four
//!
//! A two-player Connect Four game. The game core is pure, deterministic
//! logic; a terminal front-end built with Ratatui drives it from keyboard
//! input.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, game controller
//! - [`ui`]: Terminal UI: how-to-play screen and game view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
