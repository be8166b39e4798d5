//! Terminal UI: a how-to-play screen and the game view, driven by keyboard
//! input and rendering whatever the game controller reports.

mod app;
mod game_view;
mod instructions;

pub use app::{App, Screen};
