use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::config::UiConfig;
use crate::game::{new_game, GameController, MoveError, Status, COLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Instructions,
    Playing,
}

pub struct App {
    game: GameController,
    config: UiConfig,
    screen: Screen,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    game_over_at: Option<Instant>,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        let screen = if config.show_instructions {
            Screen::Instructions
        } else {
            Screen::Playing
        };
        App {
            game: new_game(),
            selected_column: config.start_column.min(COLS - 1),
            config,
            screen,
            should_quit: false,
            message: None,
            game_over_at: None,
        }
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            self.tick(Instant::now());
            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Quit once the configured pause after game over has elapsed
    pub fn tick(&mut self, now: Instant) {
        if !self.config.exit_on_game_over {
            return;
        }
        if let Some(ended) = self.game_over_at {
            if now.duration_since(ended) >= Duration::from_millis(self.config.exit_delay_ms) {
                log::info!("exiting after game over");
                self.should_quit = true;
            }
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Instructions => {
                // Any other key starts the game
                self.screen = Screen::Playing;
            }
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        // Waiting to exit; the final board stays on screen
        if self.config.exit_on_game_over && self.game_over_at.is_some() {
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // Columns are numbered from 1 on screen
                match c.to_digit(10) {
                    Some(n) if (1..=COLS as u32).contains(&n) => {
                        self.selected_column = n as usize - 1;
                        self.drop_piece();
                    }
                    _ => {}
                }
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game = new_game();
        self.selected_column = self.config.start_column.min(COLS - 1);
        self.game_over_at = None;
        self.message = Some("New game started!".to_string());
        log::info!("new game started");
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game.attempt_move(self.selected_column) {
            Ok(outcome) => {
                self.message = match outcome.status {
                    Status::Won(player) => Some(format!("{player} wins!")),
                    Status::Draw => Some("It's a draw!".to_string()),
                    Status::InProgress => None,
                };
                if outcome.status.is_terminal() {
                    self.game_over_at = Some(Instant::now());
                }
            }
            Err(err) => {
                self.message = Some(move_error_message(err));
            }
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::Instructions => super::instructions::render(frame),
            Screen::Playing => super::game_view::render(
                frame,
                &self.game,
                self.selected_column,
                self.message.as_deref(),
            ),
        }
    }
}

/// Message shown when a drop is rejected; columns are numbered from 1
fn move_error_message(err: MoveError) -> String {
    match err {
        MoveError::InvalidColumn(col) if col < COLS => format!("Column {} is full!", col + 1),
        MoveError::InvalidColumn(col) => format!("There is no column {}!", col + 1),
        MoveError::GameAlreadyOver => "Game over! Press 'r' to restart.".to_string(),
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}
