use crate::game::{Cell, GameController, Player, Status, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Display colour of a player's pieces
fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Blue,
    }
}

pub fn render(
    frame: &mut Frame,
    game: &GameController,
    selected_column: usize,
    message: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, game, chunks[0]);
    render_board(frame, game, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, game: &GameController, area: Rect) {
    let (text, color) = match game.status() {
        Status::InProgress => {
            let player = game.current_player();
            (format!("Current Player: {player}"), player_color(player))
        }
        Status::Won(player) => (format!("Game Over  |  {player} wins!"), player_color(player)),
        Status::Draw => ("Game Over  |  Draw".to_string(), Color::White),
    };

    let header = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game: &GameController, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();
    let winning = game.winning_line();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    // Piece about to be dropped, hovering over the selected column
    let mut hover_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column && !game.is_terminal() {
            hover_line.push(Span::styled(
                " ● ",
                Style::default().fg(player_color(game.current_player())),
            ));
        } else {
            hover_line.push(Span::raw("   "));
        }
    }
    hover_line.push(Span::raw("  "));
    lines.push(Line::from(hover_line));

    // Top border
    lines.push(Line::from("  ╔══════════════════════╗"));

    // Board rows, top row first
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, mut style) = match game.cell_at(row, col) {
                Cell::Empty => (" . ", Style::default().fg(Color::DarkGray)),
                Cell::PlayerOne => (" ● ", Style::default().fg(player_color(Player::One))),
                Cell::PlayerTwo => (" ● ", Style::default().fg(player_color(Player::Two))),
            };
            if winning.is_some_and(|line| line.contains(&(row, col))) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    // Bottom border
    lines.push(Line::from("  ╚══════════════════════╝"));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter: Drop  |  1-7: Drop in column  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::new_game;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(game: &GameController, message: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|f| render(f, game, 3, message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_current_player() {
        let game = new_game();
        let text = screen_text(&game, None);
        assert!(text.contains("Current Player: Player 1"));
        assert!(text.contains("Connect Four"));
    }

    #[test]
    fn test_header_shows_winner() {
        let mut game = new_game();
        for col in [3, 0, 3, 0, 3, 0, 3] {
            game.attempt_move(col).unwrap();
        }
        let text = screen_text(&game, Some("Player 1 wins!"));
        assert!(text.contains("Game Over  |  Player 1 wins!"));
    }

    #[test]
    fn test_board_shows_placed_pieces() {
        let mut game = new_game();
        game.attempt_move(0).unwrap();
        let text = screen_text(&game, None);
        // One hovering piece plus one placed piece
        assert_eq!(text.matches('●').count(), 2);
        assert_eq!(text.matches(" . ").count(), ROWS * COLS - 1);
    }

    #[test]
    fn test_player_colors_differ() {
        assert_ne!(player_color(Player::One), player_color(Player::Two));
    }
}
