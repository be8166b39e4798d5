use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HOW_TO_PLAY: [&str; 5] = [
    "1. Two players take turns.",
    "2. Pick a column with ←/→ or the keys 1-7.",
    "3. The piece drops to the lowest free cell.",
    "4. Connect 4 pieces in a row, column or diagonal to win.",
    "",
];

/// How-to-play screen shown before the first game.
pub fn render(frame: &mut Frame) {
    let mut lines = vec![
        Line::styled(
            "CONNECT FOUR - HOW TO PLAY",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    lines.extend(HOW_TO_PLAY.iter().map(|&text| Line::from(text)));
    lines.push(Line::styled(
        "PRESS ANY KEY TO START",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));
    frame.render_widget(widget, frame.area());
}
