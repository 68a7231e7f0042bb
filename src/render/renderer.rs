use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Rgb, Snapshot, TileView, palette};
use crate::metrics::GameMetrics;

/// Each grid cell is two terminal columns wide so tiles come out square-ish
const EMPTY_CELL: &str = "  ";
const EYES_CELL: &str = "••";

fn to_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);
        frame.render_widget(self.render_grid(snapshot), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        Paragraph::new(grid_lines(snapshot))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let stats = Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(snapshot.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ]);

        let last_game = match &metrics.last_game {
            Some(report) => Line::from(Span::styled(
                report.message.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(""),
        };

        Paragraph::new(vec![stats, last_game]).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of spans per grid row. Snake tiles are drawn over the food.
fn grid_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let columns = snapshot.columns.max(0) as usize;
    let rows = snapshot.rows.max(0) as usize;
    let mut cells: Vec<Option<TileView>> = vec![None; columns * rows];

    let tiles = snapshot.food.iter().chain(snapshot.snake.iter().rev());
    for tile in tiles {
        let (x, y) = (tile.position.x, tile.position.y);
        if x >= 0 && y >= 0 && (x as usize) < columns && (y as usize) < rows {
            cells[y as usize * columns + x as usize] = Some(*tile);
        }
    }

    cells
        .chunks(columns.max(1))
        .take(rows)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|cell| match cell {
                    Some(tile) if tile.eyes => Span::styled(
                        EYES_CELL,
                        Style::default()
                            .fg(to_color(palette::EYES))
                            .bg(to_color(tile.color))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(tile) => Span::styled(EMPTY_CELL, Style::default().bg(to_color(tile.color))),
                    None => Span::styled(
                        EMPTY_CELL,
                        Style::default().bg(to_color(palette::BACKGROUND)),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
