//! Reusable UI widgets

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{SearchBox, TerminalView};
use crate::Category;

/// Braille spinner frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Get spinner frame for current tick
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

fn centered_row(area: Rect, height: u16, margin_pct: u16) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(margin_pct),
            Constraint::Length(height),
            Constraint::Percentage(margin_pct),
        ])
        .split(area)[1]
}

/// Render a loading spinner with message
pub fn render_loading(f: &mut Frame, area: Rect, message: &str, tick: usize) {
    let text = format!("{} {}", spinner_frame(tick), message);
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, centered_row(area, 1, 45));
}

/// Render the error state
pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(message.to_string()),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, centered_row(area, 3, 40));
}

/// Render the empty state naming what produced no results
pub fn render_empty(f: &mut Frame, area: Rect, label: &str) {
    let text = vec![
        Line::from(Span::styled(
            "No Results Found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "No news articles found for \"{}\". Try different keywords or browse by category.",
            label
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, centered_row(area, 4, 40));
}

/// Render the category pills, highlighting the active one
pub fn render_pills(f: &mut Frame, area: Rect, active: Option<Category>) {
    let mut spans = vec![Span::raw(" ")];
    for (idx, category) in Category::ALL.iter().enumerate() {
        let label = format!(" {}:{} ", idx + 1, category.display_name());
        let style = if active == Some(*category) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the search box
pub fn render_search(f: &mut Frame, area: Rect, search: &SearchBox) {
    let (border_style, content) = if search.focused {
        (
            Style::default().fg(Color::Yellow),
            Line::from(vec![Span::raw(search.query.clone()), Span::raw("▏")]),
        )
    } else if search.query.is_empty() {
        (
            Style::default(),
            Line::from(Span::styled(
                "Press / to search news...",
                Style::default().add_modifier(Modifier::DIM),
            )),
        )
    } else {
        (Style::default(), Line::from(search.query.clone()))
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style);
    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Render help overlay
pub fn render_help(f: &mut Frame, area: Rect) {
    let entries = [
        ("j/↓", "Next article"),
        ("k/↑", "Previous article"),
        ("1-7", "Select category"),
        ("/", "Search"),
        ("Enter/o", "Open article in browser"),
        ("r", "Reload"),
        ("q", "Quit"),
        ("?", "Toggle this help"),
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            "NewsHub",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_text.extend(entries.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("{:<10}", key), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(*what),
        ])
    }));

    let paragraph = Paragraph::new(help_text)
        .block(Block::default().title(" Help ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    // Center the help dialog
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Min(12),
            Constraint::Percentage(20),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Min(40),
            Constraint::Percentage(20),
        ])
        .split(vertical_layout[1]);

    // Clear the area underneath so text isn't visible through the help overlay
    f.render_widget(Clear, horizontal_layout[1]);
    f.render_widget(paragraph, horizontal_layout[1]);
}

/// Render status bar
pub fn render_status(view: &TerminalView, tick: usize) -> Paragraph<'static> {
    let mut segments = if view.search.focused {
        vec![
            Span::raw(" Enter search "),
            Span::raw("│ "),
            Span::raw("Esc cancel "),
        ]
    } else {
        vec![
            Span::raw(" j/k navigate "),
            Span::raw("│ "),
            Span::raw("1-7 category "),
            Span::raw("│ "),
            Span::raw("/ search "),
            Span::raw("│ "),
            Span::raw("o open "),
            Span::raw("│ "),
            Span::raw("?:help "),
            Span::raw("│ "),
            Span::raw("q quit "),
        ]
    };

    let count = view.state.articles().len();
    if count > 0 {
        segments.push(Span::raw("│ "));
        segments.push(Span::styled(
            format!("{}/{}", view.selected_index + 1, count),
            Style::default().fg(Color::Yellow),
        ));
    }

    if view.should_show_loading() {
        segments.push(Span::raw(" │ "));
        segments.push(Span::styled(
            format!("{} loading", spinner_frame(tick)),
            Style::default().fg(Color::Blue),
        ));
    }

    Paragraph::new(Line::from(segments))
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(Block::default().borders(Borders::TOP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
