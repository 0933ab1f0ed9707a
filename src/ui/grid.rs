//! Card grid view rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{widgets, TerminalView};
use crate::app::ViewState;
use crate::render::html::{NO_DESCRIPTION, UNKNOWN_DATE};
use crate::Article;

/// Description lines shown per card
const DESCRIPTION_LINES: usize = 2;
/// Rows taken by one card: title, description, meta, spacer
const CARD_HEIGHT: usize = DESCRIPTION_LINES + 3;

/// Render the portal screen
pub fn render(f: &mut Frame, view: &mut TerminalView, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Length(1), // Category pills
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Results
            Constraint::Length(2), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], view, tick);
    widgets::render_pills(f, chunks[1], view.active_pill);
    widgets::render_search(f, chunks[2], &view.search);

    match &view.state {
        ViewState::Loading => widgets::render_loading(f, chunks[3], "Loading news...", tick),
        ViewState::Error { message } => widgets::render_error(f, chunks[3], message),
        ViewState::Empty { label } => widgets::render_empty(f, chunks[3], label),
        ViewState::Populated { .. } => render_cards(f, chunks[3], view),
    }

    f.render_widget(widgets::render_status(view, tick), chunks[4]);

    if view.show_help {
        widgets::render_help(f, f.area());
    }
}

/// Render title bar with the section header
fn render_title(f: &mut Frame, area: Rect, view: &TerminalView, tick: usize) {
    let mut spans = vec![Span::styled(
        " NewsHub ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(header) = view.state.header() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            header.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" · {}", header.subtitle),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    if view.should_show_loading() {
        spans.push(Span::raw(format!(" {} Loading…", widgets::spinner_frame(tick))));
    }

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

/// Build the lines for one card
pub fn card_lines(article: &Article, number: usize, selected: bool, width: usize) -> Vec<Line<'static>> {
    let indicator = if selected {
        Span::styled("▸ ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("  ")
    };
    let title_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        indicator,
        Span::styled(format!("{}. ", number), title_style),
        Span::styled(article.title.clone(), title_style),
    ])];

    let description = article.description.as_deref().unwrap_or(NO_DESCRIPTION);
    let wrapped = textwrap::wrap(description, width.saturating_sub(5).max(10));
    for (idx, line) in wrapped.iter().take(DESCRIPTION_LINES).enumerate() {
        let mut text = line.to_string();
        if idx + 1 == DESCRIPTION_LINES && wrapped.len() > DESCRIPTION_LINES {
            text.push('…');
        }
        lines.push(Line::from(vec![Span::raw("     "), Span::raw(text)]));
    }

    let mut meta = vec![
        Span::raw("     "),
        Span::styled(article.source_name.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" │ "),
        Span::styled(
            article
                .published_date
                .clone()
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if let Some(ago) = &article.time_ago {
        meta.push(Span::raw(" │ "));
        meta.push(Span::styled(ago.clone(), Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(meta));
    lines
}

/// Render the list of cards
fn render_cards(f: &mut Frame, area: Rect, view: &mut TerminalView) {
    view.update_scroll(area.height as usize / CARD_HEIGHT);

    let articles = view.state.articles();
    let items: Vec<ListItem> = articles
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            let mut lines = card_lines(
                article,
                idx + 1,
                idx == view.selected_index,
                area.width as usize,
            );
            if idx < articles.len() - 1 {
                lines.push(Line::from(""));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::NONE));

    let mut state = ListState::default()
        .with_selected(Some(view.selected_index))
        .with_offset(view.scroll);

    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(description: Option<&str>) -> Article {
        Article {
            title: "Fusion milestone".to_string(),
            description: description.map(str::to_string),
            url: "https://example.com".to_string(),
            image_url: None,
            source_name: "Science Daily".to_string(),
            published_date: None,
            time_ago: Some("2 hours ago".to_string()),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines_fallbacks() {
        let lines = card_lines(&article(None), 3, true, 80);
        assert_eq!(line_text(&lines[0]), "▸ 3. Fusion milestone");
        assert_eq!(line_text(&lines[1]).trim(), NO_DESCRIPTION);
        assert_eq!(
            line_text(lines.last().unwrap()).trim(),
            "Science Daily │ Unknown date │ 2 hours ago"
        );
    }

    #[test]
    fn test_long_description_is_clipped() {
        let long = "word ".repeat(100);
        let lines = card_lines(&article(Some(&long)), 1, false, 40);
        // title + clipped description + meta
        assert_eq!(lines.len(), 1 + DESCRIPTION_LINES + 1);
        assert!(line_text(&lines[DESCRIPTION_LINES]).ends_with('…'));
    }
}
