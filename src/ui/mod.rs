//! Terminal rendering of the portal

pub mod grid;
pub mod widgets;

use std::time::{Duration, Instant};

use ratatui::Frame;

use crate::app::ViewState;
use crate::controller::ViewBinding;
use crate::{Article, Category};

// Delay before showing loading indicators to avoid flicker
const LOADING_INDICATOR_DELAY_MS: u64 = 150;

/// Contents of the search box
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub query: String,
    pub focused: bool,
}

impl SearchBox {
    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }
}

/// View regions for the terminal frontend
#[derive(Debug, Clone)]
pub struct TerminalView {
    pub state: ViewState,
    pub active_pill: Option<Category>,
    pub search: SearchBox,
    /// Highlighted card
    pub selected_index: usize,
    /// First visible card
    pub scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// When the current loading state started (for debouncing spinners)
    pub loading_since: Option<Instant>,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewBinding for TerminalView {
    fn render_state(&mut self, state: &ViewState) {
        self.state = state.clone();
        self.selected_index = 0;
        self.scroll = 0;
        self.loading_since = state.is_loading().then(Instant::now);
    }

    fn activate_pill(&mut self, category: Category) {
        self.active_pill = Some(category);
    }
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            active_pill: None,
            search: SearchBox::default(),
            selected_index: 0,
            scroll: 0,
            show_help: false,
            should_quit: false,
            loading_since: Some(Instant::now()),
        }
    }

    /// Move to next card
    pub fn next_card(&mut self) {
        let count = self.state.articles().len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    /// Move to previous card
    pub fn prev_card(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.state.articles().get(self.selected_index)
    }

    /// Keep the selected card inside a viewport of `visible_cards`
    pub fn update_scroll(&mut self, visible_cards: usize) {
        let visible_cards = visible_cards.max(1);
        if self.selected_index < self.scroll {
            self.scroll = self.selected_index;
        } else if self.selected_index >= self.scroll + visible_cards {
            self.scroll = self.selected_index + 1 - visible_cards;
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Whether loading indicator should be visible (debounced)
    pub fn should_show_loading(&self) -> bool {
        if !self.state.is_loading() {
            return false;
        }

        match self.loading_since {
            Some(started) => started.elapsed() >= Duration::from_millis(LOADING_INDICATOR_DELAY_MS),
            None => true,
        }
    }
}

/// Render the application UI
pub fn render(f: &mut Frame, view: &mut TerminalView, tick: usize) {
    grid::render(f, view, tick);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Header;

    fn populated(count: usize) -> ViewState {
        ViewState::Populated {
            articles: (0..count)
                .map(|n| Article {
                    title: format!("Story {}", n),
                    description: None,
                    url: format!("https://example.com/{}", n),
                    image_url: None,
                    source_name: "Wire".to_string(),
                    published_date: None,
                    time_ago: None,
                })
                .collect(),
            header: Header::for_category(Category::General),
        }
    }

    #[test]
    fn test_card_navigation() {
        let mut view = TerminalView::new();
        view.render_state(&populated(2));

        assert_eq!(view.selected_index, 0);
        view.next_card();
        assert_eq!(view.selected_index, 1);
        view.next_card(); // Should not go beyond bounds
        assert_eq!(view.selected_index, 1);
        view.prev_card();
        view.prev_card();
        assert_eq!(view.selected_index, 0);
        assert_eq!(view.selected_article().unwrap().title, "Story 0");
    }

    #[test]
    fn test_render_resets_selection() {
        let mut view = TerminalView::new();
        view.render_state(&populated(5));
        view.next_card();
        view.next_card();
        view.update_scroll(1);
        assert_eq!(view.scroll, 2);

        view.render_state(&ViewState::Loading);
        assert_eq!(view.selected_index, 0);
        assert_eq!(view.scroll, 0);
        assert!(view.selected_article().is_none());
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut view = TerminalView::new();
        view.render_state(&populated(10));
        for _ in 0..6 {
            view.next_card();
        }
        view.update_scroll(3);
        assert_eq!(view.scroll, 4);

        view.selected_index = 1;
        view.update_scroll(3);
        assert_eq!(view.scroll, 1);
    }

    #[test]
    fn test_loading_indicator_is_debounced() {
        let mut view = TerminalView::new();
        view.render_state(&ViewState::Loading);
        assert!(!view.should_show_loading());

        view.loading_since = Some(Instant::now() - Duration::from_millis(500));
        assert!(view.should_show_loading());

        view.render_state(&populated(1));
        assert!(!view.should_show_loading());
    }

    #[test]
    fn test_search_box_editing() {
        let mut search = SearchBox::default();
        search.focus();
        for c in "rusty".chars() {
            search.push(c);
        }
        search.pop();
        assert_eq!(search.query, "rust");
        search.blur();
        assert!(!search.focused);
    }
}
