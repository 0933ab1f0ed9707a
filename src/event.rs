//! Event handling for keyboard input

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use std::time::Duration;

use crate::Category;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed
    Key(KeyCode),
    /// Tick event for animations/updates
    Tick,
}

/// Event handler
pub struct EventHandler {
    /// Tick rate for animations
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event, yielding a tick when nothing arrives in time
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                // Only handle key press events (ignore release)
                if key.kind == KeyEventKind::Press {
                    return Ok(Event::Key(key.code));
                }
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events while browsing cards
pub fn handle_browse_key(key: KeyCode) -> BrowseAction {
    match key {
        // Navigation
        KeyCode::Char('j') | KeyCode::Down => BrowseAction::NextCard,
        KeyCode::Char('k') | KeyCode::Up => BrowseAction::PrevCard,

        // Categories, in pill order
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            BrowseAction::SelectCategory(Category::ALL[index])
        }

        // Actions
        KeyCode::Char('/') | KeyCode::Char('s') => BrowseAction::FocusSearch,
        KeyCode::Enter | KeyCode::Char('o') => BrowseAction::OpenUrl,
        KeyCode::Char('r') => BrowseAction::Refresh,

        // UI
        KeyCode::Char('?') => BrowseAction::ToggleHelp,
        KeyCode::Char('q') | KeyCode::Esc => BrowseAction::Quit,

        _ => BrowseAction::None,
    }
}

/// Handle key events while the search box has focus
pub fn handle_search_key(key: KeyCode) -> SearchAction {
    match key {
        KeyCode::Enter => SearchAction::Submit,
        KeyCode::Esc => SearchAction::Cancel,
        KeyCode::Backspace => SearchAction::Backspace,
        KeyCode::Char(c) => SearchAction::Insert(c),
        _ => SearchAction::None,
    }
}

/// Actions available while browsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    NextCard,
    PrevCard,
    SelectCategory(Category),
    FocusSearch,
    OpenUrl,
    Refresh,
    ToggleHelp,
    Quit,
    None,
}

/// Actions available in the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_key_mapping() {
        assert_eq!(handle_browse_key(KeyCode::Char('j')), BrowseAction::NextCard);
        assert_eq!(handle_browse_key(KeyCode::Up), BrowseAction::PrevCard);
        assert_eq!(handle_browse_key(KeyCode::Char('/')), BrowseAction::FocusSearch);
        assert_eq!(handle_browse_key(KeyCode::Char('q')), BrowseAction::Quit);
        assert_eq!(handle_browse_key(KeyCode::Char('x')), BrowseAction::None);
    }

    #[test]
    fn test_number_keys_follow_pill_order() {
        assert_eq!(
            handle_browse_key(KeyCode::Char('1')),
            BrowseAction::SelectCategory(Category::General)
        );
        assert_eq!(
            handle_browse_key(KeyCode::Char('3')),
            BrowseAction::SelectCategory(Category::Technology)
        );
        assert_eq!(
            handle_browse_key(KeyCode::Char('7')),
            BrowseAction::SelectCategory(Category::Entertainment)
        );
        assert_eq!(handle_browse_key(KeyCode::Char('8')), BrowseAction::None);
    }

    #[test]
    fn test_search_key_mapping() {
        // Letters are text, not commands, while typing
        assert_eq!(handle_search_key(KeyCode::Char('q')), SearchAction::Insert('q'));
        assert_eq!(handle_search_key(KeyCode::Enter), SearchAction::Submit);
        assert_eq!(handle_search_key(KeyCode::Esc), SearchAction::Cancel);
        assert_eq!(handle_search_key(KeyCode::Backspace), SearchAction::Backspace);
    }
}
