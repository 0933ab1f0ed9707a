//! In-memory HTML view binding

use crate::app::{Header, ViewState};
use crate::controller::ViewBinding;
use crate::render::html::{Grid, Html, Page};
use crate::Category;

/// The portal's view regions held as markup.
///
/// Each `render_state` swaps the whole grid at once, so a partially
/// rendered state is never observable.
#[derive(Debug, Clone)]
pub struct HtmlView {
    state: ViewState,
    grid: String,
    header: Option<Header>,
    loading_visible: bool,
    active_pill: Option<Category>,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            grid: String::new(),
            header: None,
            loading_visible: true,
            active_pill: None,
        }
    }
}

impl ViewBinding for HtmlView {
    fn render_state(&mut self, state: &ViewState) {
        self.grid = Html(Grid(state)).to_markup();
        self.header = state.header().cloned();
        self.loading_visible = state.is_loading();
        self.state = state.clone();
    }

    fn activate_pill(&mut self, category: Category) {
        self.active_pill = Some(category);
    }
}

impl HtmlView {
    pub fn grid(&self) -> &str {
        &self.grid
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn active_pill(&self) -> Option<Category> {
        self.active_pill
    }

    pub fn card_count(&self) -> usize {
        self.grid.matches(r#"class="news-card "#).count()
    }

    /// Full standalone document for the current state
    pub fn page(&self) -> String {
        Html(Page {
            state: &self.state,
            active: self.active_pill,
        })
        .to_markup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Article;

    fn populated(count: usize) -> ViewState {
        ViewState::Populated {
            articles: (0..count)
                .map(|n| Article {
                    title: format!("Story {}", n),
                    description: None,
                    url: "https://example.com".to_string(),
                    image_url: None,
                    source_name: "Wire".to_string(),
                    published_date: None,
                    time_ago: None,
                })
                .collect(),
            header: Header::for_category(Category::Science),
        }
    }

    #[test]
    fn test_render_replaces_previous_state() {
        let mut view = HtmlView::default();
        view.render_state(&populated(4));
        assert_eq!(view.card_count(), 4);
        assert!(view.header().is_some());

        view.render_state(&ViewState::Loading);
        assert_eq!(view.card_count(), 0);
        assert_eq!(view.grid(), "");
        assert!(view.header().is_none());
        assert!(view.is_loading_visible());

        view.render_state(&ViewState::Error {
            message: "Failed".to_string(),
        });
        assert!(!view.is_loading_visible());
        assert!(view.grid().contains("error-state"));
    }

    #[test]
    fn test_activate_pill_is_exclusive() {
        let mut view = HtmlView::default();
        view.activate_pill(Category::Sports);
        view.activate_pill(Category::Business);
        assert_eq!(view.active_pill(), Some(Category::Business));
        assert_eq!(view.page().matches("category-pill active").count(), 1);
    }

    #[test]
    fn test_page_contains_grid() {
        let mut view = HtmlView::default();
        view.render_state(&populated(2));
        let page = view.page();
        assert_eq!(page.matches(r#"class="news-card "#).count(), 2);
        assert!(!page.contains(r#"id="loading""#));
    }
}
