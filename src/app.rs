//! View-state model for the news portal

use crate::config::{SortBy, DEFAULT_MAX_CARDS};
use crate::{Article, Category};

/// Section header shown above populated results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

impl Header {
    pub fn for_category(category: Category) -> Self {
        Self {
            title: format!("{} News", category.display_name()),
            subtitle: format!("Latest {} news and updates", category.as_str()),
        }
    }

    pub fn for_search(query: &str) -> Self {
        Self {
            title: "Search Results".to_string(),
            subtitle: format!("Results for \"{}\"", query),
        }
    }
}

/// The mutually exclusive rendering mode of the results region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Waiting for a response
    Loading,
    /// At least one article to show
    Populated {
        articles: Vec<Article>,
        header: Header,
    },
    /// Well-formed request with nothing to show
    Empty { label: String },
    /// Validation or transport failure, user-facing wording only
    Error { message: String },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            ViewState::Populated { articles, .. } => articles,
            _ => &[],
        }
    }

    pub fn header(&self) -> Option<&Header> {
        match self {
            ViewState::Populated { header, .. } => Some(header),
            _ => None,
        }
    }
}

/// Which input produced the current results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub active_category: Option<Category>,
    pub last_query: Option<String>,
}

impl SelectionContext {
    pub fn header(&self) -> Option<Header> {
        match (&self.last_query, self.active_category) {
            (Some(query), _) => Some(Header::for_search(query)),
            (None, Some(category)) => Some(Header::for_category(category)),
            (None, None) => None,
        }
    }

    /// Text naming the origin of an empty result
    pub fn label(&self) -> String {
        match (&self.last_query, self.active_category) {
            (Some(query), _) => query.clone(),
            (None, Some(category)) => category.as_str().to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct App {
    /// Current view state
    pub state: ViewState,
    /// Input that produced the current state
    pub selection: SelectionContext,
    /// The one highlighted category pill, if any
    pub active_pill: Option<Category>,
    /// Category loaded by `Init`
    pub default_category: Category,
    /// Upper bound on rendered cards
    pub max_cards: usize,
    /// Sort order for search requests
    pub sort_by: SortBy,
    /// Sequence of the only response that will still be accepted
    pub pending: Option<u64>,
    /// Set once the default load has been issued
    pub initialized: bool,
    last_seq: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            selection: SelectionContext::default(),
            active_pill: None,
            default_category: Category::Technology,
            max_cards: DEFAULT_MAX_CARDS,
            sort_by: SortBy::default(),
            pending: None,
            initialized: false,
            last_seq: 0,
        }
    }

    pub fn with_config(config: &crate::config::Config) -> Self {
        Self {
            default_category: config.default_category,
            max_cards: config.max_cards,
            sort_by: config.sort_by,
            ..Self::new()
        }
    }

    /// Allocate a sequence number and make it the only one accepted
    pub fn begin_request(&mut self) -> u64 {
        self.last_seq += 1;
        self.pending = Some(self.last_seq);
        self.state = ViewState::Loading;
        self.last_seq
    }

    /// Consume the pending slot if `seq` is the latest request
    pub fn accept_response(&mut self, seq: u64) -> bool {
        if self.pending == Some(seq) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget any in-flight request; its response will be discarded
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn set_populated(&mut self, mut articles: Vec<Article>) {
        articles.truncate(self.max_cards);
        let header = self
            .selection
            .header()
            .unwrap_or_else(|| Header::for_category(self.default_category));
        self.state = ViewState::Populated { articles, header };
    }

    pub fn set_empty(&mut self) {
        self.state = ViewState::Empty {
            label: self.selection.label(),
        };
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = ViewState::Error {
            message: message.into(),
        };
    }
}
