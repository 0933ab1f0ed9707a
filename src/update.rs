//! Pure transition function for the portal.
//!
//! `update()` takes the model and a message, mutates the model, and returns
//! the effects the controller must execute. No I/O happens here.

use thiserror::Error;

use crate::app::App;
use crate::config::SortBy;
use crate::news_client::{FetchError, NewsPayload};
use crate::Category;

/// Minimum trimmed query length, in characters
pub const MIN_QUERY_CHARS: usize = 2;

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load news. Please check your connection and try again.";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search news. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a search term")]
    Empty,
    #[error("Search query must be at least 2 characters")]
    TooShort,
}

/// Trim a raw search box value and check it is worth sending.
pub fn validate_query(raw: &str) -> Result<&str, ValidationError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(ValidationError::Empty);
    }
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ValidationError::TooShort);
    }
    Ok(query)
}

/// What to ask the backend for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsRequest {
    Category(Category),
    Search { query: String, sort_by: SortBy },
}

impl NewsRequest {
    pub fn context(&self) -> FetchContext {
        match self {
            NewsRequest::Category(_) => FetchContext::Load,
            NewsRequest::Search { .. } => FetchContext::Search,
        }
    }
}

/// Selects the user-facing failure wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchContext {
    Load,
    Search,
}

impl FetchContext {
    pub fn failure_message(&self) -> &'static str {
        match self {
            FetchContext::Load => LOAD_FAILED_MESSAGE,
            FetchContext::Search => SEARCH_FAILED_MESSAGE,
        }
    }
}

/// A fetch tagged with the sequence its response must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub request: NewsRequest,
}

#[derive(Debug)]
pub enum Msg {
    /// Page startup
    Init,
    /// Search box submitted with its raw contents
    SearchSubmitted(String),
    /// A category pill was clicked
    CategorySelected(Category),
    ResponseSucceeded { seq: u64, payload: NewsPayload },
    ResponseFailed { seq: u64, error: FetchError },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Replace the results region with `App::state`
    Render,
    /// Highlight exactly this pill
    ActivatePill(Category),
    Fetch(FetchRequest),
    /// Diagnostic detail for a failed fetch, never shown to the user
    ReportError { context: FetchContext, detail: String },
    /// A response arrived for a request that is no longer current
    DiscardStale { seq: u64 },
}

pub fn update(app: &mut App, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Init => {
            if app.initialized {
                return Vec::new();
            }
            app.initialized = true;
            let category = app.default_category;
            select_category(app, category)
        }

        Msg::CategorySelected(category) => select_category(app, category),

        Msg::SearchSubmitted(raw) => match validate_query(&raw) {
            Ok(query) => {
                let query = query.to_string();
                app.selection.active_category = None;
                app.selection.last_query = Some(query.clone());
                let seq = app.begin_request();
                vec![
                    Effect::Render,
                    Effect::Fetch(FetchRequest {
                        seq,
                        request: NewsRequest::Search {
                            query,
                            sort_by: app.sort_by,
                        },
                    }),
                ]
            }
            Err(invalid) => {
                app.cancel_pending();
                app.set_error(invalid.to_string());
                vec![Effect::Render]
            }
        },

        Msg::ResponseSucceeded { seq, payload } => {
            if !app.accept_response(seq) {
                return vec![Effect::DiscardStale { seq }];
            }
            if payload.success && !payload.articles.is_empty() {
                app.set_populated(payload.articles);
            } else {
                app.set_empty();
            }
            vec![Effect::Render]
        }

        Msg::ResponseFailed { seq, error } => {
            if !app.accept_response(seq) {
                return vec![Effect::DiscardStale { seq }];
            }
            let context = if app.selection.last_query.is_some() {
                FetchContext::Search
            } else {
                FetchContext::Load
            };
            app.set_error(context.failure_message());
            vec![
                Effect::ReportError {
                    context,
                    detail: error.to_string(),
                },
                Effect::Render,
            ]
        }
    }
}

fn select_category(app: &mut App, category: Category) -> Vec<Effect> {
    app.active_pill = Some(category);
    app.selection.active_category = Some(category);
    app.selection.last_query = None;
    let seq = app.begin_request();
    vec![
        Effect::ActivatePill(category),
        Effect::Render,
        Effect::Fetch(FetchRequest {
            seq,
            request: NewsRequest::Category(category),
        }),
    ]
}
