pub mod app;
pub mod config;
pub mod controller;
pub mod event;
pub mod news_client;
pub mod render;
pub mod runner;
pub mod time_utils;
pub mod ui;
pub mod update;

use std::fmt;
use std::str::FromStr;

pub use app::{App, Header, SelectionContext, ViewState};
pub use controller::{NewsPortal, ViewBinding};
pub use news_client::{FetchError, NewsClient, NewsClientConfig, NewsClientImpl, NewsPayload};
pub use update::{update, Effect, FetchContext, FetchRequest, Msg, NewsRequest};

/// A news article as received from the API, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub source_name: String,
    pub published_date: Option<String>,
    pub time_ago: Option<String>,
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let date = self.published_date.as_deref().unwrap_or("Unknown date");
        writeln!(f, "{} ({})", self.title, self.source_name)?;
        if let Some(description) = &self.description {
            writeln!(f, "{}", description)?;
        }
        write!(f, "[{}] -> {}", date, self.url)
    }
}

/// Topical tag used by the backend to filter headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    General,
    Business,
    Technology,
    Health,
    Science,
    Sports,
    Entertainment,
}

impl Category {
    /// All categories, in pill order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[test]
fn test_category_round_trips_through_id() {
    for category in Category::ALL {
        assert_eq!(category.as_str().parse::<Category>(), Ok(category));
    }
    assert_eq!(
        "weather".parse::<Category>(),
        Err(UnknownCategory("weather".to_string()))
    );
    assert!("Technology".parse::<Category>().is_err());
}

#[test]
fn test_display() {
    let article = Article {
        title: "Rust 2.0 announced".to_string(),
        description: Some("Not really.".to_string()),
        url: "https://rust-lang.org".to_string(),
        image_url: None,
        source_name: "The Register".to_string(),
        published_date: None,
        time_ago: None,
    };
    assert_eq!(
        article.to_string(),
        "Rust 2.0 announced (The Register)\nNot really.\n[Unknown date] -> https://rust-lang.org"
    );
}
