use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time_utils::{format_published_date, time_ago};
use crate::update::NewsRequest;
use crate::Article;

/// Default backend address (the portal's development server)
const NEWS_API_URL: &str = "http://127.0.0.1:5000/";
/// Shown when the backend sends an article without a source name
pub const UNKNOWN_SOURCE: &str = "Unknown source";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArticle {
    #[serde(default)]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: Option<ApiSource>,
    pub published_at: Option<String>,
    #[serde(rename = "formatted_date")]
    pub formatted_date: Option<String>,
    #[serde(rename = "time_ago")]
    pub time_ago: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
    pub error: Option<String>,
    pub total: Option<usize>,
}

/// Decoded response body, articles already mapped for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsPayload {
    pub success: bool,
    pub articles: Vec<Article>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request to `{url}` failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("`{url}` answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from `{url}`: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[automock]
#[async_trait]
pub trait NewsClient: Send + Sync {
    async fn fetch(&self, request: &NewsRequest) -> Result<NewsPayload, FetchError>;
    fn request_url(&self, request: &NewsRequest) -> Result<Url, FetchError>;
}

/// Configuration for the news API client
#[derive(Debug, Clone)]
pub struct NewsClientConfig {
    /// Backend base URL, must end with a slash
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for NewsClientConfig {
    fn default() -> Self {
        Self {
            api_url: NEWS_API_URL.to_string(),
            timeout: 10,
            user_agent: "newshub".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct NewsClientImpl {
    client: Client,
    config: NewsClientConfig,
}

#[async_trait]
impl NewsClient for NewsClientImpl {
    async fn fetch(&self, request: &NewsRequest) -> Result<NewsPayload, FetchError> {
        let url = self.request_url(request)?;
        tracing::debug!(%url, "fetching news");

        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .json::<ApiResponse>()
            .await
            .map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!(%url, articles = body.articles.len(), total = ?body.total, "news received");
        if !body.success {
            tracing::warn!(%url, error = body.error.as_deref().unwrap_or("none given"), "backend reported failure");
        }

        Ok(payload_from_response(body, Utc::now()))
    }

    fn request_url(&self, request: &NewsRequest) -> Result<Url, FetchError> {
        let base = Url::parse(&self.config.api_url)?;
        let url = match request {
            NewsRequest::Category(category) => {
                base.join(&format!("api/news/category/{}", category.as_str()))?
            }
            NewsRequest::Search { query, sort_by } => {
                let mut url = base.join("api/news/search")?;
                url.query_pairs_mut()
                    .append_pair("q", query)
                    .append_pair("sortBy", sort_by.as_str());
                url
            }
        };
        Ok(url)
    }
}

impl Default for NewsClientImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsClientImpl {
    /// Create a new news client with default configuration
    pub fn new() -> Self {
        Self::with_config(NewsClientConfig::default())
    }

    /// Create a new news client with custom configuration
    pub fn with_config(config: NewsClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not configure HTTP client, using defaults");
                Client::new()
            });

        Self { client, config }
    }
}

fn payload_from_response(body: ApiResponse, now: DateTime<Utc>) -> NewsPayload {
    NewsPayload {
        success: body.success,
        articles: body
            .articles
            .into_iter()
            .map(|article| article_from_api(article, now))
            .collect(),
        error: body.error,
    }
}

fn article_from_api(article: ApiArticle, now: DateTime<Utc>) -> Article {
    let published_at = article
        .published_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let published_date = article.formatted_date.or_else(|| {
        article
            .published_at
            .as_deref()
            .and_then(format_published_date)
    });

    Article {
        title: article.title.unwrap_or_default(),
        description: article.description.filter(|d| !d.trim().is_empty()),
        url: article.url.unwrap_or_default(),
        image_url: article.url_to_image.filter(|u| !u.trim().is_empty()),
        source_name: article
            .source
            .and_then(|source| source.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        published_date,
        time_ago: article
            .time_ago
            .or_else(|| published_at.map(|at| time_ago(at, now))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortBy;
    use crate::Category;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NewsClientImpl {
        NewsClientImpl::with_config(NewsClientConfig {
            api_url: format!("{}/", server.uri()),
            ..NewsClientConfig::default()
        })
    }

    fn article_json(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": "A description",
            "url": "https://example.com/a",
            "urlToImage": "https://example.com/a.png",
            "source": { "id": null, "name": "Example Times" },
            "publishedAt": "2024-03-05T14:30:00Z",
            "formatted_date": "Mar 05, 2024"
        })
    }

    #[test]
    fn test_request_urls() {
        let client = NewsClientImpl::new();
        let url = client
            .request_url(&NewsRequest::Category(Category::Technology))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/news/category/technology");

        let url = client
            .request_url(&NewsRequest::Search {
                query: "rust & c++".to_string(),
                sort_by: SortBy::PublishedAt,
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/news/search?q=rust+%26+c%2B%2B&sortBy=publishedAt"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = NewsClientImpl::with_config(NewsClientConfig {
            api_url: "not a url".to_string(),
            ..NewsClientConfig::default()
        });
        let result = client.request_url(&NewsRequest::Category(Category::General));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/category/technology"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "articles": [article_json("One"), article_json("Two")],
                "total": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&NewsRequest::Category(Category::Technology))
            .await
            .unwrap();

        assert!(payload.success);
        let titles: Vec<_> = payload.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
        assert_eq!(payload.articles[0].source_name, "Example Times");
        assert_eq!(payload.articles[0].published_date.as_deref(), Some("Mar 05, 2024"));
        assert!(payload.articles[0].time_ago.is_some());
    }

    #[tokio::test]
    async fn test_fetch_search_sends_query_and_sort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news/search"))
            .and(query_param("q", "climate change"))
            .and(query_param("sortBy", "publishedAt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "articles": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&NewsRequest::Search {
                query: "climate change".to_string(),
                sort_by: SortBy::PublishedAt,
            })
            .await
            .unwrap();

        assert!(payload.success);
        assert!(payload.articles.is_empty());
    }

    #[tokio::test]
    async fn test_missing_optional_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "articles": [{
                    "title": "Bare",
                    "description": null,
                    "url": "https://example.com/bare",
                    "source": { "name": "Wire" },
                    "publishedAt": "2024-01-02T03:04:05Z"
                }]
            })))
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&NewsRequest::Category(Category::General))
            .await
            .unwrap();

        let article = &payload.articles[0];
        assert_eq!(article.description, None);
        assert_eq!(article.image_url, None);
        // Falls back to formatting publishedAt locally
        assert_eq!(article.published_date.as_deref(), Some("Jan 02, 2024"));
    }

    #[tokio::test]
    async fn test_null_fields_keep_other_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "articles": [
                    article_json("Good"),
                    { "title": null, "url": null, "source": { "name": null } },
                    { "title": "No source", "url": "https://example.com/b" }
                ]
            })))
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&NewsRequest::Category(Category::Business))
            .await
            .unwrap();

        assert_eq!(payload.articles.len(), 3);
        assert_eq!(payload.articles[0].title, "Good");
        assert_eq!(payload.articles[1].title, "");
        assert_eq!(payload.articles[1].url, "");
        assert_eq!(payload.articles[1].source_name, UNKNOWN_SOURCE);
        assert_eq!(payload.articles[2].source_name, UNKNOWN_SOURCE);
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "API key missing"
            })))
            .mount(&server)
            .await;

        let payload = client_for(&server)
            .fetch(&NewsRequest::Category(Category::Entertainment))
            .await
            .unwrap();

        assert!(!payload.success);
        assert!(payload.articles.is_empty());
        assert_eq!(payload.error.as_deref(), Some("API key missing"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "Failed to fetch news from API"
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&NewsRequest::Category(Category::Health))
            .await;
        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch(&NewsRequest::Category(Category::Sports))
            .await;
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = NewsClientImpl::with_config(NewsClientConfig {
            api_url: "http://127.0.0.1:9/".to_string(),
            timeout: 2,
            ..NewsClientConfig::default()
        });
        let result = client.fetch(&NewsRequest::Category(Category::Science)).await;
        assert!(matches!(result, Err(FetchError::Request { .. })));
    }
}
