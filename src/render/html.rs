//! HTML templates for the portal.
//!
//! Templates write through [`HtmlWriter`], which only accepts `&'static str`
//! as raw markup. Everything else goes through an escaping method, so data
//! from the API can never be interpreted as markup.

use std::fmt::{self, Write};

use writeable::Writeable;

use crate::app::{Header, ViewState};
use crate::{Article, Category};

/// Stagger between consecutive card reveal animations
pub const REVEAL_STEP_MS: usize = 100;

pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Escaping sink for templates
pub struct HtmlWriter<'w, W: Write + ?Sized> {
    sink: &'w mut W,
}

impl<'w, W: Write + ?Sized> HtmlWriter<'w, W> {
    pub fn new(sink: &'w mut W) -> Self {
        Self { sink }
    }

    /// Trusted markup; must be a literal
    pub fn raw(&mut self, markup: &'static str) -> fmt::Result {
        self.sink.write_str(markup)
    }

    pub fn text(&mut self, text: &str) -> fmt::Result {
        self.sink.write_str(&html_escape::encode_text(text))
    }

    /// Value for a double-quoted attribute
    pub fn attr(&mut self, value: &str) -> fmt::Result {
        self.sink
            .write_str(&html_escape::encode_double_quoted_attribute(value))
    }

    /// Link target; anything but http(s) collapses to `#`
    pub fn url_attr(&mut self, url: &str) -> fmt::Result {
        if is_web_url(url) {
            self.attr(url)
        } else {
            self.raw("#")
        }
    }

    pub fn number(&mut self, n: usize) -> fmt::Result {
        self.sink.write_str(&n.to_string())
    }

    pub fn template(&mut self, template: &impl Template) -> fmt::Result {
        template.render(self)
    }
}

pub fn is_web_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub trait Template {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result;
}

/// Adapts a [`Template`] to [`Writeable`]
pub struct Html<T>(pub T);

impl<T: Template> Writeable for Html<T> {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        self.0.render(&mut HtmlWriter::new(sink))
    }
}

impl<T: Template> Html<T> {
    pub fn to_markup(&self) -> String {
        self.write_to_string().into_owned()
    }
}

/// One article card
pub struct Card<'a> {
    pub article: &'a Article,
    pub index: usize,
}

impl Template for Card<'_> {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result {
        let article = self.article;
        out.raw(r#"<div class="news-card fade-in-up" style="animation-delay: "#)?;
        out.number(self.index * REVEAL_STEP_MS)?;
        out.raw(r#"ms">"#)?;

        match article.image_url.as_deref().filter(|u| is_web_url(u)) {
            Some(image) => {
                out.raw(r#"<img src=""#)?;
                out.attr(image)?;
                out.raw(r#"" alt="News Image" class="card-image" onerror="this.style.display='none'; this.nextElementSibling.style.paddingTop='1.5rem';">"#)?;
                out.raw(r#"<div class="card-content">"#)?;
            }
            None => out.raw(r#"<div class="card-content" style="padding-top: 1.5rem">"#)?,
        }

        out.raw(r#"<h3 class="card-title">"#)?;
        out.text(&article.title)?;
        out.raw(r#"</h3><p class="card-description">"#)?;
        out.text(article.description.as_deref().unwrap_or(NO_DESCRIPTION))?;
        out.raw(r#"</p><a href=""#)?;
        out.url_attr(&article.url)?;
        out.raw(r#"" target="_blank" rel="noopener noreferrer" class="read-more">Read Full Article <i class="fas fa-arrow-right"></i></a>"#)?;
        out.raw(r#"<div class="card-meta"><span class="card-source">"#)?;
        out.text(&article.source_name)?;
        out.raw(r#"</span><span class="card-date"><i class="far fa-calendar"></i> "#)?;
        out.text(article.published_date.as_deref().unwrap_or(UNKNOWN_DATE))?;
        out.raw("</span></div></div></div>")
    }
}

/// Contents of the results grid for a view state
pub struct Grid<'a>(pub &'a ViewState);

impl Template for Grid<'_> {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result {
        match self.0 {
            ViewState::Loading => Ok(()),
            ViewState::Populated { articles, .. } => {
                for (index, article) in articles.iter().enumerate() {
                    out.template(&Card { article, index })?;
                }
                Ok(())
            }
            ViewState::Empty { label } => {
                out.raw(r#"<div class="empty-state fade-in-up"><div class="empty-icon"><i class="far fa-newspaper"></i></div><h3 class="empty-title">No Results Found</h3><p class="empty-message">No news articles found for &quot;"#)?;
                out.text(label)?;
                out.raw("&quot;. Try different keywords or browse by category.</p></div>")
            }
            ViewState::Error { message } => {
                out.raw(r#"<div class="error-state fade-in-up"><div class="error-icon"><i class="fas fa-exclamation-triangle"></i></div><h3 class="error-title">Something went wrong</h3><p class="error-message">"#)?;
                out.text(message)?;
                out.raw("</p></div>")
            }
        }
    }
}

/// Section header; hidden when there is nothing to title
pub struct SectionHeader<'a>(pub Option<&'a Header>);

impl Template for SectionHeader<'_> {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result {
        match self.0 {
            Some(header) => {
                out.raw(r#"<div id="sectionHeader" class="section-header"><h2 id="sectionTitle">"#)?;
                out.text(&header.title)?;
                out.raw(r#"</h2><p id="sectionSubtitle">"#)?;
                out.text(&header.subtitle)?;
                out.raw("</p></div>")
            }
            None => out.raw(r#"<div id="sectionHeader" class="section-header" style="display: none"></div>"#),
        }
    }
}

pub struct Pills {
    pub active: Option<Category>,
}

impl Template for Pills {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result {
        out.raw(r#"<div id="categoryList" class="category-list">"#)?;
        for category in Category::ALL {
            if self.active == Some(category) {
                out.raw(r#"<button class="category-pill active" data-category=""#)?;
            } else {
                out.raw(r#"<button class="category-pill" data-category=""#)?;
            }
            out.attr(category.as_str())?;
            out.raw(r#"">"#)?;
            out.text(category.display_name())?;
            out.raw("</button>")?;
        }
        out.raw("</div>")
    }
}

/// Standalone document: pills, header, loading indicator and grid
pub struct Page<'a> {
    pub state: &'a ViewState,
    pub active: Option<Category>,
}

impl Template for Page<'_> {
    fn render<W: Write + ?Sized>(&self, out: &mut HtmlWriter<'_, W>) -> fmt::Result {
        out.raw(concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"UTF-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
            "<title>NewsHub</title>\n",
            "<style>",
            ".news-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(300px,1fr));gap:1.5rem}",
            ".news-card{border:1px solid #ddd;border-radius:8px;overflow:hidden}",
            ".card-image{width:100%;height:180px;object-fit:cover}",
            ".card-content{padding:0 1rem 1rem}",
            ".category-pill.active{font-weight:bold}",
            "</style>\n</head>\n<body>\n<main>\n",
        ))?;
        out.template(&Pills {
            active: self.active,
        })?;
        out.raw("\n")?;
        out.template(&SectionHeader(self.state.header()))?;
        if self.state.is_loading() {
            out.raw("\n<div id=\"loading\" class=\"loading\">Loading news...</div>")?;
        }
        out.raw("\n<div id=\"newsGrid\" class=\"news-grid\">")?;
        out.template(&Grid(self.state))?;
        out.raw("</div>\n</main>\n</body>\n</html>\n")
    }
}
