//! Markup rendering for the portal

pub mod html;
pub mod view;

pub use html::{Html, HtmlWriter, Template};
pub use view::HtmlView;
