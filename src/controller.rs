//! View controller: runs the state machine and executes its effects

use std::sync::Arc;

use crate::app::{App, ViewState};
use crate::news_client::{FetchError, NewsClient, NewsPayload};
use crate::update::{update, Effect, FetchRequest, Msg};
use crate::Category;

/// Handles to the view regions the controller writes.
///
/// Injected at construction; the controller never looks anything up by name.
pub trait ViewBinding {
    /// Replace the results region (grid, header, loading indicator) in one step
    fn render_state(&mut self, state: &ViewState);
    /// Highlight `category` and clear every other pill
    fn activate_pill(&mut self, category: Category);
}

pub struct NewsPortal<C: ?Sized, V> {
    client: Arc<C>,
    view: V,
    app: App,
}

impl<C, V> NewsPortal<C, V>
where
    C: NewsClient + ?Sized,
    V: ViewBinding,
{
    pub fn new(client: Arc<C>, view: V, app: App) -> Self {
        Self { client, view, app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    /// Bind startup: issue the default category load, once
    pub async fn initialize(&mut self) {
        self.run(Msg::Init).await;
    }

    pub async fn submit_search(&mut self, raw_query: &str) {
        self.run(Msg::SearchSubmitted(raw_query.to_string())).await;
    }

    pub async fn select_category(&mut self, category: Category) {
        self.run(Msg::CategorySelected(category)).await;
    }

    pub fn on_response_success(&mut self, seq: u64, payload: NewsPayload) {
        self.dispatch(Msg::ResponseSucceeded { seq, payload });
    }

    pub fn on_response_failure(&mut self, seq: u64, error: FetchError) {
        self.dispatch(Msg::ResponseFailed { seq, error });
    }

    /// Apply a message and execute its view effects.
    ///
    /// Returns the fetch the caller must perform, if any; its outcome goes
    /// back in through [`perform_fetch`] and another `dispatch`.
    pub fn dispatch(&mut self, msg: Msg) -> Option<FetchRequest> {
        let mut fetch = None;
        for effect in update(&mut self.app, msg) {
            match effect {
                Effect::Render => self.view.render_state(&self.app.state),
                Effect::ActivatePill(category) => self.view.activate_pill(category),
                Effect::Fetch(request) => {
                    tracing::info!(
                        seq = request.seq,
                        context = ?request.request.context(),
                        request = ?request.request,
                        "issuing news request"
                    );
                    fetch = Some(request);
                }
                Effect::ReportError { context, detail } => {
                    tracing::error!(?context, error = %detail, "news request failed");
                }
                Effect::DiscardStale { seq } => {
                    tracing::debug!(seq, pending = ?self.app.pending, "discarding stale response");
                }
            }
        }
        fetch
    }

    async fn run(&mut self, msg: Msg) {
        if let Some(fetch) = self.dispatch(msg) {
            let response = perform_fetch(self.client.as_ref(), fetch).await;
            self.dispatch(response);
        }
    }
}

/// Execute a fetch and turn its outcome into the message that reports it
pub async fn perform_fetch<C: NewsClient + ?Sized>(client: &C, fetch: FetchRequest) -> Msg {
    match client.fetch(&fetch.request).await {
        Ok(payload) => Msg::ResponseSucceeded {
            seq: fetch.seq,
            payload,
        },
        Err(error) => Msg::ResponseFailed {
            seq: fetch.seq,
            error,
        },
    }
}
