//! Main event loop for the terminal portal.
//!
//! Key presses are turned into controller messages. Fetches run as tokio
//! tasks and report back over a channel, so a slow response can arrive after
//! a newer one; the sequence guard in `update` drops it.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::App;
use crate::controller::{perform_fetch, NewsPortal};
use crate::event::{handle_browse_key, handle_search_key, BrowseAction, Event, EventHandler, SearchAction};
use crate::news_client::NewsClient;
use crate::ui::{self, TerminalView};
use crate::update::{FetchRequest, Msg};

/// Run the portal until the user quits, restoring the terminal afterwards.
pub async fn run<C>(portal: &mut NewsPortal<C, TerminalView>) -> Result<()>
where
    C: NewsClient + ?Sized + 'static,
{
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, portal).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    portal: &mut NewsPortal<C, TerminalView>,
) -> Result<()>
where
    C: NewsClient + ?Sized + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Msg>();
    let events = EventHandler::default();
    let mut tick: usize = 0;

    if let Some(fetch) = portal.dispatch(Msg::Init) {
        spawn_fetch(portal.client(), fetch, &tx);
    }

    loop {
        terminal.draw(|f| ui::render(f, portal.view_mut(), tick))?;

        match tokio::task::block_in_place(|| events.next())? {
            Event::Key(key) => {
                let app = portal.app().clone();
                if let Some(msg) = handle_key(portal.view_mut(), &app, key) {
                    if let Some(fetch) = portal.dispatch(msg) {
                        spawn_fetch(portal.client(), fetch, &tx);
                    }
                }
            }
            Event::Tick => tick = tick.wrapping_add(1),
        }

        while let Ok(msg) = rx.try_recv() {
            portal.dispatch(msg);
        }

        if portal.view().should_quit {
            tracing::info!("quitting");
            return Ok(());
        }
    }
}

fn spawn_fetch<C>(client: Arc<C>, fetch: FetchRequest, tx: &mpsc::UnboundedSender<Msg>)
where
    C: NewsClient + ?Sized + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let seq = fetch.seq;
        let msg = perform_fetch(client.as_ref(), fetch).await;
        if tx.send(msg).is_err() {
            tracing::warn!(seq, "portal closed before response arrived");
        }
    });
}

/// Apply a key press to the view and return the message it triggers, if any
pub fn handle_key(view: &mut TerminalView, app: &App, key: KeyCode) -> Option<Msg> {
    if view.search.focused {
        return match handle_search_key(key) {
            SearchAction::Insert(c) => {
                view.search.push(c);
                None
            }
            SearchAction::Backspace => {
                view.search.pop();
                None
            }
            SearchAction::Submit => {
                view.search.blur();
                Some(Msg::SearchSubmitted(view.search.query.clone()))
            }
            SearchAction::Cancel => {
                view.search.blur();
                None
            }
            SearchAction::None => None,
        };
    }

    if view.show_help {
        // Any key closes the overlay
        view.show_help = false;
        return None;
    }

    match handle_browse_key(key) {
        BrowseAction::NextCard => view.next_card(),
        BrowseAction::PrevCard => view.prev_card(),
        BrowseAction::SelectCategory(category) => return Some(Msg::CategorySelected(category)),
        BrowseAction::FocusSearch => view.search.focus(),
        BrowseAction::OpenUrl => {
            if let Some(article) = view.selected_article() {
                if let Err(e) = open::that(&article.url) {
                    tracing::warn!(error = %e, url = %article.url, "could not open article");
                }
            }
        }
        BrowseAction::Refresh => return Some(repeat_last_action(app)),
        BrowseAction::ToggleHelp => view.toggle_help(),
        BrowseAction::Quit => view.should_quit = true,
        BrowseAction::None => {}
    }
    None
}

fn repeat_last_action(app: &App) -> Msg {
    match (&app.selection.last_query, app.selection.active_category) {
        (Some(query), _) => Msg::SearchSubmitted(query.clone()),
        (None, Some(category)) => Msg::CategorySelected(category),
        (None, None) => Msg::CategorySelected(app.default_category),
    }
}
