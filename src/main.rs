extern crate newshub_lib;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use newshub_lib::config::Config;
use newshub_lib::render::HtmlView;
use newshub_lib::ui::TerminalView;
use newshub_lib::{App, Category, NewsClientImpl, NewsPortal, ViewState};

#[derive(Parser, Debug)]
#[clap(
    name = "NewsHub",
    version = "1.0",
    about = "Browse news headlines served by a NewsHub backend"
)]
struct Cli {
    #[clap(short, long)]
    /// Path to the TOML config file. Defaults to ~/.config/newshub/config.toml
    config: Option<PathBuf>,
    #[clap(short, long)]
    /// Backend base URL, overrides the config file
    base_url: Option<String>,
    #[clap(long)]
    /// Category loaded at startup: general, business, technology, health, science, sports or entertainment
    category: Option<String>,
    #[clap(long)]
    /// Write logs to this file
    log_file: Option<PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch once and write the rendered result
    Export {
        #[clap(short, long, conflicts_with = "category")]
        /// Search for this query instead of loading a category
        query: Option<String>,
        #[clap(long)]
        /// Category to load, defaults to the startup category
        category: Option<String>,
        #[clap(short, long)]
        /// Output file, stdout when omitted
        output: Option<PathBuf>,
        #[clap(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Standalone HTML page
    Html,
    /// Plain text listing
    Text,
}

fn validate_args(args: &Cli) -> Result<()> {
    let categories = [
        args.category.as_deref(),
        match &args.command {
            Some(Command::Export { category, .. }) => category.as_deref(),
            None => None,
        },
    ];
    for category in categories.into_iter().flatten() {
        category
            .parse::<Category>()
            .with_context(|| format!("Invalid category: {}", category))?;
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("newshub").join("config.toml"))
}

fn load_config(args: &Cli) -> Result<Config> {
    let mut config = match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Could not load config from `{}`", path.display()))?,
        None => Config::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(category) = &args.category {
        config.default_category = category.parse()?;
    }
    Ok(config)
}

fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Could not create log file `{}`", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Logging to stderr would draw over the terminal UI
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

async fn export(
    config: &Config,
    query: Option<String>,
    category: Option<String>,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let client = Arc::new(NewsClientImpl::with_config(config.client_config()));
    let mut portal = NewsPortal::new(client, HtmlView::default(), App::with_config(config));

    match (query, category) {
        (Some(query), _) => portal.submit_search(&query).await,
        (None, Some(category)) => portal.select_category(category.parse()?).await,
        (None, None) => portal.initialize().await,
    }

    let rendered = match format {
        Format::Html => portal.view().page(),
        Format::Text => text_listing(&portal.app().state),
    };

    match &output {
        Some(path) => std::fs::write(path, &rendered)
            .with_context(|| format!("Could not write `{}`", path.display()))?,
        None => std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("Could not write to stdout")?,
    }

    if let ViewState::Error { message } = &portal.app().state {
        anyhow::bail!("{}", message);
    }
    Ok(())
}

fn text_listing(state: &ViewState) -> String {
    match state {
        ViewState::Populated { articles, header } => {
            let mut out = format!("{}\n{}\n", header.title, header.subtitle);
            for (idx, article) in articles.iter().enumerate() {
                out.push_str(&format!("\n#{} {}\n", idx + 1, article));
            }
            out
        }
        ViewState::Empty { label } => format!("No news articles found for \"{}\".\n", label),
        ViewState::Error { message } => format!("{}\n", message),
        ViewState::Loading => String::new(),
    }
}

async fn run(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Some(Command::Export {
            query,
            category,
            output,
            format,
        }) => export(&config, query, category, output, format).await,
        None => {
            let client = Arc::new(NewsClientImpl::with_config(config.client_config()));
            let mut portal = NewsPortal::new(client, TerminalView::new(), App::with_config(&config));
            newshub_lib::runner::run(&mut portal).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exitcode::USAGE);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exitcode::CONFIG);
        }
    };

    if let Err(e) = init_tracing(args.log_file.as_deref(), args.command.is_none()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exitcode::CANTCREAT);
    }

    match run(args, config).await {
        Ok(_) => std::process::exit(exitcode::OK),
        Err(e) => {
            tracing::error!(error = %e, "newshub failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}
