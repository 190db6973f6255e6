//! mealfinder - browse TheMealDB from the terminal

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use mealfinder::{App, Config, Dispatch, Format, Renderer};

const HELP: &str = "\
Commands:
  #fragment       navigate (e.g. #categories, #meal/52772)
  <n>             follow the n-th link on the current page
  :search <text>  search meals by name
  :menu           list the category menu
  :stats          show response cache statistics
  :help           show this help
  :quit           exit";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recipe API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value_t = Format::Text)]
    format: Format,

    /// Render the first page and exit instead of reading commands
    #[arg(long)]
    once: bool,

    /// Initial fragment, e.g. "#category/Seafood"
    fragment: Option<String>,
}

impl Args {
    /// File, then environment, then flags.
    fn config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => Config::default(),
        };
        let mut config = config.with_env();
        if let Some(base) = &self.api_base {
            config.api_base_url = base.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Navigate(String),
    Follow(usize),
    Search(String),
    Menu,
    Stats,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('#') {
        return Some(Command::Navigate(line.to_owned()));
    }
    if let Ok(n) = line.parse::<usize>() {
        return Some(Command::Follow(n));
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match word {
        ":search" | ":s" => Some(Command::Search(rest.trim().to_owned())),
        ":menu" | ":m" => Some(Command::Menu),
        ":stats" => Some(Command::Stats),
        ":help" | ":h" | "?" => Some(Command::Help),
        ":quit" | ":q" => Some(Command::Quit),
        _ => None,
    }
}

/// Execute commands from `input` until `:quit` or end of input.
///
/// Following a link first waits for the pending page, so scripted input sees
/// the links it expects. Returns the most recent navigation, which may still
/// be in flight.
async fn run<R, W>(
    app: &App,
    renderer: &dyn Renderer,
    mut pending: Option<Dispatch>,
    input: R,
    out: &mut W,
) -> Result<Option<Dispatch>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                eprintln!("unknown command {:?} (:help for a list)", line.trim());
            }
            continue;
        };

        match command {
            Command::Navigate(fragment) => pending = Some(app.navigate(&fragment)),
            Command::Follow(n) => {
                if let Some(dispatch) = pending.take() {
                    let outcome = dispatch.outcome().await;
                    debug!(?outcome, "page settled");
                }
                let links = app.root().state().links();
                match n.checked_sub(1).and_then(|i| links.get(i)) {
                    Some(link) => pending = Some(app.navigate(&link.fragment())),
                    None => warn!(n, available = links.len(), "no such link"),
                }
            }
            Command::Search(query) => match app.search(&query).await {
                Some(results) => writeln!(out, "{}", renderer.render_search(&results))?,
                None => eprintln!("usage: :search <text>"),
            },
            Command::Menu => writeln!(out, "{}", renderer.render_menu(&app.menu().await))?,
            Command::Stats => {
                let stats = app.cache().stats();
                writeln!(
                    out,
                    "cache: {} entries, {} hits, {} misses",
                    stats.entries, stats.hits, stats.misses
                )?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }
    Ok(pending)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config()?;
    let app = App::new(&config).context("failed to start")?;
    let renderer = args.format.renderer();

    if args.once {
        let outcome = app.start(args.fragment.as_deref()).outcome().await;
        debug!(?outcome, "first page");
        println!("{}", renderer.render(&app.root().screen()));
        return Ok(());
    }

    // Every root update is printed, loading placeholders included. The loop
    // ends once every handle to the root is gone.
    let mut screens = app.root().subscribe();
    let printer = {
        let renderer = args.format.renderer();
        tokio::spawn(async move {
            while screens.changed().await.is_ok() {
                let screen = screens.borrow_and_update().clone();
                println!("{}", renderer.render(&screen));
            }
        })
    };

    let start = app.start(args.fragment.as_deref());
    let stdin = BufReader::new(tokio::io::stdin());
    let last = run(&app, renderer.as_ref(), Some(start), stdin, &mut std::io::stdout()).await?;

    if let Some(dispatch) = last {
        let outcome = dispatch.outcome().await;
        debug!(?outcome, "last page");
    }
    drop(app);
    printer.await.context("screen printer failed")?;
    Ok(())
}
