//! Command Line Front-end
//!
//! One-shot commands per page plus an interactive `browse` session. Every
//! page command goes through the route guard first.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::ops::Range;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app::{Dashboard, Route};
use crate::components::data_table::InfiniteRowModel;
use crate::constants::MAX_ROWS_PER_VIEW;
use crate::domain::{Character, Episode, Record, SortSpec};
use crate::error::{Error, Result};
use crate::features::SearchBox;
use crate::features::characters::CharactersController;
use crate::features::characters_infinite::CharactersInfiniteController;
use crate::features::episodes::EpisodesController;
use crate::services::{PageSource, spawn_named_in_tokio};
use crate::states::UIEvent;

const SIGN_IN_HINT: &str = "Please sign in first: rm-dashboard login <username> <password>";

#[derive(Parser, Debug)]
#[command(name = "rm-dashboard", version, about = "Rick and Morty data-grid dashboard")]
pub struct Cli {
    /// GraphQL endpoint, overrides the config file
    #[arg(long, env = "RM_DASHBOARD_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Config file (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with any non-empty username and password
    Login { username: String, password: String },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// All characters, searched and sorted client-side
    Characters {
        /// Quick filter across every column
        #[arg(long, default_value = "")]
        search: String,
        /// Client-side page, 1-based
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Sort column, e.g. `name` or `episodeCount:desc`
        #[arg(long)]
        sort: Option<SortSpec>,
    },
    /// Characters fetched block by block
    CharactersInfinite {
        /// Name search sent to the API
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<SortSpec>,
        /// Row range, e.g. `40..60`
        #[arg(long, default_value = "0..20", value_parser = parse_rows)]
        rows: Range<usize>,
    },
    /// Episodes fetched block by block
    Episodes {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<SortSpec>,
        #[arg(long, default_value = "0..20", value_parser = parse_rows)]
        rows: Range<usize>,
    },
    /// Interactive session reading commands from stdin
    Browse,
}

/// Parse `START..END`
pub fn parse_rows(text: &str) -> std::result::Result<Range<usize>, String> {
    let (start, end) = text
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{text}'"))?;
    let start: usize = start.trim().parse().map_err(|e| format!("bad start row: {e}"))?;
    let end: usize = end.trim().parse().map_err(|e| format!("bad end row: {e}"))?;
    if end <= start {
        return Err(format!("empty row range {start}..{end}"));
    }
    if end - start > MAX_ROWS_PER_VIEW {
        return Err(format!("row range {start}..{end} is wider than {MAX_ROWS_PER_VIEW} rows"));
    }
    Ok(start..end)
}

fn write_toasts<C, E>(dashboard: &mut Dashboard<C, E>, out: &mut impl Write) -> Result<()>
where
    C: PageSource<Item = Character>,
    E: PageSource<Item = Episode>,
{
    for event in dashboard.drain_events() {
        if let UIEvent::Toast { message, is_error } = event {
            let level = if is_error { "error" } else { "info" };
            writeln!(out, "[{level}] {message}")?;
        }
    }
    Ok(())
}

/// Navigate to `route`; false (with a hint printed) when the guard redirects
fn guard<C, E>(dashboard: &mut Dashboard<C, E>, route: Route, out: &mut impl Write) -> Result<bool>
where
    C: PageSource<Item = Character>,
    E: PageSource<Item = Episode>,
{
    if dashboard.navigate(route.path()).route == route {
        return Ok(true);
    }
    writeln!(out, "{SIGN_IN_HINT}")?;
    Ok(false)
}

/// Run one command; `Ok(false)` when it could not do its job
pub async fn run<C, E>(command: Commands, dashboard: &mut Dashboard<C, E>, out: &mut impl Write) -> Result<bool>
where
    C: PageSource<Item = Character>,
    E: PageSource<Item = Episode>,
{
    let ok = match command {
        Commands::Login { username, password } => match dashboard.login(&username, &password) {
            Ok(_) => true,
            Err(e @ Error::Auth { .. }) => {
                writeln!(out, "{e}")?;
                false
            }
            Err(e) => return Err(e),
        },
        Commands::Logout => {
            dashboard.logout()?;
            writeln!(out, "Signed out")?;
            true
        }
        Commands::Whoami => {
            match dashboard.user() {
                Some(user) => {
                    let since = user
                        .signed_in_at
                        .map(|t| format!(" (since {})", t.format("%Y-%m-%d %H:%M UTC")))
                        .unwrap_or_default();
                    writeln!(out, "{}{since}", user.username)?;
                }
                None => writeln!(out, "Not signed in")?,
            }
            true
        }
        Commands::Characters { search, page, sort } => {
            if !guard(dashboard, Route::Characters, out)? {
                return Ok(false);
            }
            let mut controller = dashboard.characters();
            controller.load().await;
            controller.set_search(&search);
            controller.set_sort(sort)?;
            writeln!(out, "{}", controller.render_page(page))?;
            true
        }
        Commands::CharactersInfinite { search, sort, rows } => {
            if !guard(dashboard, Route::CharactersInfinite, out)? {
                return Ok(false);
            }
            let mut controller = dashboard.characters_infinite();
            controller.set_search(&search);
            controller.set_sort(sort)?;
            render_or_report(controller.render_rows(rows).await, out)?
        }
        Commands::Episodes { search, sort, rows } => {
            if !guard(dashboard, Route::Episodes, out)? {
                return Ok(false);
            }
            let controller = dashboard.episodes();
            controller.set_search(&search);
            controller.set_sort(sort)?;
            render_or_report(controller.render_rows(rows).await, out)?
        }
        Commands::Browse => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            browse(dashboard, stdin, out).await?;
            true
        }
    };
    write_toasts(dashboard, out)?;
    Ok(ok)
}

/// Print rendered rows; a failed load was already toasted
fn render_or_report(rendered: Result<String>, out: &mut impl Write) -> Result<bool> {
    match rendered {
        Ok(text) => {
            writeln!(out, "{text}")?;
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rows unavailable");
            Ok(false)
        }
    }
}

/// The page currently open in a browse session
enum Page<C: PageSource<Item = Character>> {
    Login,
    Characters {
        controller: CharactersController<C>,
        page: usize,
    },
    CharactersInfinite {
        controller: CharactersInfiniteController<C>,
        rows: Range<usize>,
    },
    Episodes {
        controller: EpisodesController,
        rows: Range<usize>,
    },
}

impl<C: PageSource<Item = Character>> Page<C> {
    async fn open<E: PageSource<Item = Episode>>(dashboard: &Dashboard<C, E>) -> Self {
        let block = dashboard.infinite_settings().block_size;
        match dashboard.route() {
            Route::Login => Page::Login,
            Route::Characters => {
                let mut controller = dashboard.characters();
                controller.load().await;
                Page::Characters { controller, page: 1 }
            }
            Route::CharactersInfinite => Page::CharactersInfinite {
                controller: dashboard.characters_infinite(),
                rows: 0..block,
            },
            Route::Episodes => Page::Episodes {
                controller: dashboard.episodes(),
                rows: 0..block,
            },
        }
    }

    fn set_search(&mut self, term: &str) {
        match self {
            Page::Login => {}
            Page::Characters { controller, page } => {
                controller.set_search(term);
                *page = 1;
            }
            Page::CharactersInfinite { controller, rows } => {
                controller.set_search(term);
                *rows = 0..rows.len();
            }
            Page::Episodes { controller, rows } => {
                controller.set_search(term);
                *rows = 0..rows.len();
            }
        }
    }

    fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        match self {
            Page::Login => Ok(()),
            Page::Characters { controller, .. } => controller.set_sort(sort),
            Page::CharactersInfinite { controller, .. } => controller.set_sort(sort),
            Page::Episodes { controller, .. } => controller.set_sort(sort),
        }
    }

    /// Move by `delta` client pages or row windows
    fn step(&mut self, delta: isize) {
        fn shift(rows: &mut Range<usize>, delta: isize) {
            let len = rows.len();
            let start = rows.start.saturating_add_signed(delta * len as isize);
            *rows = start..start.saturating_add(len);
        }
        match self {
            Page::Login => {}
            Page::Characters { page, .. } => *page = page.saturating_add_signed(delta).max(1),
            Page::CharactersInfinite { rows, .. } | Page::Episodes { rows, .. } => shift(rows, delta),
        }
    }

    fn jump(&mut self, arg: &str) -> std::result::Result<(), String> {
        match self {
            Page::Login => Err("Sign in to browse pages".to_string()),
            Page::Characters { page, .. } => {
                *page = arg.parse().map_err(|e| format!("bad page: {e}"))?;
                Ok(())
            }
            Page::CharactersInfinite { rows, .. } | Page::Episodes { rows, .. } => {
                *rows = parse_rows(arg)?;
                Ok(())
            }
        }
    }

    async fn render(&self) -> String {
        let rendered = match self {
            Page::Login => Ok("Sign in with: login <username> <password>".to_string()),
            Page::Characters { controller, page } => Ok(controller.render_page(*page)),
            Page::CharactersInfinite { controller, rows } => {
                let rendered = controller.render_rows(rows.clone()).await;
                prefetch(controller.model().clone(), rows);
                rendered
            }
            Page::Episodes { controller, rows } => {
                let rendered = controller.render_rows(rows.clone()).await;
                prefetch(controller.model().clone(), rows);
                rendered
            }
        };
        rendered.unwrap_or_else(|e| format!("(rows unavailable: {e})"))
    }
}

/// Warm the block after the visible rows
fn prefetch<R: Record>(model: Arc<InfiniteRowModel<R>>, rows: &Range<usize>) {
    let next = rows.end..rows.end.saturating_add(rows.len());
    if model.known_row_count().is_some_and(|total| next.start >= total) || model.is_range_loaded(next.clone()) {
        return;
    }
    let spawned = spawn_named_in_tokio("prefetch-rows", async move {
        if let Err(e) = model.get_rows(next).await {
            tracing::debug!(error = %e, "Prefetch skipped");
        }
    });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Could not schedule prefetch");
    }
}

/// Wait for the search box to settle on a term
async fn settled_term(search: &SearchBox, delay: Duration) -> Option<String> {
    loop {
        tokio::time::sleep(delay).await;
        if let Some(term) = search.take_applied() {
            return Some(term);
        }
        if !search.is_pending() {
            return None;
        }
    }
}

const BROWSE_HELP: &str = "\
commands:
  go <path>                 /characters, /characters/infinite, /episodes, /login
  login <user> <password>   sign in
  logout                    sign out
  search <text>             search the current page (debounced)
  sort [col[:asc|desc]]     sort, or clear with no column
  page <n> | rows <a..b>    jump
  next | prev               move one page or row window
  nav                       show the sidebar
  toasts                    show recent notifications
  quit";

/// Interactive session over `input`
pub async fn browse<C, E, I>(dashboard: &mut Dashboard<C, E>, input: I, out: &mut impl Write) -> Result<()>
where
    C: PageSource<Item = Character>,
    E: PageSource<Item = Episode>,
    I: AsyncBufRead + Unpin,
{
    let search = dashboard.search_box();
    let delay = dashboard.config().search_debounce();
    let mut page = Page::open(dashboard).await;
    writeln!(out, "{}", page.render().await)?;

    let mut lines = input.lines();
    loop {
        write_toasts(dashboard, out)?;
        write!(out, "{}> ", dashboard.route().path())?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        let mut reopen = false;
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{BROWSE_HELP}")?;
                continue;
            }
            "nav" => {
                for item in dashboard.sidebar() {
                    let marker = if item.active { '*' } else { ' ' };
                    writeln!(out, "{marker} {} ({})", item.label, item.route.path())?;
                }
                continue;
            }
            "toasts" => {
                for toast in dashboard.toasts().iter() {
                    writeln!(out, "{}", toast.message)?;
                }
                continue;
            }
            "go" => {
                let resolution = dashboard.navigate(arg);
                if resolution.redirected {
                    writeln!(out, "-> {}", resolution.route.path())?;
                }
                reopen = true;
            }
            "login" => {
                let (username, password) = arg.split_once(' ').unwrap_or((arg, ""));
                match dashboard.login(username, password) {
                    Ok(_) => reopen = true,
                    Err(e @ Error::Auth { .. }) => {
                        writeln!(out, "{e}")?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            "logout" => {
                dashboard.logout()?;
                reopen = true;
            }
            "search" => {
                search.input(arg);
                if let Some(term) = settled_term(&search, delay).await {
                    page.set_search(&term);
                }
            }
            "sort" => {
                let sort = if arg.is_empty() { None } else { Some(SortSpec::from_str(arg)) };
                if let Err(e) = sort.transpose().and_then(|sort| page.set_sort(sort)) {
                    writeln!(out, "{e}")?;
                    continue;
                }
            }
            "page" | "rows" => {
                if let Err(e) = page.jump(arg) {
                    writeln!(out, "{e}")?;
                    continue;
                }
            }
            "next" => page.step(1),
            "prev" => page.step(-1),
            other => {
                writeln!(out, "unknown command '{other}', try 'help'")?;
                continue;
            }
        }

        if reopen {
            page = Page::open(dashboard).await;
        }
        writeln!(out, "{}", page.render().await)?;
    }
    Ok(())
}
