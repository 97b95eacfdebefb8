//! Replay driver for the navigation surface.
//!
//! Reads newline-delimited JSON from a file (or stdin), feeds each line to a
//! [`NavigationRouter`] and prints what a host would observe, one JSON object
//! per line:
//!
//! - `{"action": ...}` for every action the router returns
//! - `{"visibility": {"page": 1, "name": "call_log", "visible": true}}` for
//!   every visibility callback a page receives
//!
//! # Input
//!
//! Each line is either an [`Event`] or a control line toggling the simulated
//! call state:
//!
//! ```text
//! {"event": "tab_tapped", "index": 2}
//! {"event": "page_settled", "index": 2}
//! {"event": "scroll_phase_changed", "phase": "idle"}
//! {"busy": true}
//! {"event": "external_request", "request": {"kind": "resume"}}
//! ```
//!
//! # Usage
//!
//! ```text
//! dialnav [EVENTS_FILE] [--config CONFIG_TOML] [--state STATE_JSON]
//! ```
//!
//! The manual selection is restored from and persisted to the state file.

use dialnav::nav::{
    BusyProbe, DirectorySearch, FilterAware, PageContent, RequestAware, VisibilityAware,
};
use dialnav::storage::{JsonSelectionStore, SelectionStore};
use dialnav::{handle_event, Config, DialnavError, Event, NavigationRequest, NavigationRouter};
use serde::Deserialize;
use std::cell::Cell;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Line {
    Busy { busy: bool },
    Event(Event),
}

#[derive(Debug, Default)]
struct Args {
    events: Option<PathBuf>,
    config: Option<PathBuf>,
    state: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self, DialnavError> {
        let mut args = Self::default();
        let mut iter = std::env::args().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => args.config = Some(Self::value(&mut iter, "--config")?),
                "--state" => args.state = Some(Self::value(&mut iter, "--state")?),
                flag if flag.starts_with("--") => {
                    return Err(DialnavError::Config(format!("unknown flag {flag}")));
                }
                path => args.events = Some(PathBuf::from(path)),
            }
        }
        Ok(args)
    }

    fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, DialnavError> {
        iter.next()
            .map(PathBuf::from)
            .ok_or_else(|| DialnavError::Config(format!("{flag} needs a value")))
    }
}

/// Page stand-in printing every callback it receives.
struct ReplayPage {
    index: usize,
    name: String,
}

impl VisibilityAware for ReplayPage {
    fn on_visibility_changed(&mut self, visible: bool) {
        emit(&serde_json::json!({
            "visibility": { "page": self.index, "name": self.name, "visible": visible }
        }));
    }
}

impl FilterAware for ReplayPage {
    fn set_filter_text(&mut self, filter: &str) {
        tracing::info!(page = %self.name, filter, "list filter applied");
    }
}

impl RequestAware for ReplayPage {
    fn configure_from_request(&mut self, request: &NavigationRequest) {
        tracing::info!(page = %self.name, ?request, "page configured from request");
    }
}

impl PageContent for ReplayPage {
    fn visibility(&mut self) -> Option<&mut dyn VisibilityAware> {
        Some(self)
    }

    fn list_filter(&mut self) -> Option<&mut dyn FilterAware> {
        Some(self)
    }

    fn request_handler(&mut self) -> Option<&mut dyn RequestAware> {
        Some(self)
    }
}

/// Busy signal driven by `{"busy": ...}` lines.
struct ReplayProbe {
    busy: Rc<Cell<bool>>,
}

impl BusyProbe for ReplayProbe {
    fn is_busy(&self) -> dialnav::Result<bool> {
        Ok(self.busy.get())
    }

    fn show_call_screen(&mut self) -> dialnav::Result<bool> {
        Ok(self.busy.get())
    }
}

fn emit(value: &serde_json::Value) {
    println!("{value}");
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, DialnavError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)?;
    Config::from_toml_str(&text)
}

fn build_router(config: &Config, store: &dyn SelectionStore, busy: &Rc<Cell<bool>>) -> Result<NavigationRouter, DialnavError> {
    let mut router = dialnav::initialize(config, store)?
        .with_busy_probe(Box::new(ReplayProbe { busy: Rc::clone(busy) }));

    let pages: Vec<_> = router.layout().pages().collect();
    for page in pages {
        let name = router.layout().name(page).unwrap_or_default().to_string();
        router.attach_page(page.get(), Box::new(ReplayPage { index: page.get(), name }));
    }

    let entries = ["Ada Lovelace", "Alan Turing", "Grace Hopper", "Edsger Dijkstra"];
    router.attach_search_provider(Box::new(DirectorySearch::new(entries)));
    Ok(router)
}

fn run(args: &Args) -> Result<(), DialnavError> {
    let config = load_config(args.config.as_ref())?;
    dialnav::observability::init_tracing(&config);

    let state_path = args.state.clone().unwrap_or_else(|| config.state_path());
    let mut store = JsonSelectionStore::new(state_path)?;

    let busy = Rc::new(Cell::new(false));
    let mut router = build_router(&config, &store, &busy)?;

    let reader: Box<dyn BufRead> = match &args.events {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(std::io::stdin().lock()),
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Line>(&line) {
            Ok(Line::Busy { busy: value }) => {
                tracing::info!(busy = value, "busy signal set");
                busy.set(value);
            }
            Ok(Line::Event(event)) => {
                for action in handle_event(&mut router, &event) {
                    match serde_json::to_value(&action) {
                        Ok(value) => emit(&value),
                        Err(e) => tracing::warn!(error = %e, "failed to serialize action"),
                    }
                }
            }
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "skipping unreadable line");
                eprintln!("line {}: {e}", number + 1);
            }
        }
    }

    if let Some(filter) = router.take_filter_text() {
        tracing::info!(filter, "unconsumed filter text");
    }
    router.persist(&mut store)
}

fn main() -> ExitCode {
    let result = Args::parse().and_then(|args| run(&args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dialnav: {e}");
            ExitCode::FAILURE
        }
    }
}
