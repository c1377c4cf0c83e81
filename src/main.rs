use clap::Parser;
use log::{debug, info};
use recipe_browser::session;
use recipe_browser::{
    BrowserConfig, BrowserError, Component, ControlEvent, Evaluation, Gallery, RecipeBrowser,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::BufReader;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "recipe-browser")]
#[command(about = "Filter the recipe cards of a gallery page", long_about = None)]
struct Cli {
    /// HTML document containing the recipe cards
    file: PathBuf,

    /// Search text matched against names and descriptions
    #[arg(short, long)]
    query: Option<String>,

    /// Minimum servings
    #[arg(long)]
    min_servings: Option<f64>,

    /// Maximum prep time in minutes
    #[arg(long)]
    max_prep: Option<f64>,

    /// Maximum cook time in minutes
    #[arg(long)]
    max_cook: Option<f64>,

    /// Required tag (repeatable; all must match)
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Print cards and filter state as JSON
    #[arg(long)]
    json: bool,

    /// Read control events from stdin, one per line (e.g. `servings 3`)
    #[arg(short, long)]
    interactive: bool,
}

impl Cli {
    fn events(&self) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        if let Some(query) = &self.query {
            events.push(ControlEvent::Search(query.clone()));
        }
        if let Some(value) = self.min_servings {
            events.push(ControlEvent::MinServings(value));
        }
        if let Some(value) = self.max_prep {
            events.push(ControlEvent::MaxPrep(value));
        }
        if let Some(value) = self.max_cook {
            events.push(ControlEvent::MaxCook(value));
        }
        if !self.tags.is_empty() {
            events.push(ControlEvent::SelectTags(
                self.tags.iter().map(|tag| tag.to_lowercase()).collect(),
            ));
        }
        events
    }
}

#[derive(Serialize)]
struct Report<'a> {
    visible: Vec<String>,
    hidden: Vec<String>,
    evaluation: Option<&'a Evaluation>,
}

fn print_report(
    gallery: &Gallery,
    evaluation: Option<&Evaluation>,
    json: bool,
) -> Result<(), BrowserError> {
    if json {
        let (visible, hidden): (Vec<_>, Vec<_>) =
            gallery.cards().iter().partition(|card| !card.is_hidden());
        let report = Report {
            visible: visible.iter().map(|card| card.label()).collect(),
            hidden: hidden.iter().map(|card| card.label()).collect(),
            evaluation,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        for card in gallery.visible() {
            println!("{}", card.label());
        }
    }
    Ok(())
}

fn main() -> Result<(), BrowserError> {
    env_logger::init();

    let cli = Cli::parse();
    let config = BrowserConfig::load()?;
    debug!("{config:?}");

    let html = std::fs::read_to_string(&cli.file)?;
    let gallery =
        Gallery::parse_with_selectors(&html, &config.browser_selector, &config.card_selector)?;
    info!("Loaded {} cards from {}", gallery.len(), cli.file.display());

    let mut browser = RecipeBrowser::new(&config);
    browser.attach(&gallery);

    let now = Instant::now();
    for event in cli.events() {
        browser.handle(event, now);
    }
    let evaluation = browser.flush();

    if !cli.interactive {
        return print_report(&gallery, evaluation.as_ref(), cli.json);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);
        let mut failure = None;
        let reader = session::forward_lines(BufReader::new(tokio::io::stdin()), tx);
        let driver = session::run(&mut browser, rx, |evaluation| {
            if failure.is_none() {
                failure = print_report(&gallery, Some(evaluation), cli.json).err();
                if !cli.json {
                    println!("--");
                }
            }
        });
        let (read, ()) = tokio::join!(reader, driver);
        read?;
        failure.map_or(Ok(()), Err)
    })
}
