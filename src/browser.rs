use crate::config::BrowserConfig;
use crate::controls::FilterPanel;
use crate::dispatch::{ChangeDispatcher, Dispatch};
use crate::dom::Gallery;
use crate::error::BrowserError;
use crate::filter::apply_filters;
use crate::index::RecipeIndex;
use crate::model::{FilterState, RecipeRecord};
use log::{debug, info, warn};
use serde::Serialize;
use std::str::FromStr;
use std::time::Instant;

/// A UI component bound to a host while attached
pub trait Component {
    type Host: ?Sized;

    /// Binds to the host, (re)building all derived state
    fn attach(&mut self, host: &Self::Host);
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
}

/// One user interaction with the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Search(String),
    MinServings(f64),
    MaxPrep(f64),
    MaxCook(f64),
    ToggleTag(String),
    SelectTags(Vec<String>),
}

impl FromStr for ControlEvent {
    type Err = BrowserError;

    /// Parses `<control> <value>` lines such as `servings 3` or `tags vegan,quick`.
    /// Search text is everything after the single separator, kept verbatim.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (control, raw) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));
        let value = raw.trim();

        let number = || {
            value
                .parse::<f64>()
                .map_err(|_| BrowserError::InvalidEvent(format!("{control}: not a number: {value:?}")))
        };

        match control {
            "search" | "query" => Ok(ControlEvent::Search(raw.to_string())),
            "servings" => number().map(ControlEvent::MinServings),
            "prep" => number().map(ControlEvent::MaxPrep),
            "cook" => number().map(ControlEvent::MaxCook),
            "tag" => Ok(ControlEvent::ToggleTag(value.to_lowercase())),
            "tags" => Ok(ControlEvent::SelectTags(
                value
                    .split(',')
                    .map(|tag| tag.trim().to_lowercase())
                    .filter(|tag| !tag.is_empty())
                    .collect(),
            )),
            _ => Err(BrowserError::InvalidEvent(line.trim_end().to_string())),
        }
    }
}

/// Result of one filter pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub visible: usize,
    pub total: usize,
    pub state: FilterState,
}

/// The collection component: indexes the gallery's cards on attach and
/// filters them as the controls change
#[derive(Debug)]
pub struct RecipeBrowser {
    index: Option<RecipeIndex>,
    panel: FilterPanel,
    dispatcher: ChangeDispatcher<FilterState>,
    evaluations: usize,
}

impl RecipeBrowser {
    pub fn new(config: &BrowserConfig) -> Self {
        RecipeBrowser {
            index: None,
            panel: FilterPanel::new(config),
            dispatcher: ChangeDispatcher::new(config.quiet_window()),
            evaluations: 0,
        }
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub fn records(&self) -> &[RecipeRecord] {
        self.index.as_ref().map(RecipeIndex::records).unwrap_or(&[])
    }

    pub fn index(&self) -> Option<&RecipeIndex> {
        self.index.as_ref()
    }

    /// Number of filter passes run since creation
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.dispatcher.deadline()
    }

    /// Applies a control change. Labels are updated right away; the returned
    /// evaluation is `Some` only when the filters ran synchronously.
    pub fn handle(&mut self, event: ControlEvent, now: Instant) -> Option<Evaluation> {
        if self.index.is_none() {
            warn!("Ignoring {event:?}: browser is not attached");
            return None;
        }

        match event {
            ControlEvent::Search(text) => self.panel.search.set_value(text),
            ControlEvent::MinServings(value) => self.panel.servings.set_value(value),
            ControlEvent::MaxPrep(value) => self.panel.prep.set_value(value),
            ControlEvent::MaxCook(value) => self.panel.cook.set_value(value),
            ControlEvent::ToggleTag(tag) => {
                if !self.panel.tags.toggle(&tag) {
                    debug!("Unknown tag {tag:?}");
                }
            }
            ControlEvent::SelectTags(tags) => self.panel.tags.set_selected(&tags),
        }
        self.update(now)
    }

    /// Runs the deferred pass if its quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<Evaluation> {
        let state = self.dispatcher.poll(now)?;
        Some(self.evaluate(state))
    }

    /// Runs the deferred pass right away, if there is one
    pub fn flush(&mut self) -> Option<Evaluation> {
        let state = self.dispatcher.flush()?;
        Some(self.evaluate(state))
    }

    fn update(&mut self, now: Instant) -> Option<Evaluation> {
        self.panel.sync_labels();
        match self.dispatcher.dispatch(self.panel.filter_state(), now) {
            Dispatch::Immediate(state) => Some(self.evaluate(state)),
            Dispatch::Deferred(_) => None,
        }
    }

    fn evaluate(&mut self, state: FilterState) -> Evaluation {
        let records = self.records();
        let visible = apply_filters(records, &state);
        let total = records.len();
        self.evaluations += 1;

        Evaluation {
            visible,
            total,
            state,
        }
    }
}

impl Component for RecipeBrowser {
    type Host = Gallery;

    fn attach(&mut self, gallery: &Gallery) {
        let index = RecipeIndex::build(gallery);
        self.panel.initialize(index.aggregates());
        self.index = Some(index);

        self.dispatcher.reset();
        if let Some(evaluation) = self.update(Instant::now()) {
            info!(
                "Attached recipe browser: {}/{} recipes visible",
                evaluation.visible, evaluation.total
            );
        }
    }

    fn detach(&mut self) {
        self.dispatcher.reset();
        self.index = None;
        debug!("Detached recipe browser");
    }

    fn is_attached(&self) -> bool {
        self.index.is_some()
    }
}
