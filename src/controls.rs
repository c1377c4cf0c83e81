use crate::config::BrowserConfig;
use crate::extract::capitalize;
use crate::model::{Aggregates, FilterState};
use log::debug;

/// A numeric slider
#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

impl RangeControl {
    pub fn new(step: f64) -> Self {
        RangeControl {
            min: 0.0,
            max: 0.0,
            step: if step > 0.0 { step } else { 1.0 },
            value: 0.0,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the upper bound; it never drops below the lower bound. The
    /// current value is re-sanitized against it.
    pub fn set_max(&mut self, max: f64) {
        self.max = if max.is_finite() { max.max(self.min) } else { self.min };
        self.set_value(self.value);
    }

    /// Assigns a value, clamped to the bounds and snapped to the step grid
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            self.value = self.min;
            return;
        }

        let clamped = value.clamp(self.min, self.max);
        let mut snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        if snapped > self.max {
            snapped -= self.step;
        }
        self.value = snapped.max(self.min);
    }
}

/// Text shown next to a slider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueLabel {
    text: String,
}

impl ValueLabel {
    pub fn show(&mut self, value: f64) {
        self.text = format_number(value);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Free-text search box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchControl {
    value: String,
}

impl SearchControl {
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn query(&self) -> String {
        self.value.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagOption {
    /// Lower-case tag, empty for "any tag"
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Multi-select of tags
#[derive(Debug, Clone, PartialEq)]
pub struct TagSelect {
    options: Vec<TagOption>,
}

impl TagSelect {
    pub fn new(any_label: impl Into<String>) -> Self {
        TagSelect {
            options: vec![TagOption {
                value: String::new(),
                label: any_label.into(),
                selected: true,
            }],
        }
    }

    /// Replaces the tag options, keeping only the "any tag" option selected
    pub fn set_tags<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.options.truncate(1);
        self.options[0].selected = true;
        self.options.extend(tags.into_iter().map(|tag| TagOption {
            value: tag.clone(),
            label: capitalize(tag),
            selected: false,
        }));
    }

    pub fn options(&self) -> &[TagOption] {
        &self.options
    }

    /// Flips the selection of one option. Unknown values are ignored.
    pub fn toggle(&mut self, value: &str) -> bool {
        match self.options.iter_mut().find(|option| option.value == value) {
            Some(option) => {
                option.selected = !option.selected;
                true
            }
            None => false,
        }
    }

    /// Selects exactly the options with the given values
    pub fn set_selected<S: AsRef<str>>(&mut self, values: &[S]) {
        for option in &mut self.options {
            option.selected = values.iter().any(|value| value.as_ref() == option.value);
        }
    }

    /// Selected real tags; the "any tag" sentinel never appears
    pub fn selected_tags(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|option| option.selected && !option.value.is_empty())
            .map(|option| option.value.as_str())
    }
}

/// The five filter controls of a browser
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPanel {
    pub search: SearchControl,
    pub servings: RangeControl,
    pub prep: RangeControl,
    pub cook: RangeControl,
    pub tags: TagSelect,
    servings_label: ValueLabel,
    prep_label: ValueLabel,
    cook_label: ValueLabel,
    time_step: u32,
}

impl FilterPanel {
    pub fn new(config: &BrowserConfig) -> Self {
        let time_step = config.time_step();
        FilterPanel {
            search: SearchControl::default(),
            servings: RangeControl::new(1.0),
            prep: RangeControl::new(f64::from(time_step)),
            cook: RangeControl::new(f64::from(time_step)),
            tags: TagSelect::new(config.any_tag_label.clone()),
            servings_label: ValueLabel::default(),
            prep_label: ValueLabel::default(),
            cook_label: ValueLabel::default(),
            time_step,
        }
    }

    /// Sizes the controls from the aggregates and resets them to their
    /// unfiltered positions
    pub fn initialize(&mut self, aggregates: &Aggregates) {
        self.search.set_value("");

        self.servings.set_max(aggregates.max_servings);
        self.servings.set_value(0.0);

        let prep_max = round_up_to_step(aggregates.max_prep, self.time_step);
        self.prep.set_max(prep_max);
        self.prep.set_value(prep_max);

        let cook_max = round_up_to_step(aggregates.max_cook, self.time_step);
        self.cook.set_max(cook_max);
        self.cook.set_value(cook_max);

        self.tags.set_tags(&aggregates.tag_universe);
        self.sync_labels();

        debug!(
            "Initialized filters: servings 0..{}, prep 0..{}, cook 0..{}, {} tag options",
            self.servings.max(),
            self.prep.max(),
            self.cook.max(),
            self.tags.options().len()
        );
    }

    /// Copies the slider values into their labels
    pub fn sync_labels(&mut self) {
        self.servings_label.show(self.servings.value());
        self.prep_label.show(self.prep.value());
        self.cook_label.show(self.cook.value());
    }

    pub fn servings_label(&self) -> &str {
        self.servings_label.text()
    }

    pub fn prep_label(&self) -> &str {
        self.prep_label.text()
    }

    pub fn cook_label(&self) -> &str {
        self.cook_label.text()
    }

    /// Snapshot of the live control values
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            query: self.search.query(),
            min_servings: self.servings.value(),
            max_prep_time: self.prep.value(),
            max_cook_time: self.cook.value(),
            selected_tags: self.tags.selected_tags().map(str::to_string).collect(),
        }
    }
}

/// Smallest multiple of `step` that is at least `value`
pub fn round_up_to_step(value: u32, step: u32) -> f64 {
    let step = u64::from(step.max(1));
    (u64::from(value).div_ceil(step) * step) as f64
}
