use crate::model::{FilterState, RecipeRecord};
use log::debug;

pub fn matches_search(record: &RecipeRecord, query: &str) -> bool {
    query.is_empty() || record.name.contains(query) || record.description.contains(query)
}

/// Unknown servings pass while no minimum is set and fail once one is
pub fn matches_servings(record: &RecipeRecord, min_servings: f64) -> bool {
    if record.has_known_servings() {
        record.servings >= min_servings
    } else {
        min_servings <= 0.0
    }
}

/// Every selected tag must be on the record
pub fn matches_tags(record: &RecipeRecord, state: &FilterState) -> bool {
    state
        .selected_tags
        .iter()
        .all(|tag| record.tags.contains(tag))
}

pub fn matches(record: &RecipeRecord, state: &FilterState) -> bool {
    matches_search(record, &state.query)
        && matches_servings(record, state.min_servings)
        && f64::from(record.prep_time) <= state.max_prep_time
        && f64::from(record.cook_time) <= state.max_cook_time
        && matches_tags(record, state)
}

/// Sets the visibility of every record's card. Returns the number of
/// visible records.
pub fn apply_filters(records: &[RecipeRecord], state: &FilterState) -> usize {
    let mut visible = 0;
    for record in records {
        let show = matches(record, state);
        record.element.set_hidden(!show);
        visible += usize::from(show);
    }

    debug!(
        "Filter pass: {visible}/{} visible (query {:?}, servings >= {}, prep <= {}, cook <= {}, tags {:?})",
        records.len(),
        state.query,
        state.min_servings,
        state.max_prep_time,
        state.max_cook_time,
        state.selected_tags
    );
    visible
}
