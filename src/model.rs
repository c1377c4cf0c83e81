use crate::dom::CardElement;
use serde::Serialize;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Structured facts read from one card at attach time
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    pub element: Rc<CardElement>,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    /// NaN when the servings text is not a number
    pub servings: f64,
}

impl RecipeRecord {
    /// Servings that are not a number or below zero count as unknown
    pub fn has_known_servings(&self) -> bool {
        self.servings >= 0.0
    }
}

/// Current values of the filter controls
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    /// Lower-cased search text
    pub query: String,
    pub min_servings: f64,
    pub max_prep_time: f64,
    pub max_cook_time: f64,
    pub selected_tags: BTreeSet<String>,
}

/// Bounds and tag universe derived from the full record list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub max_prep: u32,
    pub max_cook: u32,
    pub max_servings: f64,
    /// Distinct tags, sorted
    pub tag_universe: BTreeSet<String>,
}
