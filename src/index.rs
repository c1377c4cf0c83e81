use crate::dom::{CardElement, Gallery};
use crate::extract::{parse_minutes, parse_number, read_slot, read_slot_with, split_tags};
use crate::model::{Aggregates, RecipeRecord};
use log::debug;
use std::rc::Rc;

/// Records of every card known at attach time, plus their aggregates
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    records: Vec<RecipeRecord>,
    aggregates: Aggregates,
}

impl RecipeIndex {
    /// Reads every card of the gallery in document order
    pub fn build(gallery: &Gallery) -> Self {
        Self::from_cards(gallery.cards().iter().cloned())
    }

    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Rc<CardElement>>,
    {
        let records: Vec<RecipeRecord> = cards.into_iter().map(read_record).collect();
        let aggregates = aggregate(&records);

        debug!(
            "Indexed {} recipes (max prep {}, max cook {}, max servings {}, {} tags)",
            records.len(),
            aggregates.max_prep,
            aggregates.max_cook,
            aggregates.max_servings,
            aggregates.tag_universe.len()
        );

        RecipeIndex {
            records,
            aggregates,
        }
    }

    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn read_record(card: Rc<CardElement>) -> RecipeRecord {
    let el: &CardElement = &card;
    RecipeRecord {
        name: read_slot(el, "name"),
        description: read_slot(el, "description"),
        tags: read_slot_with(el, "tags", split_tags),
        prep_time: read_slot_with(el, "prep-time", parse_minutes),
        cook_time: read_slot_with(el, "cook-time", parse_minutes),
        servings: read_slot_with(el, "servings", parse_number),
        element: Rc::clone(&card),
    }
}

fn aggregate(records: &[RecipeRecord]) -> Aggregates {
    records
        .iter()
        .fold(Aggregates::default(), |mut acc, record| {
            acc.max_prep = acc.max_prep.max(record.prep_time);
            acc.max_cook = acc.max_cook.max(record.cook_time);
            // Unknown or infinite servings do not size the slider
            if record.servings.is_finite() && record.servings > acc.max_servings {
                acc.max_servings = record.servings;
            }
            acc.tag_universe.extend(record.tags.iter().cloned());
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, servings: &str, prep: &str, tags: &str) -> CardElement {
        CardElement::new()
            .with_slot("name", name)
            .with_slot("servings", servings)
            .with_slot("prep-time", prep)
            .with_slot("tags", tags)
    }

    #[test]
    fn test_build_reads_every_field() {
        let gallery: Gallery = vec![CardElement::new()
            .with_slot("name", " Soup ")
            .with_slot("description", "Warm AND cosy")
            .with_slot("tags", "Vegan, Quick")
            .with_slot("prep-time", "10 min")
            .with_slot("cook-time", "1 hour 5 min")
            .with_slot("servings", "4")]
        .into_iter()
        .collect();

        let index = RecipeIndex::build(&gallery);
        let record = &index.records()[0];

        assert_eq!(record.name, "soup");
        assert_eq!(record.description, "warm and cosy");
        assert_eq!(record.tags, vec!["vegan", "quick"]);
        assert_eq!(record.prep_time, 10);
        assert_eq!(record.cook_time, 1);
        assert_eq!(record.servings, 4.0);
        assert!(Rc::ptr_eq(&record.element, &gallery.cards()[0]));
    }

    #[test]
    fn test_missing_regions_default() {
        let gallery: Gallery = vec![CardElement::new()].into_iter().collect();
        let index = RecipeIndex::build(&gallery);
        let record = &index.records()[0];

        assert_eq!(record.name, "");
        assert!(record.tags.is_empty());
        assert_eq!(record.prep_time, 0);
        assert_eq!(record.cook_time, 0);
        assert_eq!(record.servings, 0.0);
    }

    #[test]
    fn test_aggregates() {
        let gallery: Gallery = vec![
            card("Soup", "4", "13 min", "vegan"),
            card("Steak", "2", "5", "meat,quick"),
            card("Salad", "6", "", "vegan,quick"),
        ]
        .into_iter()
        .collect();

        let aggregates = RecipeIndex::build(&gallery).aggregates().clone();

        assert_eq!(aggregates.max_prep, 13);
        assert_eq!(aggregates.max_cook, 0);
        assert_eq!(aggregates.max_servings, 6.0);
        assert_eq!(
            aggregates.tag_universe.into_iter().collect::<Vec<_>>(),
            vec!["meat", "quick", "vegan"]
        );
    }

    #[test]
    fn test_unknown_servings_ignored_by_maximum() {
        let gallery: Gallery = vec![card("a", "lots", "", ""), card("b", "3", "", "")]
            .into_iter()
            .collect();
        let index = RecipeIndex::build(&gallery);

        assert!(!index.records()[0].has_known_servings());
        assert_eq!(index.aggregates().max_servings, 3.0);
    }

    #[test]
    fn test_empty_gallery() {
        let index = RecipeIndex::build(&Gallery::new());
        assert!(index.is_empty());
        assert_eq!(index.aggregates(), &Aggregates::default());
    }

    #[test]
    fn test_infinite_servings_ignored_by_maximum() {
        let gallery: Gallery = vec![card("a", "1e400", "", ""), card("b", "8", "", "")]
            .into_iter()
            .collect();
        let index = RecipeIndex::build(&gallery);

        assert_eq!(index.records()[0].servings, f64::INFINITY);
        assert_eq!(index.aggregates().max_servings, 8.0);
    }

    #[test]
    fn test_negative_servings_clamped_to_zero_bound() {
        let gallery: Gallery = vec![card("a", "-2", "", "")].into_iter().collect();
        assert_eq!(RecipeIndex::build(&gallery).aggregates().max_servings, 0.0);
    }
}
