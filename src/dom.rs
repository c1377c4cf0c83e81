use crate::error::BrowserError;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::cell::Cell;
use std::rc::Rc;

/// Anything exposing named content regions (`slot="..."` children)
pub trait SlotSource {
    /// Raw text content of the first region with the given name
    fn slot_text(&self, name: &str) -> Option<String>;
}

/// One card of the gallery
#[derive(Debug, Default)]
pub struct CardElement {
    id: Option<String>,
    slots: Vec<(String, String)>,
    hidden: Cell<bool>,
}

impl CardElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a content region. Only the first region of a given name is
    /// visible to [`SlotSource::slot_text`], as with `querySelector`.
    pub fn with_slot(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.slots.push((name.into(), text.into()));
        self
    }

    fn from_element(element: ElementRef<'_>, slot_selector: &Selector) -> Self {
        let mut card = CardElement {
            id: element.value().attr("id").map(str::to_string),
            slots: Vec::new(),
            hidden: Cell::new(element.value().attr("hidden").is_some()),
        };

        for region in element.select(slot_selector) {
            if let Some(name) = region.value().attr("slot") {
                card.slots
                    .push((name.to_string(), region.text().collect::<String>()));
            }
        }
        card
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Human readable identification: the id attribute, else the raw name
    pub fn label(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.slot_text("name").map(|name| name.trim().to_string()))
            .unwrap_or_default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }
}

impl SlotSource for CardElement {
    fn slot_text(&self, name: &str) -> Option<String> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == name)
            .map(|(_, text)| text.clone())
    }
}

/// The cards of a browser, in document order
#[derive(Debug, Default)]
pub struct Gallery {
    cards: Vec<Rc<CardElement>>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document with the default selectors: `recipe-card` elements
    /// inside the first `recipe-browser`
    pub fn parse(html: &str) -> Result<Self, BrowserError> {
        Self::parse_with_selectors(html, "recipe-browser", "recipe-card")
    }

    /// Collects the elements matching `card_selector` inside the first
    /// element matching `browser_selector`. Without such a container the
    /// whole document is searched.
    pub fn parse_with_selectors(
        html: &str,
        browser_selector: &str,
        card_selector: &str,
    ) -> Result<Self, BrowserError> {
        let container = parse_selector(browser_selector)?;
        let cards = parse_selector(card_selector)?;
        let slots = parse_selector("[slot]")?;

        let document = Html::parse_document(html);
        let elements: Vec<ElementRef<'_>> = match document.select(&container).next() {
            Some(browser) => browser.select(&cards).collect(),
            None => {
                debug!("No {browser_selector} container, searching the whole document");
                document.select(&cards).collect()
            }
        };

        let gallery = Gallery {
            cards: elements
                .into_iter()
                .map(|element| Rc::new(CardElement::from_element(element, &slots)))
                .collect(),
        };

        debug!("Parsed gallery with {} cards", gallery.cards.len());
        Ok(gallery)
    }

    /// Appends a card. Attached browsers do not see it until re-attached.
    pub fn push(&mut self, card: CardElement) -> Rc<CardElement> {
        let card = Rc::new(card);
        self.cards.push(Rc::clone(&card));
        card
    }

    pub fn cards(&self) -> &[Rc<CardElement>] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Rc<CardElement>> {
        self.cards.iter().filter(|card| !card.is_hidden())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, BrowserError> {
    Selector::parse(selector).map_err(|e| BrowserError::Selector(format!("{selector}: {e}")))
}

impl FromIterator<CardElement> for Gallery {
    fn from_iter<I: IntoIterator<Item = CardElement>>(iter: I) -> Self {
        Gallery {
            cards: iter.into_iter().map(Rc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
        <html><body>
            <recipe-browser>
                <recipe-card id="soup">
                    <h3 slot="name">Tomato <em>Soup</em></h3>
                    <p slot="description">Warm</p>
                    <span slot="tags">vegan</span>
                </recipe-card>
                <recipe-card hidden>
                    <h3 slot="name">Steak</h3>
                    <h3 slot="name">Ignored</h3>
                </recipe-card>
            </recipe-browser>
        </body></html>
    "#;

    #[test]
    fn test_parse_cards_in_document_order() {
        let gallery = Gallery::parse(HTML).unwrap();

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.cards()[0].id(), Some("soup"));
        assert_eq!(gallery.cards()[1].id(), None);
        assert!(gallery.cards()[1].is_hidden());
    }

    #[test]
    fn test_slot_text_concatenates_descendants() {
        let gallery = Gallery::parse(HTML).unwrap();
        assert_eq!(
            gallery.cards()[0].slot_text("name"),
            Some("Tomato Soup".to_string())
        );
    }

    #[test]
    fn test_first_slot_wins() {
        let gallery = Gallery::parse(HTML).unwrap();
        let steak = &gallery.cards()[1];
        assert_eq!(steak.slot_text("name"), Some("Steak".to_string()));
        assert_eq!(steak.label(), "Steak");
        assert_eq!(steak.slot_text("tags"), None);
    }

    #[test]
    fn test_invalid_selector() {
        let result = Gallery::parse_with_selectors(HTML, "recipe-browser", "[[[");
        assert!(matches!(result, Err(BrowserError::Selector(_))));

        let result = Gallery::parse_with_selectors(HTML, "[[[", "recipe-card");
        assert!(matches!(result, Err(BrowserError::Selector(_))));
    }

    #[test]
    fn test_cards_outside_browser_are_ignored() {
        let html = r#"
            <aside><recipe-card id="outside"><b slot="name">Ad</b></recipe-card></aside>
            <recipe-browser><recipe-card id="inside"><b slot="name">Soup</b></recipe-card></recipe-browser>
        "#;
        let gallery = Gallery::parse(html).unwrap();

        let ids: Vec<_> = gallery.cards().iter().map(|card| card.label()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[test]
    fn test_without_browser_whole_document_is_searched() {
        let html = r#"<recipe-card id="a"></recipe-card><div><recipe-card id="b"></recipe-card></div>"#;
        assert_eq!(Gallery::parse(html).unwrap().len(), 2);
    }

    #[test]
    fn test_visible_follows_hidden_flag() {
        let gallery = Gallery::parse(HTML).unwrap();
        gallery.cards()[0].set_hidden(true);
        gallery.cards()[1].set_hidden(false);

        let labels: Vec<_> = gallery.visible().map(|card| card.label()).collect();
        assert_eq!(labels, vec!["Steak"]);
    }
}
