pub mod browser;
pub mod card;
pub mod config;
pub mod controls;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod extract;
pub mod filter;
pub mod index;
pub mod model;
pub mod session;

pub use browser::{Component, ControlEvent, Evaluation, RecipeBrowser};
pub use config::BrowserConfig;
pub use dom::{CardElement, Gallery, SlotSource};
pub use error::BrowserError;
pub use index::RecipeIndex;
pub use model::{Aggregates, FilterState, RecipeRecord};

use std::time::Instant;

/// Parses a gallery document, attaches a browser to it and applies the given
/// control changes without waiting for the quiet window.
///
/// # Example
/// ```
/// use recipe_browser::{filter_gallery, BrowserConfig, ControlEvent};
///
/// let html = r#"
///     <recipe-card><span slot="name">Soup</span><span slot="servings">4</span></recipe-card>
///     <recipe-card><span slot="name">Steak</span><span slot="servings">2</span></recipe-card>
/// "#;
/// let gallery = filter_gallery(html, &BrowserConfig::default(), vec![ControlEvent::MinServings(3.0)])
///     .unwrap();
///
/// let visible: Vec<_> = gallery.visible().map(|card| card.label()).collect();
/// assert_eq!(visible, vec!["Soup"]);
/// ```
pub fn filter_gallery<I>(html: &str, config: &BrowserConfig, events: I) -> Result<Gallery, BrowserError>
where
    I: IntoIterator<Item = ControlEvent>,
{
    let gallery =
        Gallery::parse_with_selectors(html, &config.browser_selector, &config.card_selector)?;
    let mut browser = RecipeBrowser::new(config);
    browser.attach(&gallery);

    let now = Instant::now();
    for event in events {
        browser.handle(event, now);
    }
    browser.flush();

    Ok(gallery)
}
