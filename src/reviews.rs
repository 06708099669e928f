//! Review harvesting for a single place page
//!
//! Open the reviews panel, collect its virtualized feed, then materialize
//! the containers rendered at the end of the scroll.

use crate::collector::{Collector, Termination};
use crate::config::HarvestConfig;
use crate::materialize::ReviewSession;
use crate::records::{Fingerprint, ReviewRecord};
use crate::selectors::MapsSelectors;
use mapharvest_core::{ElementRef, Launcher, Locator, Renderer, Result, Scope, Session, WaitMode};
use tracing::{debug, info, warn};

pub const UNKNOWN_PLACE: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct ReviewHarvest {
    pub url: String,
    pub place_name: String,
    pub reviews: Vec<ReviewRecord>,
    /// `None` when the reviews panel could not be opened
    pub termination: Option<Termination>,
}

impl ReviewHarvest {
    fn empty(url: &str, place_name: String) -> Self {
        Self {
            url: url.to_string(),
            place_name,
            reviews: Vec::new(),
            termination: None,
        }
    }
}

/// Collect up to `max_reviews` reviews from the place page at `url`.
pub fn harvest_reviews(
    renderer: &mut dyn Renderer,
    url: &str,
    max_reviews: Option<usize>,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Result<ReviewHarvest> {
    renderer.navigate(url)?;
    renderer.pause(config.page_load_pause);

    let place_name = Locator::new(selectors.place_title.clone())
        .timeout(config.panel_timeout)
        .text(renderer)
        .unwrap_or(UNKNOWN_PLACE.to_string());
    info!(place = %place_name, "collecting reviews");

    let Some(panel) = open_panel(renderer, selectors, config) else {
        return Ok(ReviewHarvest::empty(url, place_name));
    };

    match renderer.hide_matching(&selectors.clutter) {
        Ok(hidden) => debug!(hidden, "hid clutter"),
        Err(err) => debug!(%err, "hiding clutter failed"),
    }

    let policy = config.review_scroll.clone().with_target(max_reviews);
    let mut collector = Collector::new(
        panel,
        &selectors.review_container,
        &policy,
        |renderer: &mut dyn Renderer, element: ElementRef| review_key(renderer, element, selectors),
    )
    .hiding(&selectors.clutter);
    let collection = collector.run(renderer);

    let containers = renderer.find_all(Scope::Within(panel), &selectors.review_container)?;
    info!(containers = containers.len(), "extracting reviews");

    let mut session = ReviewSession::new(place_name.clone());
    let mut reviews = Vec::new();
    for (index, container) in containers.into_iter().enumerate() {
        if max_reviews.map_or(false, |max| reviews.len() >= max) {
            break;
        }
        if let Some(review) = session.materialize(renderer, container, selectors, config) {
            reviews.push(review);
        }
        if (index + 1) % 10 == 0 {
            info!(processed = index + 1, kept = reviews.len(), "reviews progress");
        }
    }

    info!(place = %place_name, reviews = reviews.len(), "reviews collected");
    Ok(ReviewHarvest {
        url: url.to_string(),
        place_name,
        reviews,
        termination: Some(collection.termination),
    })
}

/// Platform review id, else the content fingerprint. Element ids change on
/// every render and never key a review. `None` for an empty container.
fn review_key(
    renderer: &mut dyn Renderer,
    element: ElementRef,
    selectors: &MapsSelectors,
) -> Option<String> {
    let id = renderer
        .read_attribute(element, &selectors.review_id_attribute)
        .ok()
        .flatten()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    if id.is_some() {
        return id;
    }
    let username = Locator::new(selectors.review_username.clone())
        .within(element)
        .text(renderer)
        .unwrap_or_default();
    let text = Locator::new(selectors.review_text.clone())
        .within(element)
        .text(renderer)
        .unwrap_or_default();
    if username.is_empty() && text.is_empty() {
        return None;
    }
    let fingerprint = Fingerprint::of(&username, &text);
    Some(format!("fp:{}|{}", fingerprint.username, fingerprint.prefix))
}

/// Open a session, harvest one place, and close the session whatever happens.
pub fn scrape_reviews(
    launcher: &dyn Launcher,
    url: &str,
    max_reviews: Option<usize>,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Result<ReviewHarvest> {
    let mut session = Session::open(launcher)?;
    let harvest = harvest_reviews(session.renderer(), url, max_reviews, selectors, config);
    if let Err(err) = session.close() {
        warn!(%err, "failed to close session");
    }
    harvest
}

/// Scroll to the reviews section, click "more reviews" and find the scrollable panel.
fn open_panel(
    renderer: &mut dyn Renderer,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Option<ElementRef> {
    let section = Locator::new(selectors.review_section.clone())
        .timeout(config.panel_timeout)
        .find(renderer)
        .ok()
        .flatten();
    let Some(section) = section else {
        warn!("reviews section not found");
        return None;
    };
    if let Err(err) = renderer.scroll_into_view(section) {
        debug!(%err, "could not scroll to reviews section");
    }
    renderer.pause(config.section_pause);

    let button = Locator::new(selectors.more_reviews.clone())
        .mode(WaitMode::Clickable)
        .timeout(config.panel_timeout)
        .find(renderer)
        .ok()
        .flatten();
    let Some(button) = button else {
        warn!("more reviews button not found");
        return None;
    };
    match renderer.click(button) {
        Ok(tier) => debug!(?tier, "opened reviews panel"),
        Err(err) => {
            warn!(%err, "could not open reviews panel");
            return None;
        }
    }
    renderer.pause(config.panel_open_pause);

    let panel = Locator::new(selectors.review_panel.clone())
        .find(renderer)
        .ok()
        .flatten();
    let Some(panel) = panel else {
        warn!("reviews panel not found");
        return None;
    };
    if let Err(err) = renderer.scroll_by(panel, config.preload_delta) {
        debug!(%err, "preload scroll failed");
    }
    renderer.pause(config.section_pause / 2);
    Some(panel)
}
