//! Place listing: search, collect the results feed, open each result

use crate::collector::{attribute_key, Collector, Termination};
use crate::config::HarvestConfig;
use crate::materialize::materialize_place;
use crate::records::PlaceRecord;
use crate::selectors::MapsSelectors;
use mapharvest_core::{ElementRef, Key, Launcher, Locator, Renderer, Result, Session};
use mapharvest_store::{unique_by, write_records};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct PlaceHarvest {
    pub query: String,
    pub places: Vec<PlaceRecord>,
    /// `None` when the results feed never appeared
    pub termination: Option<Termination>,
    pub failed: usize,
}

/// Run a search in an open session and materialize up to `max_places` results.
pub fn harvest_places(
    renderer: &mut dyn Renderer,
    query: &str,
    max_places: Option<usize>,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Result<PlaceHarvest> {
    let mut harvest = PlaceHarvest {
        query: query.to_string(),
        places: Vec::new(),
        termination: None,
        failed: 0,
    };

    info!(%query, "searching");
    renderer.navigate(&config.maps_url)?;
    let input = Locator::new(selectors.search_input.clone())
        .timeout(config.search_timeout)
        .wait(renderer)?;
    renderer.type_text(input, query)?;
    renderer.send_key(input, Key::Enter)?;

    let ready = Locator::new(selectors.results_ready.clone())
        .timeout(config.search_timeout)
        .exists(renderer);
    if !ready {
        debug!("results did not signal ready, looking for the feed anyway");
    }
    renderer.pause(config.results_pause);

    let Some(container) = wait_for_container(renderer, selectors, config) else {
        warn!(%query, "results container not found");
        return Ok(harvest);
    };

    let policy = config.list_scroll.clone().with_target(max_places);
    let mut collector = Collector::new(
        container,
        &selectors.place_anchor,
        &policy,
        attribute_key("href"),
    )
    .labelled_by("aria-label");
    let collection = collector.run(renderer);
    harvest.termination = Some(collection.termination);

    let mut handles = collector.handles(renderer)?;
    if let Some(max) = max_places {
        handles.truncate(max);
    }
    info!(
        seen = collection.state.unique(),
        rendered = handles.len(),
        "opening places"
    );

    for (index, handle) in handles.iter().enumerate() {
        match materialize_place(renderer, handle, selectors, config) {
            Ok(place) => harvest.places.push(place),
            Err(err) => {
                harvest.failed += 1;
                warn!(key = %handle.key, %err, "skipping place");
            }
        }
        if (index + 1) % 5 == 0 {
            info!(done = index + 1, total = handles.len(), "places progress");
        }
    }

    info!(
        %query,
        places = harvest.places.len(),
        failed = harvest.failed,
        "search finished"
    );
    Ok(harvest)
}

/// Open a session, harvest, and close it whatever happens.
pub fn scrape_places(
    launcher: &dyn Launcher,
    query: &str,
    max_places: Option<usize>,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Result<PlaceHarvest> {
    let mut session = Session::open(launcher)?;
    let harvest = harvest_places(session.renderer(), query, max_places, selectors, config);
    if let Err(err) = session.close() {
        warn!(%err, "failed to close session");
    }
    harvest
}

/// Write places deduplicated by link; returns how many rows were written.
pub fn save_places(path: &Path, places: &[PlaceRecord]) -> mapharvest_store::Result<usize> {
    let unique = unique_by(places, |place| place.link.clone());
    write_records(path, &unique)?;
    info!(path = %path.display(), places = unique.len(), "places saved");
    Ok(unique.len())
}

fn wait_for_container(
    renderer: &mut dyn Renderer,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Option<ElementRef> {
    let locator = Locator::new(selectors.results_container.clone());
    for attempt in 0..config.container_polls {
        match locator.find(renderer) {
            Ok(Some(container)) => return Some(container),
            Ok(None) => {}
            Err(err) => debug!(attempt, %err, "container lookup failed"),
        }
        renderer.pause(config.poll_interval);
    }
    None
}
