//! mapharvest - places and reviews from Google Maps search results
//!
//! The results list and the reviews panel are virtualized scroll
//! containers: only a window of items is rendered and element handles
//! churn. Both are harvested the same way:
//!
//! 1. [`collector::Collector`] scrolls the container and accumulates
//!    natural keys until a target, stagnation or the attempt cap.
//! 2. The final rendered items are opened one by one by
//!    [`materialize`], which folds missing fields to defaults.
//! 3. [`batch::BatchOrchestrator`] repeats the reviews flow over many place
//!    links with a fresh browser session each, saving as it goes.
//!
//! ## Modules
//!
//! - **collector**: scroll-and-collect with termination policy
//! - **materialize**: place details and deduplicated reviews
//! - **places** / **reviews**: the two page flows
//! - **batch**: per-link orchestration and persistence
//! - **selectors** / **config**: markup catalogue and timing

pub mod batch;
pub mod collector;
pub mod config;
pub mod materialize;
pub mod places;
pub mod records;
pub mod reviews;
pub mod selectors;

#[cfg(test)]
mod sim;

pub use batch::{BatchOrchestrator, BatchReport, TargetOutcome, TargetStatus};
pub use collector::{Collection, CollectionState, Collector, Termination};
pub use config::{HarvestConfig, ScrollPolicy};
pub use materialize::{materialize_place, ReviewSession};
pub use places::{harvest_places, save_places, scrape_places, PlaceHarvest};
pub use records::{parse_lat_lng, Fingerprint, ItemHandle, PlaceRecord, ReviewRecord};
pub use reviews::{harvest_reviews, scrape_reviews, ReviewHarvest};
pub use selectors::{FieldSelectors, MapsSelectors};
