//! Item materializer: turn a collected handle into a typed record
//!
//! Fields are read through `Locator::text`, so a missing field folds to its
//! default instead of failing the item. Only opening the item (the click)
//! can abort it.

use crate::config::HarvestConfig;
use crate::records::{Fingerprint, ItemHandle, PlaceRecord, ReviewRecord};
use crate::selectors::{FieldSelectors, MapsSelectors};
use mapharvest_core::{
    ElementRef, Error, Locator, Lookup, Renderer, Result, Scope, SelectorSet, WaitMode,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const UNKNOWN_RATING: &str = "Unknown";

/// Open a place from the results list and read its detail panel.
pub fn materialize_place(
    renderer: &mut dyn Renderer,
    handle: &ItemHandle,
    selectors: &MapsSelectors,
    config: &HarvestConfig,
) -> Result<PlaceRecord> {
    open_place(renderer, handle.element, config)?;

    let shown = Locator::new(selectors.place_title.clone())
        .mode(WaitMode::Visible)
        .timeout(config.detail_timeout)
        .find(renderer);
    let title = match shown {
        Ok(Some(_)) => opened_title(renderer, handle, &selectors.place_title),
        _ => None,
    };
    if title.is_none() {
        debug!(key = %handle.key, "detail title not visible, continuing after grace pause");
        renderer.pause(config.detail_grace);
    }

    let root = title.and_then(|title| {
        Locator::new(selectors.detail_root.clone())
            .within(title)
            .find(renderer)
            .unwrap_or_else(|err| {
                debug!(%err, "detail root lookup failed");
                None
            })
    });
    let fields = DetailFields { root };

    let name = fields
        .read(renderer, &selectors.place_title, &selectors.place_title)
        .unwrap_or_else(|| handle.label.clone());
    let category = fields.field(renderer, &selectors.category);
    let address = fields.field(renderer, &selectors.address);
    let phone = fields.field(renderer, &selectors.phone);

    let mut record = PlaceRecord::from_link(name, handle.key.clone());
    record.category = category;
    record.address = address;
    record.phone = phone;
    info!(
        name = %record.name,
        category = %record.category,
        phone = %record.phone,
        scoped = root.is_some(),
        "place extracted"
    );
    Ok(record)
}

/// Title of the panel just opened: the visible one reading the item's label,
/// else the last visible one. An older panel may still be mounted.
fn opened_title(
    renderer: &mut dyn Renderer,
    handle: &ItemHandle,
    titles: &SelectorSet,
) -> Option<ElementRef> {
    let label = handle.label.trim().to_lowercase();
    for selector in titles.iter() {
        let visible: Vec<ElementRef> = match renderer.find_all(Scope::Page, selector) {
            Ok(found) => found
                .into_iter()
                .filter(|e| renderer.is_visible(*e).unwrap_or(false))
                .collect(),
            Err(err) => {
                debug!(%selector, %err, "title lookup failed");
                continue;
            }
        };
        let labelled = visible.iter().copied().find(|e| {
            !label.is_empty()
                && renderer
                    .read_text(*e)
                    .map_or(false, |text| text.trim().to_lowercase() == label)
        });
        if let Some(title) = labelled.or_else(|| visible.last().copied()) {
            return Some(title);
        }
    }
    None
}

/// Script click first, direct click as fallback.
fn open_place(
    renderer: &mut dyn Renderer,
    element: ElementRef,
    config: &HarvestConfig,
) -> Result<()> {
    let scripted = renderer.scroll_into_view(element).and_then(|()| {
        renderer.pause(config.click_settle);
        renderer.click_script(element)
    });
    let script_err = match scripted {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    debug!(%element, err = %script_err, "script click failed, trying direct click");
    renderer.click_direct(element).map_err(|direct_err| {
        Error::action_failed(
            "open place",
            &format!("script: {}; direct: {}", script_err.message, direct_err.message),
        )
    })
}

/// Lookups scoped to the detail panel, or page-wide when it was not found.
struct DetailFields {
    root: Option<ElementRef>,
}

impl DetailFields {
    fn field(&self, renderer: &mut dyn Renderer, field: &FieldSelectors) -> String {
        self.read(renderer, &field.scoped, &field.page)
            .unwrap_or_default()
    }

    fn read(
        &self,
        renderer: &mut dyn Renderer,
        scoped: &SelectorSet,
        page: &SelectorSet,
    ) -> Option<String> {
        let (selectors, scope) = match self.root {
            Some(root) => (scoped, Scope::Within(root)),
            None => (page, Scope::Page),
        };
        let lookup = Locator::new(selectors.clone()).scope(scope).text(renderer);
        if let Lookup::NotFound = lookup {
            debug!(%selectors, "field not found");
        }
        lookup.found()
    }
}

/// Review extraction for one place, deduplicating by content fingerprint.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    place_name: String,
    seen: HashSet<Fingerprint>,
}

impl ReviewSession {
    pub fn new(place_name: impl Into<String>) -> Self {
        Self {
            place_name: place_name.into(),
            seen: HashSet::new(),
        }
    }

    pub fn place_name(&self) -> &str {
        &self.place_name
    }

    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// `None` when the container has no username or text, or repeats a seen review.
    pub fn materialize(
        &mut self,
        renderer: &mut dyn Renderer,
        container: ElementRef,
        selectors: &MapsSelectors,
        config: &HarvestConfig,
    ) -> Option<ReviewRecord> {
        let username = Locator::new(selectors.review_username.clone())
            .within(container)
            .text(renderer)
            .unwrap_or_default();
        let rating = Locator::new(selectors.review_rating.clone())
            .within(container)
            .attribute(renderer, "aria-label")
            .map(|label| leading_token(&label))
            .found()
            .flatten()
            .unwrap_or_else(|| UNKNOWN_RATING.to_string());

        expand(renderer, container, &selectors.review_expand, config);

        let review = Locator::new(selectors.review_text.clone())
            .within(container)
            .text(renderer)
            .unwrap_or_default();

        if username.is_empty() || review.is_empty() {
            debug!(%container, "review without username or text skipped");
            return None;
        }
        if !self.seen.insert(Fingerprint::of(&username, &review)) {
            debug!(%username, "duplicate review skipped");
            return None;
        }
        Some(ReviewRecord {
            place_name: self.place_name.clone(),
            username,
            rating,
            review,
        })
    }
}

fn leading_token(label: &str) -> Option<String> {
    label.split_whitespace().next().map(str::to_string)
}

fn expand(
    renderer: &mut dyn Renderer,
    container: ElementRef,
    button: &SelectorSet,
    config: &HarvestConfig,
) {
    let found = Locator::new(button.clone())
        .within(container)
        .mode(WaitMode::Visible)
        .find(renderer);
    let button = match found {
        Ok(Some(button)) => button,
        Ok(None) => return,
        Err(err) => {
            debug!(%err, "expand button lookup failed");
            return;
        }
    };
    let clicked = renderer.scroll_into_view(button).and_then(|()| {
        renderer.pause(config.click_settle);
        renderer.click_script(button)
    });
    match clicked {
        Ok(()) => renderer.pause(config.expand_settle),
        Err(err) => warn!(%err, "could not expand review text"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{attribute_key, Collector};
    use crate::sim::{places_page, reviews_page, NodeSpec, SimPage, SimPlace, SimReview, DETAIL};

    fn place_handles(page: &mut SimPage, selectors: &MapsSelectors) -> Vec<ItemHandle> {
        let config = HarvestConfig::instant();
        let container = page.container();
        let mut collector = Collector::new(
            container,
            &selectors.place_anchor,
            &config.list_scroll,
            attribute_key("href"),
        )
        .labelled_by("aria-label");
        collector.run(page);
        collector.handles(page).unwrap()
    }

    fn review_containers(page: &mut SimPage) -> Vec<ElementRef> {
        let selectors = MapsSelectors::default();
        let container = page.container();
        page.find_all(Scope::Within(container), &selectors.review_container)
            .unwrap()
    }

    #[test]
    fn place_fields_come_from_detail_panel() {
        let selectors = MapsSelectors::default();
        let places = vec![SimPlace::new(
            "Bakso President",
            "https://www.google.com/maps/place/Bakso/data=!3d-7.98!4d112.63",
        )];
        let mut page = places_page(&places, &[1]);
        let handles = place_handles(&mut page, &selectors);
        let record =
            materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
                .unwrap();
        assert_eq!(record.name, "Bakso President");
        assert_eq!(record.category, "Restoran");
        assert_eq!(record.address, "Jl. Bakso President No. 1, Malang");
        assert_eq!(record.phone, "0341 123456");
        assert_eq!(record.latitude, Some(-7.98));
        assert_eq!(record.longitude, Some(112.63));
        assert!(page.log().iter().any(|e| e.starts_with("click_script")));
    }

    #[test]
    fn missing_address_keeps_the_record() {
        let selectors = MapsSelectors::default();
        let mut place = SimPlace::new("Warung Sari", "https://maps/place/warung");
        place.address = None;
        let mut page = places_page(&[place], &[1]);
        let handles = place_handles(&mut page, &selectors);
        let record =
            materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
                .unwrap();
        assert_eq!(record.name, "Warung Sari");
        assert_eq!(record.address, "");
        assert_eq!(record.latitude, None);
    }

    #[test]
    fn untitled_panel_falls_back_to_page_lookups_and_label() {
        let selectors = MapsSelectors::default();
        let mut place = SimPlace::new("Kopi Tuku", "https://maps/place/kopi");
        place.untitled = true;
        let mut page = places_page(&[place], &[1]);
        let handles = place_handles(&mut page, &selectors);
        let record =
            materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
                .unwrap();
        assert_eq!(record.name, "Kopi Tuku");
        assert_eq!(record.category, "");
        assert_eq!(record.address, "");
    }

    #[test]
    fn leftover_panel_does_not_leak_into_the_opened_place() {
        let selectors = MapsSelectors::default();
        let place = SimPlace::new("Bakso Baru", "https://maps/place/bakso-baru");
        let mut page = places_page(&[place], &[1]);
        page.mount(
            None,
            DETAIL,
            NodeSpec::new()
                .child(
                    &selectors.place_title.variants[0].expr,
                    NodeSpec::new().text("Warung Lama"),
                )
                .child(
                    &selectors.address.scoped.variants[0].expr,
                    NodeSpec::new().text("Jl. Lama 9"),
                ),
        );
        let handles = place_handles(&mut page, &selectors);
        let record =
            materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
                .unwrap();
        assert_eq!(record.name, "Bakso Baru");
        assert_eq!(record.address, "Jl. Bakso Baru No. 1, Malang");
    }

    #[test]
    fn place_without_phone_reads_no_phone_from_other_rows() {
        let selectors = MapsSelectors::default();
        let mut place = SimPlace::new("Warung Sari", "https://maps/place/warung");
        place.phone = None;
        place.extra_rows = vec![(
            "div.Io6YTe.fontBodyMedium.kR99db".to_string(),
            "Jl. Ijen 5, Malang".to_string(),
        )];
        let mut page = places_page(&[place], &[1]);
        let handles = place_handles(&mut page, &selectors);
        let record =
            materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
                .unwrap();
        assert_eq!(record.phone, "");
        assert_eq!(record.address, "Jl. Warung Sari No. 1, Malang");
    }

    #[test]
    fn unclickable_place_aborts_only_that_item() {
        let selectors = MapsSelectors::default();
        let mut place = SimPlace::new("Tutup", "https://maps/place/tutup");
        place.unclickable = true;
        let mut page = places_page(&[place], &[1]);
        let handles = place_handles(&mut page, &selectors);
        let err = materialize_place(&mut page, &handles[0], &selectors, &HarvestConfig::instant())
            .unwrap_err();
        assert_eq!(err.code, mapharvest_core::ErrorCode::ActionFailed);
    }

    #[test]
    fn same_review_twice_yields_one_record() {
        let selectors = MapsSelectors::default();
        let text = format!("{} lalu pulang", "Baksonya enak sekali ".repeat(6));
        let mut second = text.clone();
        second.push_str(" dan kembali lagi");
        let reviews = vec![
            SimReview::new("r1", "Budi", &text),
            SimReview::new("r2", "Budi", &second),
        ];
        let mut page = reviews_page("Bakso President", vec![reviews]);
        let mut session = ReviewSession::new("Bakso President");
        let config = HarvestConfig::instant();
        let records: Vec<ReviewRecord> = review_containers(&mut page)
            .into_iter()
            .filter_map(|c| session.materialize(&mut page, c, &selectors, &config))
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].username, "Budi");
        assert_eq!(records[0].rating, "5");
        assert_eq!(session.seen(), 1);
    }

    #[test]
    fn expand_reveals_full_text_and_missing_stars_are_unknown() {
        let selectors = MapsSelectors::default();
        let mut review = SimReview::new("r1", "Sari", "Tempatnya nyaman ...");
        review.full_text = Some("Tempatnya nyaman dan bersih, harga terjangkau".into());
        review.stars = None;
        let mut page = reviews_page("Kopi", vec![vec![review]]);
        let mut session = ReviewSession::new("Kopi");
        let container = review_containers(&mut page)[0];
        let record = session
            .materialize(&mut page, container, &selectors, &HarvestConfig::instant())
            .unwrap();
        assert_eq!(record.review, "Tempatnya nyaman dan bersih, harga terjangkau");
        assert_eq!(record.rating, UNKNOWN_RATING);
    }

    #[test]
    fn empty_username_or_text_is_dropped() {
        let selectors = MapsSelectors::default();
        let reviews = vec![
            SimReview::new("r1", "", "enak"),
            SimReview::new("r2", "Budi", "   "),
        ];
        let mut page = reviews_page("Kopi", vec![reviews]);
        let mut session = ReviewSession::new("Kopi");
        let config = HarvestConfig::instant();
        for container in review_containers(&mut page) {
            assert!(session
                .materialize(&mut page, container, &selectors, &config)
                .is_none());
        }
        assert_eq!(session.seen(), 0);
    }

    #[test]
    fn leading_token_of_star_label() {
        assert_eq!(leading_token(" 4 bintang "), Some("4".to_string()));
        assert_eq!(leading_token(""), None);
    }
}
