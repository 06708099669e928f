//! Selector catalogue for the Google Maps web UI
//!
//! Class names in the Maps front end are obfuscated and change without
//! notice, so every lookup that has broken in the past carries ordered
//! fallback variants. Edit here, not at call sites.

use mapharvest_core::{Selector, SelectorSet};
use serde::{Deserialize, Serialize};

/// Selectors for one detail field: inside the detail panel, and page-wide when no panel was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelectors {
    pub scoped: SelectorSet,
    pub page: SelectorSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsSelectors {
    // search
    pub search_input: SelectorSet,
    pub results_ready: SelectorSet,
    pub results_container: SelectorSet,
    pub place_anchor: Selector,

    // place detail
    pub place_title: SelectorSet,
    /// Resolved from the opened title, never page-wide
    pub detail_root: SelectorSet,
    pub category: FieldSelectors,
    pub address: FieldSelectors,
    pub phone: FieldSelectors,

    // reviews
    pub review_section: SelectorSet,
    pub more_reviews: SelectorSet,
    pub review_panel: SelectorSet,
    pub review_container: Selector,
    pub review_id_attribute: String,
    pub review_username: SelectorSet,
    pub review_rating: SelectorSet,
    pub review_text: SelectorSet,
    pub review_expand: SelectorSet,

    /// Photo strips and promo blocks that cover the review feed.
    pub clutter: Vec<Selector>,
}

impl Default for MapsSelectors {
    fn default() -> Self {
        Self {
            search_input: SelectorSet::css(&["input.searchboxinput"]),
            results_ready: SelectorSet::css(&["div.m6QErb"]),
            results_container: SelectorSet::css(&[
                "div.m6QErb.DxyBCb.kA9KIf.dS8AEf.XiKgde.ecceSd",
                "div.m6QErb.DxyBCb.kA9KIf.dS8AEf.XiKgde",
                "div.m6QErb.DxyBCb.kA9KIf.dS8AEf",
                "div.m6QErb.DxyBCb",
            ]),
            place_anchor: Selector::css("a.hfpxzc"),

            place_title: SelectorSet::css(&["h1.DUwDvf.lfPIob", "h1.DUwDvf"]),
            detail_root: SelectorSet::xpath(&["./ancestor::div[contains(@class,'m6QErb')][1]"]),
            category: FieldSelectors {
                scoped: SelectorSet::css(&["button.DkEaL"]),
                page: SelectorSet::xpath(&["//button[contains(@class,'DkEaL')]"]),
            },
            address: FieldSelectors {
                scoped: SelectorSet::css(&[
                    "button[data-item-id='address'] div.Io6YTe",
                    "[data-item-id='address'] div.Io6YTe",
                ])
                .then(SelectorSet::xpath(&[
                    ".//button[contains(@aria-label,'Alamat')]/div[contains(@class,'Io6YTe')]",
                ])),
                page: SelectorSet::xpath(&[
                    "//button[contains(@aria-label,'Alamat')]/div[contains(@class,'Io6YTe')]",
                    "//button[contains(@data-item-id,'address')]/div[contains(@class,'Io6YTe')]",
                    "//div[contains(@class,'Io6YTe') and ancestor::button[contains(@aria-label,'Alamat')]]",
                ]),
            },
            phone: FieldSelectors {
                scoped: SelectorSet::xpath(&[
                    ".//button[contains(@aria-label,'Telepon')]/div[contains(@class,'Io6YTe')]",
                    ".//button[contains(@aria-label,'Nomor')]/div[contains(@class,'Io6YTe')]",
                    ".//button[contains(@data-item-id,'phone')]/div[contains(@class,'Io6YTe')]",
                    ".//a[starts-with(@href,'tel:')]",
                ])
                .then(SelectorSet::css(&[
                    "button[data-item-id^='phone'] div.Io6YTe",
                    "a[href^='tel:']",
                ])),
                page: SelectorSet::xpath(&[
                    "//button[contains(@aria-label,'Telepon')]/div[contains(@class,'Io6YTe')]",
                    "//button[contains(@aria-label,'Nomor')]/div[contains(@class,'Io6YTe')]",
                    "//button[contains(@data-item-id,'phone')]/div[contains(@class,'Io6YTe')]",
                    "//a[starts-with(@href,'tel:')]",
                ]),
            },

            review_section: SelectorSet::css(&["div.m6QErb.WNBkOb.XiKgde"]),
            more_reviews: SelectorSet::css(&["button.M77dve[aria-label*='Ulasan lainnya']"]),
            review_panel: SelectorSet::css(&[
                "div.m6QErb.DxyBCb.dS8AEf.XiKgde",
                "div.m6QErb.DxyBCb.kA9KIf.dS8AEf.XiKgde",
                "div.m6QErb.DxyBCb.dS8AEf",
                "div.m6QErb.DxyBCb",
            ]),
            review_container: Selector::css("div.jftiEf"),
            review_id_attribute: "data-review-id".to_string(),
            review_username: SelectorSet::css(&["div.d4r55"]),
            review_rating: SelectorSet::css(&["span.kvMYJc"]),
            review_text: SelectorSet::css(&["span.wiI7pd"]),
            review_expand: SelectorSet::css(&["button.w8nwRe.kyuRq"]),

            clutter: [
                "button.Tya61d",
                "div[jslog=\"127691\"]",
                "div.nUH3Jc",
                "div.vyucnb",
                "div.PPCwl",
                "div.AyRUI",
                "div.m6QErb.Hk4XGb.QoaCgb.XiKgde.KoSBEe.tLjsW",
                "div.m6QErb.Pf6ghf.XiKgde.KoSBEe.ecceSd.tLjsW",
                "div.m6QErb.XiKgde.tLjsW",
            ]
            .iter()
            .map(|expr| Selector::css(expr))
            .collect(),
        }
    }
}
