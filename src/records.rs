//! Harvested record types

use mapharvest_core::ElementRef;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters of review text that take part in the fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 100;

static PIN_COORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)").expect("valid regex"));
static VIEWPORT_COORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/@(-?\d+\.\d+),(-?\d+\.\d+)").expect("valid regex"));

/// A rendered list entry that has not been materialized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemHandle {
    pub element: ElementRef,
    /// Natural key, e.g. the entry's href
    pub key: String,
    /// Display text readable without navigation
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub link: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    pub phone: String,
    pub category: String,
}

impl PlaceRecord {
    /// A record with coordinates taken from the link and empty detail fields.
    pub fn from_link(name: impl Into<String>, link: impl Into<String>) -> Self {
        let link = link.into();
        let (latitude, longitude) = match parse_lat_lng(&link) {
            Some((lat, lng)) => (Some(lat), Some(lng)),
            None => (None, None),
        };
        Self {
            name: name.into(),
            link,
            latitude,
            longitude,
            address: String::new(),
            phone: String::new(),
            category: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "nama_tempat", alias = "place_name")]
    pub place_name: String,
    pub username: String,
    pub rating: String,
    pub review: String,
}

impl ReviewRecord {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.username, &self.review)
    }

    pub fn numeric_rating(&self) -> Option<f64> {
        self.rating.replace(',', ".").parse::<f64>().ok()
    }
}

/// Content identity of a review: no platform id is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub username: String,
    pub prefix: String,
}

impl Fingerprint {
    pub fn of(username: &str, text: &str) -> Self {
        Self {
            username: username.to_string(),
            prefix: text.chars().take(FINGERPRINT_PREFIX_CHARS).collect(),
        }
    }
}

/// Coordinates embedded in a place link: the pin (`!3d..!4d..`) first, then the viewport (`/@lat,lng`).
pub fn parse_lat_lng(link: &str) -> Option<(f64, f64)> {
    [&*PIN_COORDS, &*VIEWPORT_COORDS].iter().find_map(|re| {
        let caps = re.captures(link)?;
        let lat = caps.get(1)?.as_str().parse().ok()?;
        let lng = caps.get(2)?.as_str().parse().ok()?;
        Some((lat, lng))
    })
}

/// Mean of the ratings that parse as numbers.
pub fn mean_rating(reviews: &[ReviewRecord]) -> Option<f64> {
    let ratings: Vec<f64> = reviews.iter().filter_map(|r| r.numeric_rating()).collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}
