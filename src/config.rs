//! Harvest configuration: defaults in code, `.env` and `MAPHARVEST_*` overrides

use mapharvest_core::ChromeOptions;
use std::{env, io, time::Duration};
use tracing::debug;

/// How a scroll-and-collect loop advances and when it gives up.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPolicy {
    /// Settle delay after each scroll step
    pub pause: Duration,
    pub max_attempts: u32,
    /// Consecutive scans without a new key before stopping
    pub max_stagnant: u32,
    pub scroll_delta: i64,
    /// Stop once this many distinct keys were seen
    pub target: Option<usize>,
    /// Run the maintenance hook every N scroll steps
    pub maintenance_every: Option<u32>,
    pub progress_every: u32,
}

impl ScrollPolicy {
    pub fn results_list() -> Self {
        Self {
            pause: Duration::from_millis(1200),
            max_attempts: 300,
            max_stagnant: 8,
            scroll_delta: 1200,
            target: None,
            maintenance_every: None,
            progress_every: 10,
        }
    }

    pub fn reviews_panel() -> Self {
        Self {
            pause: Duration::from_millis(1500),
            scroll_delta: 1800,
            maintenance_every: Some(4),
            ..Self::results_list()
        }
    }

    pub fn with_target(mut self, target: Option<usize>) -> Self {
        self.target = target;
        self
    }

    pub fn target_met(&self, unique: usize) -> bool {
        self.target.map_or(false, |target| unique >= target)
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::results_list()
    }
}

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub maps_url: String,
    pub list_scroll: ScrollPolicy,
    pub review_scroll: ScrollPolicy,

    pub search_timeout: Duration,
    pub results_pause: Duration,
    pub container_polls: u32,
    pub poll_interval: Duration,

    /// Wait for the detail title after opening a place
    pub detail_timeout: Duration,
    pub detail_grace: Duration,
    pub click_settle: Duration,

    pub page_load_pause: Duration,
    pub panel_timeout: Duration,
    pub section_pause: Duration,
    pub panel_open_pause: Duration,
    pub preload_delta: i64,
    pub expand_settle: Duration,

    pub inter_target_delay: Duration,
    pub browser: ChromeOptions,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            maps_url: "https://www.google.com/maps".to_string(),
            list_scroll: ScrollPolicy::results_list(),
            review_scroll: ScrollPolicy::reviews_panel(),
            search_timeout: Duration::from_secs(20),
            results_pause: Duration::from_secs(2),
            container_polls: 20,
            poll_interval: Duration::from_millis(500),
            detail_timeout: Duration::from_secs(15),
            detail_grace: Duration::from_secs(1),
            click_settle: Duration::from_millis(200),
            page_load_pause: Duration::from_secs(5),
            panel_timeout: Duration::from_secs(10),
            section_pause: Duration::from_secs(2),
            panel_open_pause: Duration::from_secs(3),
            preload_delta: 1000,
            expand_settle: Duration::from_millis(300),
            inter_target_delay: Duration::from_secs(2),
            browser: ChromeOptions::default(),
        }
    }
}

impl HarvestConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        let defaults = Self::default();

        let mut list_scroll = defaults.list_scroll.clone();
        let mut review_scroll = defaults.review_scroll.clone();
        for policy in [&mut list_scroll, &mut review_scroll] {
            policy.max_attempts = parse_u32("MAPHARVEST_MAX_ATTEMPTS", policy.max_attempts);
            policy.max_stagnant = parse_u32("MAPHARVEST_MAX_STAGNANT", policy.max_stagnant);
        }
        list_scroll.pause = parse_millis("MAPHARVEST_LIST_PAUSE_MS", list_scroll.pause);
        review_scroll.pause = parse_millis("MAPHARVEST_REVIEW_PAUSE_MS", review_scroll.pause);

        let mut browser = defaults.browser.clone();
        browser.headless = parse_bool("MAPHARVEST_HEADLESS", browser.headless);
        if let Some(language) = non_empty_var("MAPHARVEST_LANG") {
            browser.language = language;
        }

        Self {
            maps_url: non_empty_var("MAPHARVEST_MAPS_URL").unwrap_or(defaults.maps_url),
            list_scroll,
            review_scroll,
            detail_timeout: parse_millis("MAPHARVEST_DETAIL_TIMEOUT_MS", defaults.detail_timeout),
            panel_timeout: parse_millis("MAPHARVEST_PANEL_TIMEOUT_MS", defaults.panel_timeout),
            inter_target_delay: parse_millis(
                "MAPHARVEST_INTER_TARGET_DELAY_MS",
                defaults.inter_target_delay,
            ),
            browser,
            ..defaults
        }
    }

    pub fn with_delay(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds >= 0.0 {
            self.inter_target_delay = Duration::from_secs_f64(seconds);
        }
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.browser.headless = headless;
        self
    }

    /// Every delay zeroed; the simulated page needs no settling.
    #[cfg(test)]
    pub(crate) fn instant() -> Self {
        let mut config = Self::default();
        for policy in [&mut config.list_scroll, &mut config.review_scroll] {
            policy.pause = Duration::ZERO;
        }
        config.search_timeout = Duration::ZERO;
        config.results_pause = Duration::ZERO;
        config.poll_interval = Duration::ZERO;
        config.detail_timeout = Duration::ZERO;
        config.detail_grace = Duration::ZERO;
        config.click_settle = Duration::ZERO;
        config.page_load_pause = Duration::ZERO;
        config.panel_timeout = Duration::ZERO;
        config.section_pause = Duration::ZERO;
        config.panel_open_pause = Duration::ZERO;
        config.expand_settle = Duration::ZERO;
        config.inter_target_delay = Duration::ZERO;
        config
    }
}

fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        match &err {
            dotenvy::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {}
            _ => debug!(?err, "unable to load .env file"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(default)
}

fn parse_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_millis(key: &str, default: Duration) -> Duration {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
