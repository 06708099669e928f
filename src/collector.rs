//! Incremental collector for virtualized scroll containers
//!
//! The list only keeps a window of items rendered, and element identities
//! churn on every re-render. The collector therefore tracks natural keys
//! rather than elements: each iteration re-scans the container, merges the
//! keys into the accumulated set and compares the cardinality with the
//! high-water mark.
//!
//! Termination is checked in a fixed order on every iteration: target,
//! stagnation, attempts. Each non-terminating iteration counts one scroll
//! attempt, so a run performs at most `max_attempts + 1` scans.

use crate::config::ScrollPolicy;
use crate::records::ItemHandle;
use mapharvest_core::{ElementRef, Key, Renderer, Result, Scope, Selector};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Termination {
    TargetMet,
    Stagnant,
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    seen: HashSet<String>,
    high_water: usize,
    stagnant: u32,
    attempts: u32,
    scans: u32,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct keys seen so far. Never decreases.
    pub fn unique(&self) -> usize {
        self.high_water
    }

    pub fn stagnant(&self) -> u32 {
        self.stagnant
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn scans(&self) -> u32 {
        self.scans
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    /// Merge one scan's keys. Returns whether the distinct count grew.
    pub fn observe<I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        self.scans += 1;
        self.seen.extend(keys);
        let unique = self.seen.len();
        if unique > self.high_water {
            self.high_water = unique;
            self.stagnant = 0;
            true
        } else {
            self.stagnant += 1;
            false
        }
    }

    fn record_attempt(&mut self) {
        self.attempts += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub state: CollectionState,
    pub termination: Termination,
}

/// Scroll-and-collect over one container, parameterized by key extraction.
pub struct Collector<'a, K> {
    container: ElementRef,
    items: &'a Selector,
    policy: &'a ScrollPolicy,
    key: K,
    label_attribute: Option<&'a str>,
    obstructions: &'a [Selector],
}

impl<'a, K> Collector<'a, K>
where
    K: FnMut(&mut dyn Renderer, ElementRef) -> Option<String>,
{
    pub fn new(
        container: ElementRef,
        items: &'a Selector,
        policy: &'a ScrollPolicy,
        key: K,
    ) -> Self {
        Self {
            container,
            items,
            policy,
            key,
            label_attribute: None,
            obstructions: &[],
        }
    }

    /// Attribute read into `ItemHandle::label` by `handles`.
    pub fn labelled_by(mut self, attribute: &'a str) -> Self {
        self.label_attribute = Some(attribute);
        self
    }

    /// Elements hidden by the maintenance hook.
    pub fn hiding(mut self, obstructions: &'a [Selector]) -> Self {
        self.obstructions = obstructions;
        self
    }

    /// Run until the policy's target, stagnation or the attempt cap.
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Collection {
        let policy = self.policy;
        self.run_until(renderer, CollectionState::new(), |state| {
            policy.target_met(state.unique())
        })
    }

    pub fn run_until<P>(
        &mut self,
        renderer: &mut dyn Renderer,
        mut state: CollectionState,
        mut stop: P,
    ) -> Collection
    where
        P: FnMut(&CollectionState) -> bool,
    {
        let mut last_height = None;
        loop {
            let keys = match self.scan(renderer) {
                Ok(keys) => keys,
                Err(err) if err.is_transient() => {
                    debug!(%err, "scan failed, counting as no change");
                    Vec::new()
                }
                Err(err) => {
                    warn!(%err, "scan failed, counting as no change");
                    Vec::new()
                }
            };
            state.observe(keys.into_iter().map(|(_, key)| key));

            let termination = if stop(&state) {
                Some(Termination::TargetMet)
            } else if state.stagnant >= self.policy.max_stagnant {
                Some(Termination::Stagnant)
            } else if state.attempts >= self.policy.max_attempts {
                Some(Termination::Exhausted)
            } else {
                None
            };
            if let Some(termination) = termination {
                info!(
                    unique = state.unique(),
                    scans = state.scans(),
                    attempts = state.attempts(),
                    ?termination,
                    "collection finished"
                );
                return Collection { state, termination };
            }

            if let Err(err) = self.step(renderer, &mut last_height) {
                debug!(%err, "scroll step failed");
                renderer.pause(self.policy.pause);
            }
            state.record_attempt();

            if let Some(every) = self.policy.maintenance_every.filter(|n| *n > 0) {
                if state.attempts % every == 0 && !self.obstructions.is_empty() {
                    match renderer.hide_matching(self.obstructions) {
                        Ok(hidden) => debug!(hidden, "hid obstructing elements"),
                        Err(err) => debug!(%err, "hiding obstructions failed"),
                    }
                }
            }
            if self.policy.progress_every > 0 && state.attempts % self.policy.progress_every == 0 {
                info!(
                    unique = state.unique(),
                    attempts = state.attempts(),
                    stagnant = state.stagnant(),
                    "still collecting"
                );
            }
        }
    }

    /// Re-scan once more: rendered items in document order, one per key.
    pub fn handles(&mut self, renderer: &mut dyn Renderer) -> Result<Vec<ItemHandle>> {
        let mut seen = HashSet::new();
        let mut handles = Vec::new();
        for (element, key) in self.scan(renderer)? {
            if !seen.insert(key.clone()) {
                continue;
            }
            let label = match self.label_attribute {
                Some(attribute) => renderer
                    .read_attribute(element, attribute)
                    .ok()
                    .flatten()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                None => String::new(),
            };
            handles.push(ItemHandle {
                element,
                key,
                label,
            });
        }
        Ok(handles)
    }

    fn scan(&mut self, renderer: &mut dyn Renderer) -> Result<Vec<(ElementRef, String)>> {
        let elements = renderer.find_all(Scope::Within(self.container), self.items)?;
        let mut keyed = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(key) = (self.key)(renderer, element) {
                keyed.push((element, key));
            }
        }
        Ok(keyed)
    }

    fn step(&self, renderer: &mut dyn Renderer, last_height: &mut Option<i64>) -> Result<()> {
        let container = self.container;
        let top_before = renderer.scroll_top(container)?;
        let height = renderer.scroll_height(container)?;
        renderer.scroll_by(container, self.policy.scroll_delta)?;
        renderer.pause(self.policy.pause);

        let top_after = renderer.scroll_top(container)?;
        let stuck = top_after == top_before && *last_height == Some(height);
        *last_height = Some(height);
        if stuck {
            debug!("scroll position unchanged, sending PageDown");
            renderer.send_key(container, Key::PageDown)?;
            renderer.pause(self.policy.pause);
        }
        Ok(())
    }
}

/// Key extractor reading a non-empty attribute, e.g. `href`.
pub fn attribute_key(
    attribute: &str,
) -> impl FnMut(&mut dyn Renderer, ElementRef) -> Option<String> + '_ {
    move |renderer, element| {
        renderer
            .read_attribute(element, attribute)
            .ok()
            .flatten()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
