//! In-memory map page for exercising the harvesting protocol
//!
//! Models what makes the real page awkward: a virtualized feed that renders
//! a window of items per scroll position and hands out fresh element ids on
//! every render, a detail panel that replaces the previous one on click,
//! truncated review text behind an expand button, and injectable failures.

use crate::selectors::MapsSelectors;
use mapharvest_core::{
    ElementRef, Error, Key, Launcher, Renderer, Result, Scope, Selector, SelectorSet, WaitMode,
};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

pub const CONTAINER: &str = "div.sim-feed";
pub const ITEM: &str = "a.sim-item";
pub const DETAIL: &str = "div.m6QErb.sim-detail";

const FAIL_DIRECT: &str = "sim-fail-direct";
const FAIL_SCRIPT: &str = "sim-fail-script";
const FULL_TEXT: &str = "sim-full";
const EXPANDS: &str = "sim-expands";
const SCROLL_STEP: i64 = 1000;

pub type SimLog = Rc<RefCell<Vec<String>>>;

#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    text: String,
    attrs: Vec<(String, String)>,
    hidden: bool,
    children: Vec<(String, NodeSpec)>,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, selector: &str, child: NodeSpec) -> Self {
        self.children.push((selector.to_string(), child));
        self
    }
}

#[derive(Debug)]
struct Node {
    selector: String,
    parent: Option<u64>,
    text: String,
    attrs: HashMap<String, String>,
    hidden: bool,
    alive: bool,
}

#[derive(Debug)]
struct Feed {
    container: u64,
    item: String,
    frames: Vec<Vec<NodeSpec>>,
    frame: usize,
    rendered: Vec<u64>,
    programmatic_scroll: bool,
}

#[derive(Debug)]
pub struct SimPage {
    nodes: Vec<Node>,
    feed: Option<Feed>,
    details: HashMap<String, (String, NodeSpec)>,
    mounted_detail: Option<u64>,
    fail_scans: bool,
    fail_navigate: bool,
    closed: bool,
    log: SimLog,
}

impl Default for SimPage {
    fn default() -> Self {
        Self::new()
    }
}

impl SimPage {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            feed: None,
            details: HashMap::new(),
            mounted_detail: None,
            fail_scans: false,
            fail_navigate: false,
            closed: false,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn mount(
        &mut self,
        parent: Option<ElementRef>,
        selector: &str,
        spec: NodeSpec,
    ) -> ElementRef {
        let id = self.nodes.len() as u64;
        self.nodes.push(Node {
            selector: selector.to_string(),
            parent: parent.map(|p| p.0),
            text: spec.text,
            attrs: spec.attrs.into_iter().collect(),
            hidden: spec.hidden,
            alive: true,
        });
        for (child_selector, child) in spec.children {
            self.mount(Some(ElementRef(id)), &child_selector, child);
        }
        ElementRef(id)
    }

    /// Detach every node matching `selector`, with its subtree.
    pub fn remove(&mut self, selector: &str) {
        let matching: Vec<u64> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive && n.selector == selector)
            .map(|(i, _)| i as u64)
            .collect();
        for id in matching {
            self.unmount(id);
        }
    }

    /// Turn `container` into a virtualized feed of `item` nodes, one frame per scroll position.
    pub fn feed(&mut self, container: ElementRef, item: &str, frames: Vec<Vec<NodeSpec>>) {
        self.feed = Some(Feed {
            container: container.0,
            item: item.to_string(),
            frames,
            frame: 0,
            rendered: Vec::new(),
            programmatic_scroll: true,
        });
    }

    pub fn container(&self) -> ElementRef {
        ElementRef(self.feed.as_ref().map_or(0, |f| f.container))
    }

    pub fn ignore_programmatic_scroll(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.programmatic_scroll = false;
        }
    }

    pub fn fail_all_scans(&mut self) {
        self.fail_scans = true;
    }

    pub fn fail_navigation(&mut self) {
        self.fail_navigate = true;
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn log_handle(&self) -> SimLog {
        Rc::clone(&self.log)
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }

    fn unmount(&mut self, id: u64) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current as usize) {
                node.alive = false;
            }
            stack.extend(
                self.nodes
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.alive && n.parent == Some(current))
                    .map(|(i, _)| i as u64),
            );
        }
    }

    fn node(&self, element: ElementRef) -> Result<&Node> {
        if self.closed {
            return Err(Error::session_failed("session closed"));
        }
        match self.nodes.get(element.0 as usize) {
            Some(node) if node.alive => Ok(node),
            _ => Err(Error::stale(element.0)),
        }
    }

    fn is_descendant(&self, id: u64, ancestor: u64) -> bool {
        let mut current = self.nodes.get(id as usize).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(parent as usize).and_then(|n| n.parent);
        }
        false
    }

    /// Nearest live ancestor of `id` carrying `class`.
    fn ancestor_with_class(&self, id: u64, class: &str) -> Option<u64> {
        let mut current = self.nodes.get(id as usize).and_then(|n| n.parent);
        while let Some(parent) = current {
            let node = self.nodes.get(parent as usize)?;
            if node.alive && node.selector.split('.').any(|c| c == class) {
                return Some(parent);
            }
            current = node.parent;
        }
        None
    }

    fn advance(&mut self) {
        if let Some(feed) = self.feed.as_mut() {
            feed.frame = (feed.frame + 1).min(feed.frames.len().saturating_sub(1));
        }
    }

    fn is_feed(&self, element: ElementRef) -> bool {
        self.feed.as_ref().map_or(false, |f| f.container == element.0)
    }

    fn render_feed(&mut self) -> Result<Vec<ElementRef>> {
        if self.fail_scans {
            return Err(Error::script_failed("feed scan failed"));
        }
        let Some(feed) = self.feed.as_mut() else {
            return Ok(Vec::new());
        };
        let stale = std::mem::take(&mut feed.rendered);
        let container = feed.container;
        let item = feed.item.clone();
        let frame = feed.frames.get(feed.frame).cloned().unwrap_or_default();
        for id in stale {
            self.unmount(id);
        }
        let mut rendered = Vec::with_capacity(frame.len());
        for spec in frame {
            rendered.push(self.mount(Some(ElementRef(container)), &item, spec));
        }
        if let Some(feed) = self.feed.as_mut() {
            feed.rendered = rendered.iter().map(|e| e.0).collect();
        }
        Ok(rendered)
    }

    fn activate(&mut self, element: ElementRef) {
        let (href, expands, parent) = match self.nodes.get(element.0 as usize) {
            Some(node) => (
                node.attrs.get("href").cloned(),
                node.attrs.contains_key(EXPANDS),
                node.parent,
            ),
            None => return,
        };
        if let Some((selector, detail)) = href.and_then(|h| self.details.get(&h).cloned()) {
            if let Some(previous) = self.mounted_detail.take() {
                self.unmount(previous);
            }
            self.mounted_detail = Some(self.mount(None, &selector, detail).0);
        }
        if expands {
            for node in self.nodes.iter_mut().filter(|n| n.alive && n.parent == parent) {
                if let Some(full) = node.attrs.get(FULL_TEXT).cloned() {
                    node.text = full;
                }
            }
        }
    }

    fn click_with(&mut self, element: ElementRef, fail_attr: &str, tier: &str) -> Result<()> {
        if self.node(element)?.attrs.contains_key(fail_attr) {
            return Err(Error::action_failed(tier, "element intercepted the click"));
        }
        self.record(format!("{} {}", tier, element));
        self.activate(element);
        Ok(())
    }
}

impl Renderer for SimPage {
    fn navigate(&mut self, url: &str) -> Result<()> {
        if self.closed {
            return Err(Error::session_failed("session closed"));
        }
        if self.fail_navigate {
            return Err(Error::action_failed("navigate", "net::ERR_NAME_NOT_RESOLVED"));
        }
        self.record(format!("navigate {}", url));
        Ok(())
    }

    fn find_all(&mut self, scope: Scope, selector: &Selector) -> Result<Vec<ElementRef>> {
        if self.closed {
            return Err(Error::session_failed("session closed"));
        }
        if let Scope::Within(root) = scope {
            self.node(root)?;
            let is_feed_scan = self
                .feed
                .as_ref()
                .map_or(false, |f| f.container == root.0 && f.item == selector.expr);
            if is_feed_scan {
                return self.render_feed();
            }
            if let Some(class) = ancestor_class(&selector.expr) {
                return Ok(self
                    .ancestor_with_class(root.0, class)
                    .map(ElementRef)
                    .into_iter()
                    .collect());
            }
        }
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive && n.selector == selector.expr)
            .map(|(i, _)| i as u64)
            .filter(|id| match scope {
                Scope::Page => true,
                Scope::Within(root) => self.is_descendant(*id, root.0),
            })
            .map(ElementRef)
            .collect())
    }

    fn find(
        &mut self,
        scope: Scope,
        selector: &Selector,
        mode: WaitMode,
        _timeout: Duration,
    ) -> Result<Option<ElementRef>> {
        let found = self.find_all(scope, selector)?;
        Ok(found.into_iter().find(|e| {
            mode == WaitMode::Present || self.nodes.get(e.0 as usize).map_or(false, |n| !n.hidden)
        }))
    }

    fn read_text(&mut self, element: ElementRef) -> Result<String> {
        Ok(self.node(element)?.text.clone())
    }

    fn read_attribute(&mut self, element: ElementRef, name: &str) -> Result<Option<String>> {
        Ok(self.node(element)?.attrs.get(name).cloned())
    }

    fn is_visible(&mut self, element: ElementRef) -> Result<bool> {
        Ok(!self.node(element)?.hidden)
    }

    fn click_direct(&mut self, element: ElementRef) -> Result<()> {
        self.click_with(element, FAIL_DIRECT, "click_direct")
    }

    fn click_script(&mut self, element: ElementRef) -> Result<()> {
        self.click_with(element, FAIL_SCRIPT, "click_script")
    }

    fn scroll_by(&mut self, container: ElementRef, delta_pixels: i64) -> Result<()> {
        self.node(container)?;
        self.record(format!("scroll {} {}", container, delta_pixels));
        let programmatic = self.feed.as_ref().map_or(false, |f| f.programmatic_scroll);
        if self.is_feed(container) && programmatic {
            self.advance();
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<()> {
        self.node(element).map(|_| ())
    }

    fn scroll_top(&mut self, container: ElementRef) -> Result<i64> {
        self.node(container)?;
        Ok(match &self.feed {
            Some(feed) if feed.container == container.0 => feed.frame as i64 * SCROLL_STEP,
            _ => 0,
        })
    }

    fn scroll_height(&mut self, container: ElementRef) -> Result<i64> {
        self.node(container)?;
        Ok(100 * SCROLL_STEP)
    }

    fn send_key(&mut self, element: ElementRef, key: Key) -> Result<()> {
        self.node(element)?;
        self.record(format!("key {}", key.name()));
        if key == Key::PageDown && self.is_feed(element) {
            self.advance();
        }
        Ok(())
    }

    fn type_text(&mut self, element: ElementRef, text: &str) -> Result<()> {
        self.node(element)?;
        self.record(format!("type {}", text));
        Ok(())
    }

    fn hide_matching(&mut self, selectors: &[Selector]) -> Result<usize> {
        if self.closed {
            return Err(Error::session_failed("session closed"));
        }
        let mut hidden = 0;
        for node in self.nodes.iter_mut().filter(|n| n.alive) {
            if selectors.iter().any(|s| s.expr == node.selector) {
                node.hidden = true;
                hidden += 1;
            }
        }
        self.record(format!("hide {}", hidden));
        Ok(hidden)
    }

    fn pause(&mut self, _duration: Duration) {}

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.record("close".to_string());
        Ok(())
    }
}

/// Hands out prepared pages in order; fails once they run out.
pub struct SimLauncher {
    pages: RefCell<VecDeque<SimPage>>,
}

impl SimLauncher {
    pub fn new(pages: Vec<SimPage>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
        }
    }
}

impl Launcher for SimLauncher {
    fn launch(&self) -> Result<Box<dyn Renderer>> {
        match self.pages.borrow_mut().pop_front() {
            Some(page) => Ok(Box::new(page)),
            None => Err(Error::session_failed("chrome binary not found")),
        }
    }
}

/// `class` from `./ancestor::div[contains(@class,'class')][1]`.
fn ancestor_class(expr: &str) -> Option<&str> {
    let rest = expr.strip_prefix("./ancestor::")?;
    let start = rest.find("@class,'")? + "@class,'".len();
    let len = rest[start..].find('\'')?;
    Some(&rest[start..start + len])
}

fn first(set: &SelectorSet) -> String {
    set.iter().next().map(|s| s.expr.clone()).unwrap_or_default()
}

/// Bare feed keyed by `href`, labelled `label <key>`.
pub fn feed_page(frames: Vec<Vec<String>>) -> SimPage {
    let mut page = SimPage::new();
    let container = page.mount(None, CONTAINER, NodeSpec::new());
    let frames = frames
        .into_iter()
        .map(|keys| {
            keys.into_iter()
                .map(|key| {
                    NodeSpec::new()
                        .attr("href", &key)
                        .attr("aria-label", &format!("label {}", key))
                })
                .collect()
        })
        .collect();
    page.feed(container, ITEM, frames);
    page
}

#[derive(Debug, Clone, Default)]
pub struct SimPlace {
    pub name: String,
    pub href: String,
    pub category: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Both click tiers fail on this entry
    pub unclickable: bool,
    /// The detail panel renders without a title
    pub untitled: bool,
    /// Other info rows in the panel, as (selector, text)
    pub extra_rows: Vec<(String, String)>,
}

impl SimPlace {
    pub fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
            category: Some("Restoran".to_string()),
            address: Some(format!("Jl. {} No. 1, Malang", name)),
            phone: Some("0341 123456".to_string()),
            ..Self::default()
        }
    }
}

/// Search page whose results feed shows `places[..n]` for each `n` in `frames`.
pub fn places_page(places: &[SimPlace], frames: &[usize]) -> SimPage {
    let selectors = MapsSelectors::default();
    let mut page = SimPage::new();
    page.mount(None, &first(&selectors.search_input), NodeSpec::new());
    page.mount(None, &first(&selectors.results_ready), NodeSpec::new());
    let container = page.mount(None, &first(&selectors.results_container), NodeSpec::new());

    let frames = frames
        .iter()
        .map(|n| {
            places[..(*n).min(places.len())]
                .iter()
                .map(|place| {
                    let mut item = NodeSpec::new()
                        .attr("href", &place.href)
                        .attr("aria-label", &place.name);
                    if place.unclickable {
                        item = item.attr(FAIL_DIRECT, "").attr(FAIL_SCRIPT, "");
                    }
                    item
                })
                .collect()
        })
        .collect();
    page.feed(container, &selectors.place_anchor.expr, frames);

    for place in places {
        let mut detail = NodeSpec::new();
        if !place.untitled {
            detail = detail.child(
                &first(&selectors.place_title),
                NodeSpec::new().text(&place.name),
            );
        }
        if let Some(category) = &place.category {
            detail = detail.child(
                &first(&selectors.category.scoped),
                NodeSpec::new().text(category),
            );
        }
        if let Some(address) = &place.address {
            detail = detail.child(
                &first(&selectors.address.scoped),
                NodeSpec::new().text(address),
            );
        }
        if let Some(phone) = &place.phone {
            detail = detail.child(&first(&selectors.phone.scoped), NodeSpec::new().text(phone));
        }
        for (selector, text) in &place.extra_rows {
            detail = detail.child(selector, NodeSpec::new().text(text));
        }
        page.details.insert(place.href.clone(), (DETAIL.to_string(), detail));
    }
    page
}

#[derive(Debug, Clone)]
pub struct SimReview {
    pub id: String,
    pub username: String,
    pub stars: Option<u8>,
    pub text: String,
    /// Text revealed by the expand button; `text` is shown until then
    pub full_text: Option<String>,
}

impl SimReview {
    pub fn new(id: &str, username: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            stars: Some(5),
            text: text.to_string(),
            full_text: None,
        }
    }
}

/// Place page whose reviews panel shows one frame of reviews per scroll position.
pub fn reviews_page(place: &str, frames: Vec<Vec<SimReview>>) -> SimPage {
    let selectors = MapsSelectors::default();
    let mut page = SimPage::new();
    page.mount(None, &first(&selectors.place_title), NodeSpec::new().text(place));
    page.mount(None, &first(&selectors.review_section), NodeSpec::new());
    page.mount(None, &first(&selectors.more_reviews), NodeSpec::new());
    page.mount(None, &selectors.clutter[0].expr, NodeSpec::new());
    let panel = page.mount(None, &first(&selectors.review_panel), NodeSpec::new());

    let frames = frames
        .into_iter()
        .map(|reviews| {
            reviews
                .into_iter()
                .map(|review| review_node(&selectors, review))
                .collect()
        })
        .collect();
    page.feed(panel, &selectors.review_container.expr, frames);
    page
}

fn review_node(selectors: &MapsSelectors, review: SimReview) -> NodeSpec {
    let mut text = NodeSpec::new().text(&review.text);
    if let Some(full) = &review.full_text {
        text = text.attr(FULL_TEXT, full);
    }
    let mut node = NodeSpec::new()
        .attr(&selectors.review_id_attribute, &review.id)
        .child(
            &first(&selectors.review_username),
            NodeSpec::new().text(&review.username),
        )
        .child(&first(&selectors.review_text), text);
    if let Some(stars) = review.stars {
        node = node.child(
            &first(&selectors.review_rating),
            NodeSpec::new().attr("aria-label", &format!("{} bintang", stars)),
        );
    }
    if review.full_text.is_some() {
        node = node.child(
            &first(&selectors.review_expand),
            NodeSpec::new().attr(EXPANDS, ""),
        );
    }
    node
}
