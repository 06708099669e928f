//! Headless Chrome backend over the DevTools protocol
//!
//! Elements are addressed by a `data-mh-ref` attribute stamped on them the
//! first time a query returns them. Ids come from a counter kept on this
//! side, so they never repeat across navigations; a ref whose element has
//! been unmounted resolves to nothing and reports `StaleElement`.

use crate::error::{Error, ErrorCode, Result};
use crate::renderer::{ElementRef, Key, Launcher, Renderer, Scope, WaitMode};
use crate::selector::{Selector, SelectorKind};
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const REF_ATTR: &str = "data-mh-ref";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const PRELUDE: &str = r#"
const __ref = (id) => document.querySelector('[data-mh-ref="' + id + '"]');
const __query = (root, kind, expr) => {
  if (kind === 'css') return Array.from(root.querySelectorAll(expr));
  const snap = document.evaluate(expr, root, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
  const out = [];
  for (let i = 0; i < snap.snapshotLength; i++) {
    const node = snap.snapshotItem(i);
    if (node.nodeType === 1) out.push(node);
  }
  return out;
};
const __visible = (el) => {
  const style = window.getComputedStyle(el);
  return style.display !== 'none' && style.visibility !== 'hidden' && el.getClientRects().length > 0;
};
const __clickable = (el) =>
  __visible(el) && !el.disabled && window.getComputedStyle(el).pointerEvents !== 'none';
"#;

const MASK_WEBDRIVER: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

#[derive(Debug, Clone)]
pub struct ChromeOptions {
    pub headless: bool,
    /// UI language, e.g. "id"
    pub language: String,
    pub window_size: (u32, u32),
    /// Chrome is killed after this long without DevTools traffic
    pub idle_timeout: Duration,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            headless: false,
            language: "id".to_string(),
            window_size: (1920, 1080),
            idle_timeout: Duration::from_secs(300),
        }
    }
}

pub struct ChromeLauncher {
    options: ChromeOptions,
}

impl ChromeLauncher {
    pub fn new(options: ChromeOptions) -> Self {
        Self { options }
    }
}

impl Launcher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn Renderer>> {
        Ok(Box::new(ChromeRenderer::launch(&self.options)?))
    }
}

pub struct ChromeRenderer {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
    next_ref: u64,
}

#[derive(Deserialize)]
struct Tagged {
    ids: Vec<u64>,
    next: u64,
}

#[derive(Deserialize)]
struct Reply<T> {
    #[serde(default)]
    stale: bool,
    value: Option<T>,
}

impl ChromeRenderer {
    pub fn launch(options: &ChromeOptions) -> Result<Self> {
        let lang_arg = format!("--lang={}", options.language);
        let accept_arg = format!(
            "--accept-language={}-{},{}",
            options.language,
            options.language.to_uppercase(),
            options.language
        );
        let args: Vec<&OsStr> = vec![
            OsStr::new(&lang_arg),
            OsStr::new(&accept_arg),
            OsStr::new("--disable-blink-features=AutomationControlled"),
        ];

        let launch = LaunchOptions::default_builder()
            .headless(options.headless)
            .window_size(Some(options.window_size))
            .idle_browser_timeout(options.idle_timeout)
            .args(args)
            .build()
            .map_err(Error::session_failed)?;

        let browser = Browser::new(launch).map_err(Error::session_failed)?;
        let tab = browser.new_tab().map_err(Error::session_failed)?;
        debug!(headless = options.headless, "chrome started");

        Ok(Self {
            browser: Some(browser),
            tab: Some(tab),
            next_ref: 1,
        })
    }

    fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab
            .as_ref()
            .ok_or_else(|| Error::new(ErrorCode::SessionFailed, "session is closed"))
    }

    /// Run `body` as a function body; it must `return JSON.stringify(..)`.
    fn eval<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        let script = format!("(() => {{ {} {} }})()", PRELUDE, body);
        let remote = self
            .tab()?
            .evaluate(&script, false)
            .map_err(Error::script_failed)?;
        let raw = remote
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::script_failed("script returned no value"))?;
        Ok(serde_json::from_str(raw)?)
    }

    /// Evaluate `body` with `el` bound to the referenced element.
    fn on_element<T: DeserializeOwned>(&self, element: ElementRef, body: &str) -> Result<Option<T>> {
        let script = format!(
            "const el = __ref({id}); if (!el) return JSON.stringify({{stale: true}}); \
             return JSON.stringify({{value: (() => {{ {body} }})()}});",
            id = element.0,
            body = body
        );
        let reply: Reply<T> = self.eval(&script)?;
        if reply.stale {
            return Err(Error::stale(element.0));
        }
        Ok(reply.value)
    }

    fn act(&self, element: ElementRef, body: &str) -> Result<()> {
        self.on_element::<serde_json::Value>(element, body)?;
        Ok(())
    }

    fn root_expr(scope: Scope) -> String {
        match scope {
            Scope::Page => "document".to_string(),
            Scope::Within(el) => format!("__ref({})", el.0),
        }
    }

    fn first_matching(
        &mut self,
        scope: Scope,
        selector: &Selector,
        mode: WaitMode,
    ) -> Result<Option<ElementRef>> {
        let filter = match mode {
            WaitMode::Present => "true",
            WaitMode::Visible => "__visible(el)",
            WaitMode::Clickable => "__clickable(el)",
        };
        let body = format!(
            "const root = {root}; if (!root) return JSON.stringify(null);
             let next = {next};
             const ids = __query(root, {kind}, {expr}).filter(el => {filter}).slice(0, 1).map(el => {{
               if (!el.hasAttribute('{attr}')) el.setAttribute('{attr}', String(next++));
               return Number(el.getAttribute('{attr}'));
             }});
             return JSON.stringify({{ ids, next }});",
            root = Self::root_expr(scope),
            next = self.next_ref,
            kind = js_string(kind_name(selector.kind)),
            expr = js_string(&selector.expr),
            filter = filter,
            attr = REF_ATTR,
        );
        let tagged: Option<Tagged> = self.eval(&body)?;
        let tagged = tagged.ok_or_else(|| scope_stale(scope))?;
        self.next_ref = tagged.next;
        Ok(tagged.ids.into_iter().next().map(ElementRef))
    }
}

impl Renderer for ChromeRenderer {
    fn navigate(&mut self, url: &str) -> Result<()> {
        let tab = self.tab()?;
        tab.navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| Error::action_failed("navigate", &e.to_string()))?;
        if let Err(err) = tab.evaluate(MASK_WEBDRIVER, false) {
            debug!(%err, "could not mask navigator.webdriver");
        }
        Ok(())
    }

    fn find_all(&mut self, scope: Scope, selector: &Selector) -> Result<Vec<ElementRef>> {
        let body = format!(
            "const root = {root}; if (!root) return JSON.stringify(null);
             let next = {next};
             const ids = __query(root, {kind}, {expr}).map(el => {{
               if (!el.hasAttribute('{attr}')) el.setAttribute('{attr}', String(next++));
               return Number(el.getAttribute('{attr}'));
             }});
             return JSON.stringify({{ ids, next }});",
            root = Self::root_expr(scope),
            next = self.next_ref,
            kind = js_string(kind_name(selector.kind)),
            expr = js_string(&selector.expr),
            attr = REF_ATTR,
        );
        let tagged: Option<Tagged> = self.eval(&body)?;
        let tagged = tagged.ok_or_else(|| scope_stale(scope))?;
        self.next_ref = tagged.next;
        Ok(tagged.ids.into_iter().map(ElementRef).collect())
    }

    fn find(
        &mut self,
        scope: Scope,
        selector: &Selector,
        mode: WaitMode,
        timeout: Duration,
    ) -> Result<Option<ElementRef>> {
        let deadline = Instant::now() + timeout;
        loop {
            let found = self.first_matching(scope, selector, mode)?;
            if found.is_some() || Instant::now() >= deadline {
                return Ok(found);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn read_text(&mut self, element: ElementRef) -> Result<String> {
        Ok(self
            .on_element::<String>(element, "return el.innerText || el.textContent || '';")?
            .unwrap_or_default())
    }

    fn read_attribute(&mut self, element: ElementRef, name: &str) -> Result<Option<String>> {
        // Resolved URL for links, raw attribute otherwise.
        let body = format!(
            "const name = {name}; if (name === 'href' && el.href) return String(el.href); return el.getAttribute(name);",
            name = js_string(name)
        );
        self.on_element::<String>(element, &body)
    }

    fn is_visible(&mut self, element: ElementRef) -> Result<bool> {
        Ok(self
            .on_element::<bool>(element, "return __visible(el);")?
            .unwrap_or(false))
    }

    fn click_direct(&mut self, element: ElementRef) -> Result<()> {
        let tab = self.tab()?;
        let css = format!("[{}=\"{}\"]", REF_ATTR, element.0);
        let target = tab.find_element(&css).map_err(|_| Error::stale(element.0))?;
        target
            .click()
            .map_err(|e| Error::action_failed("click", &e.to_string()))?;
        Ok(())
    }

    fn click_script(&mut self, element: ElementRef) -> Result<()> {
        self.act(element, "el.click(); return true;")
    }

    fn scroll_by(&mut self, container: ElementRef, delta_pixels: i64) -> Result<()> {
        self.act(
            container,
            &format!("el.scrollBy(0, {}); return true;", delta_pixels),
        )
    }

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<()> {
        self.act(element, "el.scrollIntoView({block: 'center'}); return true;")
    }

    fn scroll_top(&mut self, container: ElementRef) -> Result<i64> {
        Ok(self
            .on_element::<i64>(container, "return Math.round(el.scrollTop);")?
            .unwrap_or(0))
    }

    fn scroll_height(&mut self, container: ElementRef) -> Result<i64> {
        Ok(self
            .on_element::<i64>(container, "return Math.round(el.scrollHeight);")?
            .unwrap_or(0))
    }

    fn send_key(&mut self, element: ElementRef, key: Key) -> Result<()> {
        self.act(
            element,
            "if (!el.hasAttribute('tabindex')) el.setAttribute('tabindex', '-1'); el.focus(); return true;",
        )?;
        self.tab()?
            .press_key(key.name())
            .map_err(|e| Error::action_failed("press_key", &e.to_string()))?;
        Ok(())
    }

    fn type_text(&mut self, element: ElementRef, text: &str) -> Result<()> {
        self.act(element, "el.focus(); el.value = ''; return true;")?;
        self.tab()?
            .type_str(text)
            .map_err(|e| Error::action_failed("type", &e.to_string()))?;
        Ok(())
    }

    fn hide_matching(&mut self, selectors: &[Selector]) -> Result<usize> {
        let list: Vec<(&str, &str)> = selectors
            .iter()
            .map(|s| (kind_name(s.kind), s.expr.as_str()))
            .collect();
        let body = format!(
            "let hidden = 0;
             for (const [kind, expr] of {list}) {{
               for (const el of __query(document, kind, expr)) {{
                 if (el.style.display !== 'none') {{ el.style.display = 'none'; hidden++; }}
               }}
             }}
             return JSON.stringify(hidden);",
            list = serde_json::json!(list),
        );
        self.eval(&body)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(tab) = self.tab.take() {
            if let Err(err) = tab.close(true) {
                warn!(%err, "closing tab failed");
            }
        }
        // Dropping the browser terminates the Chrome process.
        if self.browser.take().is_some() {
            debug!("chrome stopped");
        }
        Ok(())
    }
}

fn kind_name(kind: SelectorKind) -> &'static str {
    match kind {
        SelectorKind::Css => "css",
        SelectorKind::XPath => "xpath",
    }
}

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn scope_stale(scope: Scope) -> Error {
    match scope {
        Scope::Within(el) => Error::stale(el.0),
        Scope::Page => Error::script_failed("document is not available"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_strings_are_escaped() {
        assert_eq!(js_string("a[href^='tel:']"), r#""a[href^='tel:']""#);
        assert_eq!(js_string(r#"div[jslog="127691"]"#), r#""div[jslog=\"127691\"]""#);
    }

    #[test]
    fn root_expression_per_scope() {
        assert_eq!(ChromeRenderer::root_expr(Scope::Page), "document");
        assert_eq!(
            ChromeRenderer::root_expr(Scope::Within(ElementRef(12))),
            "__ref(12)"
        );
    }

    #[test]
    fn element_reply_shapes() {
        let stale: Reply<String> = serde_json::from_str(r#"{"stale":true}"#).unwrap();
        assert!(stale.stale);
        let absent: Reply<String> = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert!(!absent.stale && absent.value.is_none());
    }
}
