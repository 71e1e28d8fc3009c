//! Window-level listeners exposed as signals, plus the small DOM effects the
//! page needs (smooth anchors, entrance reveals, body scroll lock).

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::motion::{scroll_target, RevealMode, REVEAL_ATTRIBUTE, REVEAL_CLASS};

/// Resize handling waits for the user to stop dragging
pub const RESIZE_DEBOUNCE_MS: i32 = 250;

/// Sticky header measured when scrolling to an anchor
#[cfg(target_arch = "wasm32")]
const HEADER_SELECTOR: &str = "header.nav";

/// Scroll position and the sizes needed to turn it into progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
    pub viewport_width: f64,
}

impl ScrollMetrics {
    pub fn progress(&self) -> f64 {
        crate::motion::scroll_progress(self.scroll_y, self.document_height, self.viewport_height)
    }

    #[cfg(target_arch = "wasm32")]
    fn read() -> Option<Self> {
        let window = web_sys::window()?;
        let document_height = window
            .document()
            .and_then(|d| d.document_element())
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Some(Self {
            scroll_y: window.scroll_y().unwrap_or(0.0),
            document_height,
            viewport_height: dimension(window.inner_height()),
            viewport_width: dimension(window.inner_width()),
        })
    }
}

/// Handle of a pending browser callback (animation frame or timeout).
///
/// Scroll uses it as a throttle (schedule only when idle), resize as a
/// debounce (every event replaces the pending timer).
#[derive(Debug, Default)]
pub struct Scheduled(Option<i32>);

impl Scheduled {
    pub fn is_idle(&self) -> bool {
        self.0.is_none()
    }

    /// Record a new handle, returning the one it supersedes
    pub fn replace(&mut self, handle: i32) -> Option<i32> {
        self.0.replace(handle)
    }

    /// The callback ran
    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn take(&mut self) -> Option<i32> {
        self.0.take()
    }
}

/// RAII guard removing a window event listener on drop
#[cfg(target_arch = "wasm32")]
pub struct WindowListener {
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl WindowListener {
    pub fn new(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        if let Err(e) =
            window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self { event, callback })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                self.event,
                self.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Scroll and resize listeners feeding one metrics signal.
///
/// Scroll reads are batched to one per animation frame; resize reads wait
/// until resizing has settled. Pending callbacks are cancelled on drop.
#[cfg(target_arch = "wasm32")]
struct ScrollWatch {
    _listeners: Vec<WindowListener>,
    frame: Rc<RefCell<Scheduled>>,
    settle: Rc<RefCell<Scheduled>>,
    // Kept alive while a frame or timeout may still call them
    _on_frame: Rc<Closure<dyn FnMut()>>,
    _on_settle: Rc<Closure<dyn FnMut()>>,
}

#[cfg(target_arch = "wasm32")]
impl ScrollWatch {
    fn start(metrics: Signal<ScrollMetrics>) -> Self {
        let refresh = move || {
            if let Some(now) = ScrollMetrics::read() {
                let mut metrics = metrics;
                if *metrics.peek() != now {
                    metrics.set(now);
                }
            }
        };
        refresh();

        let frame = Rc::new(RefCell::new(Scheduled::default()));
        let settle = Rc::new(RefCell::new(Scheduled::default()));

        let on_frame: Rc<Closure<dyn FnMut()>> = {
            let frame = frame.clone();
            Rc::new(Closure::wrap(Box::new(move || {
                frame.borrow_mut().clear();
                refresh();
            }) as Box<dyn FnMut()>))
        };
        let on_settle: Rc<Closure<dyn FnMut()>> = {
            let settle = settle.clone();
            Rc::new(Closure::wrap(Box::new(move || {
                settle.borrow_mut().clear();
                refresh();
            }) as Box<dyn FnMut()>))
        };

        let mut listeners = Vec::new();

        let scroll = {
            let frame = frame.clone();
            let on_frame = on_frame.clone();
            WindowListener::new("scroll", move |_| {
                if !frame.borrow().is_idle() {
                    return;
                }
                let Some(window) = web_sys::window() else {
                    return;
                };
                match window.request_animation_frame((*on_frame).as_ref().unchecked_ref()) {
                    Ok(handle) => {
                        frame.borrow_mut().replace(handle);
                    }
                    Err(e) => tracing::warn!("Failed to schedule frame: {:?}", e),
                }
            })
        };
        listeners.extend(scroll);

        let resize = {
            let settle = settle.clone();
            let on_settle = on_settle.clone();
            WindowListener::new("resize", move |_| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let armed = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    (*on_settle).as_ref().unchecked_ref(),
                    RESIZE_DEBOUNCE_MS,
                );
                match armed {
                    Ok(handle) => {
                        if let Some(previous) = settle.borrow_mut().replace(handle) {
                            window.clear_timeout_with_handle(previous);
                        }
                    }
                    Err(e) => tracing::warn!("Failed to debounce resize: {:?}", e),
                }
            })
        };
        listeners.extend(resize);

        Self {
            _listeners: listeners,
            frame,
            settle,
            _on_frame: on_frame,
            _on_settle: on_settle,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ScrollWatch {
    fn drop(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = self.frame.borrow_mut().take() {
            let _ = window.cancel_animation_frame(handle);
        }
        if let Some(handle) = self.settle.borrow_mut().take() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Context carrying the page's scroll metrics
#[derive(Clone, Copy)]
pub struct ScrollContext {
    metrics: Signal<ScrollMetrics>,
}

/// Install the single set of window scroll/resize listeners - call once at app root
pub fn use_scroll_provider() {
    let metrics = use_signal(ScrollMetrics::default);
    use_context_provider(|| ScrollContext { metrics });

    #[cfg(target_arch = "wasm32")]
    {
        let _watch: Rc<RefCell<Option<ScrollWatch>>> = use_hook(|| Rc::new(RefCell::new(None)));

        let watch = _watch.clone();
        use_effect(move || {
            if watch.borrow().is_some() {
                return;
            }
            *watch.borrow_mut() = Some(ScrollWatch::start(metrics));
        });
    }
}

/// Live window scroll and size metrics (static defaults outside the browser)
pub fn use_scroll_metrics() -> Signal<ScrollMetrics> {
    use_context::<ScrollContext>().metrics
}

/// Reveal `[data-animate]` elements as they scroll into view.
///
/// The observer is disconnected on drop.
#[cfg(target_arch = "wasm32")]
pub struct RevealObserver {
    observer: web_sys::IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
}

#[cfg(target_arch = "wasm32")]
fn reveal_targets() -> Vec<web_sys::Element> {
    let selector = format!("[{}]", REVEAL_ATTRIBUTE);
    let Some(nodes) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(&selector).ok())
    else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn reveal(element: &web_sys::Element) {
    if let Err(e) = element.class_list().add_1(REVEAL_CLASS) {
        tracing::warn!("Failed to reveal element: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
impl RevealObserver {
    /// Returns None when everything was revealed up front
    pub fn start(mode: RevealMode) -> Option<Self> {
        use crate::motion::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
        use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

        let targets = reveal_targets();
        if mode == RevealMode::Immediate {
            targets.iter().for_each(reveal);
            return None;
        }

        let on_intersect = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let target = entry.target();
                        reveal(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(_, _)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        let observer = match IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                tracing::warn!("IntersectionObserver unavailable, revealing all: {:?}", e);
                targets.iter().for_each(reveal);
                return None;
            }
        };
        for target in &targets {
            observer.observe(target);
        }

        Some(Self {
            observer,
            _on_intersect: on_intersect,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Start revealing `[data-animate]` elements once the page has mounted
pub fn use_reveal_on_scroll(mode: crate::motion::RevealMode) {
    #[cfg(target_arch = "wasm32")]
    {
        let _observer: Rc<RefCell<Option<Option<RevealObserver>>>> =
            use_hook(|| Rc::new(RefCell::new(None)));

        let observer = _observer.clone();
        use_effect(move || {
            if observer.borrow().is_some() {
                return;
            }
            *observer.borrow_mut() = Some(RevealObserver::start(mode));
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = mode;
}

/// Smooth-scroll to an in-page anchor so the sticky header does not cover it.
///
/// Falls back to the browser's own jump when the target is missing.
#[cfg(target_arch = "wasm32")]
pub fn scroll_to_anchor(evt: &MouseEvent, href: &str) {
    if smooth_scroll_to(href) {
        evt.prevent_default();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_to_anchor(_evt: &MouseEvent, _href: &str) {}

#[cfg(target_arch = "wasm32")]
fn smooth_scroll_to(href: &str) -> bool {
    let Some(id) = href.strip_prefix('#') else {
        return false;
    };
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(document) = window.document() else {
        return false;
    };
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    let header_height = document
        .query_selector(HEADER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .map_or(0.0, |header| header.offset_height() as f64);

    let options = web_sys::ScrollToOptions::new();
    options.set_top(scroll_target(target.offset_top() as f64, header_height));
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}

/// Set the `overflow` style of `<body>`
#[cfg(target_arch = "wasm32")]
pub fn set_body_overflow(value: &str) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let style = body.style();
    let result = if value.is_empty() {
        style.remove_property("overflow").map(|_| ())
    } else {
        style.set_property("overflow", value)
    };
    if let Err(e) = result {
        tracing::warn!("Failed to set body overflow: {:?}", e);
    }
}

/// Navigate the current tab
#[cfg(target_arch = "wasm32")]
pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(href) {
            tracing::warn!("Failed to open {}: {:?}", href, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_bursts_share_one_frame() {
        let mut frame = Scheduled::default();
        let mut scheduled = 0;
        for handle in 1..=20 {
            if frame.is_idle() {
                frame.replace(handle);
                scheduled += 1;
            }
        }
        assert_eq!(scheduled, 1);

        frame.clear();
        assert!(frame.is_idle());
    }

    #[test]
    fn resize_keeps_only_the_latest_timer() {
        let mut settle = Scheduled::default();
        assert_eq!(settle.replace(7), None);
        assert_eq!(settle.replace(8), Some(7));
        assert_eq!(settle.replace(9), Some(8));
        assert_eq!(settle.take(), Some(9));
        assert!(settle.is_idle());
    }

    #[test]
    fn progress_uses_document_and_viewport() {
        let metrics = ScrollMetrics {
            scroll_y: 250.0,
            document_height: 1500.0,
            viewport_height: 1000.0,
            viewport_width: 1280.0,
        };
        assert_eq!(metrics.progress(), 50.0);
    }
}
