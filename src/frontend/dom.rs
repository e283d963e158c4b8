use js_sys::{Function, Promise};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

pub fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Every element matching `selector`, skipping anything that is not an
/// `HtmlElement`.
pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// The event target as an `Element`, when it is one.
pub fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn timeout_promise(delay: Duration) -> Promise {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    Promise::new(&mut |resolve, _reject| {
        let scheduled = window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    })
}

/// Resolves after `delay` on the browser's timer queue.
pub async fn sleep(delay: Duration) {
    let _ = JsFuture::from(timeout_promise(delay)).await;
}

/// Resolves on the next animation frame.
pub async fn next_frame() {
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = window().and_then(|w| w.request_animation_frame(&resolve).ok());
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Resolves once the window `load` event has fired.
pub async fn window_loaded() {
    let already_complete = document()
        .map(|d| d.ready_state() == "complete")
        .unwrap_or(true);
    if already_complete {
        return;
    }

    let promise = Promise::new(&mut |resolve, _reject| {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        let registered = window().and_then(|w| {
            w.add_event_listener_with_callback_and_add_event_listener_options(
                "load", &resolve, &options,
            )
            .ok()
        });
        if registered.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn on_window<F>(event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let target: EventTarget = window()?.into();
        Self::new(&target, event, handler)
    }

    pub fn on_document<F>(event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let target: EventTarget = document()?.into();
        Self::new(&target, event, handler)
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl VisibilityOptions {
    pub const REVEAL: Self = Self {
        threshold: 0.1,
        root_margin: "0px 0px -50px 0px",
    };
    pub const HALF_VISIBLE: Self = Self {
        threshold: 0.5,
        root_margin: "0px",
    };
    pub const ANY: Self = Self {
        threshold: 0.0,
        root_margin: "0px",
    };
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// One-shot visibility subscription: fires `on_visible` the first time the
/// element intersects, then stops observing. Dropping it disconnects the
/// observer.
pub struct Subscription {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Subscription {
    pub fn observe_once<F>(target: &Element, options: VisibilityOptions, on_visible: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let pending: Rc<RefCell<Option<F>>> = Rc::new(RefCell::new(Some(on_visible)));
        let callback = ObserverCallback::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                observer.unobserve(&entry.target());
                observer.disconnect();
                if let Some(on_visible) = pending.borrow_mut().take() {
                    on_visible();
                }
                return;
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
        observer.observe(target);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Calls `target[method](arg)` when that method exists on the object.
pub fn call_optional_method(target: &JsValue, method: &str, arg: &JsValue) -> bool {
    let Ok(function) = js_sys::Reflect::get(target, &JsValue::from_str(method)) else {
        return false;
    };
    let Some(function) = function.dyn_ref::<Function>() else {
        return false;
    };
    function.call1(target, arg).is_ok()
}
