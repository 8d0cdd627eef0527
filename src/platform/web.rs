//! Browser host: DOM lookup, `scrollIntoView`, `IntersectionObserver`

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::{Intersection, ObserveError, PageHost, ViewportObserver};
use crate::reveal::Threshold;

/// The live document
#[derive(Debug, Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    /// `None` outside a window context (e.g. a worker)
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl PageHost for WebPage {
    type Element = Element;

    fn find_element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn smooth_scroll_to(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

type IntersectCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Whether `window.IntersectionObserver` exists
pub fn intersection_observer_supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// `IntersectionObserver`-backed viewport observer.
///
/// A JS observer carries a fixed threshold list, so one is created per
/// distinct threshold and shared by every element using it.
pub struct WebViewportObserver {
    document: Document,
    callback: Option<IntersectCallback>,
    observers: HashMap<u64, IntersectionObserver>,
    targets: HashMap<String, (u64, Element)>,
}

impl WebViewportObserver {
    /// `on_intersect` receives each batch of notifications the browser delivers
    pub fn new(document: &Document, mut on_intersect: impl FnMut(Vec<Intersection>) + 'static) -> Self {
        let callback = if intersection_observer_supported() {
            Some(Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let batch = entries
                        .iter()
                        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                        .map(|entry| {
                            Intersection::from_browser(
                                entry.target().id(),
                                entry.intersection_ratio(),
                                entry.is_intersecting(),
                            )
                        })
                        .collect();
                    on_intersect(batch);
                },
            ))
        } else {
            log::warn!("IntersectionObserver not supported by this browser");
            None
        };

        Self {
            document: document.clone(),
            callback,
            observers: HashMap::new(),
            targets: HashMap::new(),
        }
    }

    fn observer_for(&mut self, threshold: Threshold) -> Result<&IntersectionObserver, ObserveError> {
        let key = threshold.value().to_bits();
        if !self.observers.contains_key(&key) {
            let callback = self.callback.as_ref().ok_or(ObserveError::Unavailable)?;
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(threshold.value()));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                    .map_err(|e| {
                        log::warn!("IntersectionObserver construction failed: {:?}", e);
                        ObserveError::Unavailable
                    })?;
            self.observers.insert(key, observer);
        }
        self.observers.get(&key).ok_or(ObserveError::Unavailable)
    }
}

impl ViewportObserver for WebViewportObserver {
    fn observe(&mut self, element_id: &str, threshold: Threshold) -> Result<(), ObserveError> {
        if self.targets.contains_key(element_id) {
            return Ok(());
        }
        if self.callback.is_none() {
            return Err(ObserveError::Unavailable);
        }
        let element = self
            .document
            .get_element_by_id(element_id)
            .ok_or_else(|| ObserveError::MissingElement(element_id.to_string()))?;

        self.observer_for(threshold)?.observe(&element);
        self.targets.insert(
            element_id.to_string(),
            (threshold.value().to_bits(), element),
        );
        Ok(())
    }

    fn unobserve(&mut self, element_id: &str) {
        if let Some((key, element)) = self.targets.remove(element_id) {
            if let Some(observer) = self.observers.get(&key) {
                observer.unobserve(&element);
            }
        }
    }

    fn disconnect(&mut self) {
        for observer in self.observers.values() {
            observer.disconnect();
        }
        self.observers.clear();
        self.targets.clear();
    }
}

impl Drop for WebViewportObserver {
    fn drop(&mut self) {
        // The callback closure dies with us; JS must not call it afterwards
        self.disconnect();
    }
}
