//! In-memory host used by the native binary and tests

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use super::{ObserveError, PageHost, ViewportObserver};
use crate::reveal::Threshold;

/// A page whose rendered elements are a set of ids; scroll requests are recorded
#[derive(Debug, Default)]
pub struct HeadlessPage {
    rendered: HashSet<String>,
    scrolls: RefCell<Vec<String>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with every id rendered
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rendered: ids.into_iter().map(Into::into).collect(),
            scrolls: RefCell::new(Vec::new()),
        }
    }

    pub fn render(&mut self, id: impl Into<String>) {
        self.rendered.insert(id.into());
    }

    pub fn unrender(&mut self, id: &str) {
        self.rendered.remove(id);
    }

    /// Scroll targets in request order
    pub fn scrolls(&self) -> Vec<String> {
        self.scrolls.borrow().clone()
    }
}

impl PageHost for HeadlessPage {
    type Element = String;

    fn find_element(&self, id: &str) -> Option<String> {
        self.rendered.get(id).cloned()
    }

    fn smooth_scroll_to(&self, element: &String) {
        log::debug!("smooth scroll -> #{}", element);
        self.scrolls.borrow_mut().push(element.clone());
    }
}

/// Observer that records subscriptions; notifications are fed by the caller
#[derive(Debug)]
pub struct HeadlessObserver {
    available: bool,
    missing: HashSet<String>,
    observed: BTreeMap<String, Threshold>,
    observe_calls: usize,
    disconnected: bool,
}

impl Default for HeadlessObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessObserver {
    pub fn new() -> Self {
        Self {
            available: true,
            missing: HashSet::new(),
            observed: BTreeMap::new(),
            observe_calls: 0,
            disconnected: false,
        }
    }

    /// Host without any intersection capability
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Make `observe` fail for this id as if it were not rendered
    pub fn mark_missing(&mut self, id: impl Into<String>) {
        self.missing.insert(id.into());
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.contains_key(id)
    }

    pub fn threshold_of(&self, id: &str) -> Option<Threshold> {
        self.observed.get(id).copied()
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Total `observe` calls that reached the host
    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl ViewportObserver for HeadlessObserver {
    fn observe(&mut self, element_id: &str, threshold: Threshold) -> Result<(), ObserveError> {
        if !self.available {
            return Err(ObserveError::Unavailable);
        }
        if self.missing.contains(element_id) {
            return Err(ObserveError::MissingElement(element_id.to_string()));
        }
        self.observe_calls += 1;
        self.disconnected = false;
        self.observed.insert(element_id.to_string(), threshold);
        Ok(())
    }

    fn unobserve(&mut self, element_id: &str) {
        self.observed.remove(element_id);
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.disconnected = true;
    }
}
