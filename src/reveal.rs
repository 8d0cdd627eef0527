//! Reveal scheduler
//!
//! Gives each registered element a one-shot "enter" transition the first
//! time enough of it is visible. Per element:
//!
//! ```text
//! UNOBSERVED --register--> OBSERVING --visible >= threshold--> REVEALED
//! ```
//!
//! `REVEALED` is terminal: later notifications (including "left the
//! viewport") are ignored and observation of the element is released.
//! If the host has no intersection primitive, registered elements are
//! revealed immediately so content is never stuck hidden.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::platform::{Intersection, ObserveError, ViewportObserver};
use crate::signal::{Listeners, SubscriptionId};

/// Minimum visible fraction (0.0 - 1.0) before an element counts as entered
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Any visible pixel
    pub const ANY: Threshold = Threshold(0.0);
    /// Fully visible
    pub const FULL: Threshold = Threshold(1.0);

    /// Clamp into [0, 1]; NaN becomes 0
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ANY;
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether a visible ratio satisfies this threshold
    pub fn is_met(&self, ratio: f64) -> bool {
        ratio >= self.0
    }
}

impl From<f64> for Threshold {
    fn from(fraction: f64) -> Self {
        Self::new(fraction)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// Where an element is in its reveal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    /// Not registered (or registration failed)
    Unobserved,
    /// Waiting to become visible
    Observing,
    /// Entered the viewport once; terminal
    Revealed,
}

#[derive(Debug, Clone, Copy)]
struct Tracked {
    phase: RevealPhase,
    threshold: Threshold,
}

/// One-shot reveal bookkeeping over a [`ViewportObserver`]
pub struct RevealScheduler<O: ViewportObserver> {
    observer: O,
    elements: HashMap<String, Tracked>,
    listeners: Listeners<str>,
}

impl<O: ViewportObserver> RevealScheduler<O> {
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            elements: HashMap::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Start observing an element.
    ///
    /// Registering an element that is already observing or revealed does
    /// nothing. Returns the element's phase after the call.
    pub fn register(&mut self, element_id: &str, threshold: Threshold) -> RevealPhase {
        if let Some(tracked) = self.elements.get(element_id) {
            log::debug!("register: `{}` already {:?}", element_id, tracked.phase);
            return tracked.phase;
        }

        match self.observer.observe(element_id, threshold) {
            Ok(()) => {
                self.elements.insert(
                    element_id.to_string(),
                    Tracked {
                        phase: RevealPhase::Observing,
                        threshold,
                    },
                );
                RevealPhase::Observing
            }
            Err(ObserveError::Unavailable) => {
                log::warn!(
                    "viewport observer unavailable, revealing `{}` immediately",
                    element_id
                );
                self.mark_revealed(element_id, threshold);
                RevealPhase::Revealed
            }
            Err(err @ ObserveError::MissingElement(_)) => {
                log::warn!("register: {}", err);
                RevealPhase::Unobserved
            }
        }
    }

    /// Apply one visibility notification. Returns true if it revealed the element.
    pub fn handle(&mut self, intersection: &Intersection) -> bool {
        let Some(tracked) = self.elements.get(&intersection.element_id) else {
            return false;
        };
        if tracked.phase == RevealPhase::Revealed {
            return false;
        }
        if !intersection.is_intersecting || !tracked.threshold.is_met(intersection.ratio) {
            return false;
        }

        let threshold = tracked.threshold;
        self.observer.unobserve(&intersection.element_id);
        self.mark_revealed(&intersection.element_id, threshold);
        log::debug!(
            "revealed `{}` at {:.0}% visible",
            intersection.element_id,
            intersection.ratio * 100.0
        );
        true
    }

    /// Apply a batch of notifications; returns the ids revealed by it
    pub fn handle_all<I>(&mut self, intersections: I) -> Vec<String>
    where
        I: IntoIterator<Item = Intersection>,
    {
        intersections
            .into_iter()
            .filter(|entry| self.handle(entry))
            .map(|entry| entry.element_id)
            .collect()
    }

    /// Reveal without waiting for visibility (mount-time animations).
    /// Returns false if the element had already revealed.
    pub fn reveal_now(&mut self, element_id: &str) -> bool {
        let threshold = match self.elements.get(element_id) {
            Some(tracked) if tracked.phase == RevealPhase::Revealed => return false,
            Some(tracked) => {
                self.observer.unobserve(element_id);
                tracked.threshold
            }
            None => Threshold::ANY,
        };
        self.mark_revealed(element_id, threshold);
        true
    }

    pub fn phase(&self, element_id: &str) -> RevealPhase {
        self.elements
            .get(element_id)
            .map(|t| t.phase)
            .unwrap_or(RevealPhase::Unobserved)
    }

    pub fn is_revealed(&self, element_id: &str) -> bool {
        self.phase(element_id) == RevealPhase::Revealed
    }

    pub fn revealed_count(&self) -> usize {
        self.elements
            .values()
            .filter(|t| t.phase == RevealPhase::Revealed)
            .count()
    }

    pub fn observing_count(&self) -> usize {
        self.elements
            .values()
            .filter(|t| t.phase == RevealPhase::Observing)
            .count()
    }

    /// Listen for reveals; the listener receives the element id once per element
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Release all observation and forget every element (view unmounted).
    /// Notifications arriving afterwards are ignored.
    pub fn teardown(&mut self) {
        self.observer.disconnect();
        log::info!(
            "reveal scheduler torn down ({} revealed, {} still observing)",
            self.revealed_count(),
            self.observing_count()
        );
        self.elements.clear();
    }

    fn mark_revealed(&mut self, element_id: &str, threshold: Threshold) {
        self.elements.insert(
            element_id.to_string(),
            Tracked {
                phase: RevealPhase::Revealed,
                threshold,
            },
        );
        self.listeners.emit(element_id);
    }
}

impl<O: ViewportObserver + std::fmt::Debug> std::fmt::Debug for RevealScheduler<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("observer", &self.observer)
            .field("elements", &self.elements)
            .field("listeners", &self.listeners)
            .finish()
    }
}
