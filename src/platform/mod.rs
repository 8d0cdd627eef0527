//! Platform abstraction layer
//!
//! The page core only talks to its host through these traits:
//! - Element lookup and smooth scrolling (`PageHost`)
//! - Viewport intersection (`ViewportObserver`)
//!
//! `web` implements them on top of the browser DOM, `headless` keeps
//! everything in memory for the native binary and tests.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use thiserror::Error;

use crate::reveal::Threshold;

/// Element lookup + scroll primitive
pub trait PageHost {
    /// Handle to a live, rendered element
    type Element;

    /// Resolve an element id, `None` if it is not rendered (yet)
    fn find_element(&self, id: &str) -> Option<Self::Element>;

    /// Start a smooth scroll aligning the element's top with the viewport top.
    /// Returns immediately; the animation runs on the host's event loop.
    fn smooth_scroll_to(&self, element: &Self::Element);
}

/// Why an element could not be observed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserveError {
    /// The host has no intersection primitive at all
    #[error("viewport intersection observer is unavailable")]
    Unavailable,
    /// No rendered element carries this id
    #[error("no element with id `{0}` to observe")]
    MissingElement(String),
}

/// Viewport-intersection primitive
///
/// Notifications are delivered asynchronously by the host as
/// [`Intersection`] values; the observer itself only manages subscriptions.
pub trait ViewportObserver {
    fn observe(&mut self, element_id: &str, threshold: Threshold) -> Result<(), ObserveError>;
    fn unobserve(&mut self, element_id: &str);
    /// Release every observation (page teardown)
    fn disconnect(&mut self);
}

/// Browsers report crossing ratios with float noise (0.39996 for 0.4)
const BROWSER_RATIO_DECIMALS: f64 = 1e4;

/// A single visibility-crossing notification
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub element_id: String,
    /// Visible fraction of the element's area (0.0 - 1.0)
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl Intersection {
    pub fn new(element_id: impl Into<String>, ratio: f64) -> Self {
        Self {
            element_id: element_id.into(),
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    /// Notification as reported by a browser observer; the ratio is snapped
    /// to four decimals so a crossing exactly at a threshold compares equal
    pub fn from_browser(element_id: impl Into<String>, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            element_id: element_id.into(),
            ratio: (ratio * BROWSER_RATIO_DECIMALS).round() / BROWSER_RATIO_DECIMALS,
            is_intersecting,
        }
    }

    /// Notification for an element that left the viewport
    pub fn left(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            ratio: 0.0,
            is_intersecting: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_snaps_float_noise() {
        let entry = Intersection::from_browser("about", 0.399_96, true);
        assert_eq!(entry.ratio, 0.4);
        assert!(entry.is_intersecting);

        // Real shortfalls survive
        assert_eq!(Intersection::from_browser("about", 0.3991, true).ratio, 0.3991);
    }
}
