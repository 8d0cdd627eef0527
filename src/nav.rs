//! Navigation controller
//!
//! Owns the mobile menu state and turns "go to section" requests into smooth
//! scrolls. Never looks at reveal state.

use serde::{Deserialize, Serialize};

use crate::platform::PageHost;
use crate::sections::SectionRegistry;
use crate::signal::{Listeners, SubscriptionId};

/// State read by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    /// Whether the collapsed (mobile) menu is shown
    pub menu_open: bool,
}

/// Result of a `navigate_to` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Scroll issued, menu closed
    Scrolled(NavigationState),
    /// Id is not in the registry; nothing happened
    UnknownSection,
    /// Id is registered but has no live element yet; nothing happened
    NotRendered,
}

impl NavOutcome {
    pub fn scrolled(&self) -> bool {
        matches!(self, NavOutcome::Scrolled(_))
    }
}

/// Menu toggle + section navigation over a [`PageHost`]
pub struct NavigationController<H: PageHost> {
    registry: SectionRegistry,
    host: H,
    state: NavigationState,
    listeners: Listeners<NavigationState>,
}

impl<H: PageHost> NavigationController<H> {
    pub fn new(registry: SectionRegistry, host: H) -> Self {
        Self {
            registry,
            host,
            state: NavigationState::default(),
            listeners: Listeners::new(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn menu_open(&self) -> bool {
        self.state.menu_open
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Flip the mobile menu. Returns the new state.
    pub fn toggle_menu(&mut self) -> NavigationState {
        self.set_menu_open(!self.state.menu_open);
        log::debug!("menu toggled (open: {})", self.state.menu_open);
        self.state
    }

    /// Smooth-scroll to a section and close the menu.
    ///
    /// Unknown ids and sections without a live element are silent no-ops:
    /// no scroll, no state change. Every successful call issues exactly one
    /// scroll, even if an earlier scroll is still animating.
    pub fn navigate_to(&mut self, section_id: &str) -> NavOutcome {
        if !self.registry.contains(section_id) {
            log::warn!("navigate_to: unknown section `{}`", section_id);
            return NavOutcome::UnknownSection;
        }

        let Some(element) = self.host.find_element(section_id) else {
            log::debug!("navigate_to: section `{}` not rendered yet", section_id);
            return NavOutcome::NotRendered;
        };

        self.host.smooth_scroll_to(&element);
        self.set_menu_open(false);
        log::debug!("navigated to #{}", section_id);

        NavOutcome::Scrolled(self.state)
    }

    /// Listen for menu state changes
    pub fn subscribe(&mut self, listener: impl FnMut(&NavigationState) + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn set_menu_open(&mut self, open: bool) {
        if self.state.menu_open == open {
            return;
        }
        self.state.menu_open = open;
        let state = self.state;
        self.listeners.emit(&state);
    }
}

impl<H: PageHost + std::fmt::Debug> std::fmt::Debug for NavigationController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("registry", &self.registry)
            .field("host", &self.host)
            .field("state", &self.state)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessPage;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rendered_page() -> NavigationController<HeadlessPage> {
        let registry = SectionRegistry::default();
        let page = HeadlessPage::with_elements(registry.ids().map(str::to_string).collect::<Vec<_>>());
        NavigationController::new(registry, page)
    }

    #[test]
    fn test_navigate_closes_open_menu_and_scrolls() {
        let mut nav = rendered_page();
        nav.toggle_menu();
        assert!(nav.menu_open());

        let outcome = nav.navigate_to("projects");

        assert_eq!(outcome, NavOutcome::Scrolled(NavigationState { menu_open: false }));
        assert!(!nav.menu_open());
        assert_eq!(nav.host().scrolls(), ["projects"]);
    }

    #[test]
    fn test_navigate_closes_menu_for_every_section() {
        for prior_open in [false, true] {
            let mut nav = rendered_page();
            let ids: Vec<String> = nav.registry().ids().map(str::to_string).collect();
            for id in &ids {
                if nav.menu_open() != prior_open {
                    nav.toggle_menu();
                }
                assert!(nav.navigate_to(id).scrolled());
                assert!(!nav.menu_open(), "menu left open after navigating to {id}");
            }
            assert_eq!(nav.host().scrolls(), ids);
        }
    }

    #[test]
    fn test_unknown_section_is_noop() {
        let mut nav = rendered_page();
        nav.toggle_menu();

        let outcome = nav.navigate_to("careers");

        assert_eq!(outcome, NavOutcome::UnknownSection);
        assert!(nav.menu_open());
        assert!(nav.host().scrolls().is_empty());
    }

    #[test]
    fn test_unrendered_section_is_noop() {
        let mut nav = rendered_page();
        nav.host_mut().unrender("contact");
        nav.toggle_menu();

        assert_eq!(nav.navigate_to("contact"), NavOutcome::NotRendered);
        assert!(nav.menu_open());
        assert!(nav.host().scrolls().is_empty());

        nav.host_mut().render("contact");
        assert!(nav.navigate_to("contact").scrolled());
        assert!(!nav.menu_open());
    }

    #[test]
    fn test_each_navigation_issues_one_scroll() {
        let mut nav = rendered_page();
        nav.navigate_to("about");
        nav.navigate_to("about");
        nav.navigate_to("skills");
        assert_eq!(nav.host().scrolls(), ["about", "about", "skills"]);
    }

    #[test]
    fn test_listeners_see_state_changes() {
        let mut nav = rendered_page();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let id = nav.subscribe(move |state| s.borrow_mut().push(state.menu_open));

        nav.toggle_menu();
        nav.navigate_to("home");
        // Already closed: no change to publish
        nav.navigate_to("about");
        assert_eq!(*seen.borrow(), [true, false]);

        assert!(nav.unsubscribe(id));
        nav.toggle_menu();
        assert_eq!(seen.borrow().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_is_identity(initial_toggles in 0usize..8) {
            let mut nav = rendered_page();
            for _ in 0..initial_toggles {
                nav.toggle_menu();
            }
            let before = nav.state();
            nav.toggle_menu();
            nav.toggle_menu();
            prop_assert_eq!(nav.state(), before);
        }

        #[test]
        fn prop_successful_navigation_always_closes_menu(
            toggles in 0usize..5,
            index in 0usize..5,
        ) {
            let mut nav = rendered_page();
            for _ in 0..toggles {
                nav.toggle_menu();
            }
            let id = nav.registry().ids().nth(index).map(str::to_string).unwrap();
            prop_assert!(nav.navigate_to(&id).scrolled());
            prop_assert!(!nav.menu_open());
        }
    }
}
