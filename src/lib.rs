//! Folio - a scroll-driven single-page portfolio
//!
//! Core modules:
//! - `sections`: Ordered registry of page sections (also the menu order)
//! - `nav`: Navigation controller (mobile menu state, smooth scroll to section)
//! - `reveal`: One-shot viewport reveal scheduler
//! - `platform`: Browser/headless abstraction for element lookup, scrolling and
//!   viewport intersection
//! - `settings`: Site settings (sections, contact link, reveal thresholds)
//! - `signal`: State-change listeners shared by `nav` and `reveal`
//! - `render`: DOM rendering layer (WASM only)

pub mod nav;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod reveal;
pub mod sections;
pub mod settings;
pub mod signal;

pub use nav::{NavOutcome, NavigationController, NavigationState};
pub use reveal::{RevealPhase, RevealScheduler, Threshold};
pub use sections::{RegistryError, Section, SectionRegistry};
pub use settings::{ConfigError, SiteSettings};
pub use signal::SubscriptionId;

/// Page configuration constants
pub mod consts {
    /// Fraction of a section heading that must be visible before it reveals
    pub const SECTION_REVEAL_THRESHOLD: f64 = 0.4;
    /// Cards reveal as soon as any part of them is visible
    pub const CARD_REVEAL_THRESHOLD: f64 = 0.0;

    /// Section the brand button jumps to
    pub const HOME_SECTION: &str = "home";
    /// Section the hero call-to-action jumps to
    pub const PROJECTS_SECTION: &str = "projects";

    /// Attribute marking an element for reveal (`section`, `card`, `mount` or a fraction)
    pub const REVEAL_ATTR: &str = "data-reveal";
    /// Attribute on clickable elements naming the section to navigate to
    pub const NAV_ATTR: &str = "data-nav";
    /// Attribute on the hamburger button
    pub const MENU_TOGGLE_ATTR: &str = "data-menu-toggle";

    /// Class added once an element has revealed
    pub const REVEALED_CLASS: &str = "revealed";
    /// Class used to collapse the mobile menu
    pub const HIDDEN_CLASS: &str = "hidden";

    /// DOM ids the rendering layer fills in
    pub const DESKTOP_NAV_ID: &str = "desktop-nav";
    pub const MOBILE_MENU_ID: &str = "mobile-menu";
    pub const FOOTER_YEAR_ID: &str = "footer-year";
    pub const SETTINGS_SCRIPT_ID: &str = "site-settings";
    pub const BRAND_ID: &str = "brand";
    pub const HERO_CTA_ID: &str = "hero-cta";
}
