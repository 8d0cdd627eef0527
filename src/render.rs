//! DOM rendering layer
//!
//! Reflects navigation and reveal state into the page. Only reads state;
//! all mutation goes through the controllers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::consts::*;
use crate::nav::NavigationState;
use crate::sections::SectionRegistry;
use crate::settings::{RevealKind, SiteSettings};

/// Fill the desktop bar and the mobile menu with one button per section,
/// in registry order, followed by the "Hire Me" link
pub fn build_nav(document: &Document, registry: &SectionRegistry, settings: &SiteSettings) {
    for container_id in [DESKTOP_NAV_ID, MOBILE_MENU_ID] {
        let Some(container) = document.get_element_by_id(container_id) else {
            log::warn!("#{} missing, nav not rendered there", container_id);
            continue;
        };
        container.set_text_content(None);

        for section in registry {
            if let Ok(button) = document.create_element("button") {
                let _ = button.set_attribute(NAV_ATTR, &section.id);
                let _ = button.set_attribute("class", "nav-link");
                button.set_text_content(Some(&section.label));
                let _ = container.append_child(&button);
            }
        }

        if let Ok(link) = document.create_element("a") {
            let _ = link.set_attribute("data-contact", "");
            let _ = link.set_attribute("class", "hire-me");
            link.set_text_content(Some("Hire Me"));
            let _ = container.append_child(&link);
        }
    }

    if let Some(brand) = document.get_element_by_id(BRAND_ID) {
        let _ = brand.set_attribute(NAV_ATTR, HOME_SECTION);
    }
    if let Some(cta) = document.get_element_by_id(HERO_CTA_ID) {
        let _ = cta.set_attribute(NAV_ATTR, PROJECTS_SECTION);
    }

    apply_contact_links(document, settings);
}

/// Point every `[data-contact]` link at the configured address
pub fn apply_contact_links(document: &Document, settings: &SiteSettings) {
    let mailto = settings.mailto();
    for link in select_all(document, "[data-contact]") {
        let _ = link.set_attribute("href", &mailto);
    }
}

/// Show or collapse the mobile menu
pub fn apply_menu(document: &Document, state: &NavigationState) {
    if let Some(menu) = document.get_element_by_id(MOBILE_MENU_ID) {
        let _ = menu
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, !state.menu_open);
    }
    let expanded = if state.menu_open { "true" } else { "false" };
    for toggle in select_all(document, &format!("[{}]", MENU_TOGGLE_ATTR)) {
        let _ = toggle.set_attribute("aria-expanded", expanded);
    }
}

/// Start an element's one-shot enter transition
pub fn apply_reveal(document: &Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.class_list().add_1(REVEALED_CLASS);
    }
}

/// Whether an element already went through its enter transition
pub fn has_revealed(document: &Document, element_id: &str) -> bool {
    document
        .get_element_by_id(element_id)
        .map(|el| el.class_list().contains(REVEALED_CLASS))
        .unwrap_or(false)
}

pub fn stamp_footer_year(document: &Document) {
    if let Some(el) = document.get_element_by_id(FOOTER_YEAR_ID) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

/// Every `[data-reveal]` element with its trigger; elements without an id are skipped
pub fn reveal_targets(document: &Document, settings: &SiteSettings) -> Vec<(String, RevealKind)> {
    let selector = format!("[{}]", REVEAL_ATTR);
    select_all(document, &selector)
        .into_iter()
        .filter_map(|el| {
            let id = el.id();
            if id.is_empty() {
                log::warn!("{} element without an id cannot be tracked", REVEAL_ATTR);
                return None;
            }
            let attr = el.get_attribute(REVEAL_ATTR).unwrap_or_default();
            Some((id, settings.reveal_kind(&attr)))
        })
        .collect()
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
