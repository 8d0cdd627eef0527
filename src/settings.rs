//! Site settings
//!
//! Static page configuration: the section list, the contact address used by
//! every "Hire Me" / contact link, and the default reveal thresholds. On the
//! web it is read from an inline JSON block in the page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CARD_REVEAL_THRESHOLD, SECTION_REVEAL_THRESHOLD};
use crate::reveal::Threshold;
use crate::sections::{RegistryError, Section, SectionRegistry};

/// Invalid site settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed site settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid sections: {0}")]
    Registry(#[from] RegistryError),
}

/// How a `data-reveal` element is triggered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealKind {
    /// Reveal when `threshold` of it is visible
    InView(Threshold),
    /// Reveal as soon as the page mounts
    Mount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Page sections in display/menu order
    pub sections: Vec<Section>,
    /// Address every contact link points at
    pub contact_email: String,
    /// Visible fraction required for `data-reveal="section"`
    pub section_reveal_threshold: Threshold,
    /// Visible fraction required for `data-reveal="card"`
    pub card_reveal_threshold: Threshold,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            sections: SectionRegistry::default_sections(),
            contact_email: "iqrazartasha33@gmail.com".to_string(),
            section_reveal_threshold: Threshold::new(SECTION_REVEAL_THRESHOLD),
            card_reveal_threshold: Threshold::new(CARD_REVEAL_THRESHOLD),
        }
    }
}

impl SiteSettings {
    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.registry()?;
        Ok(settings)
    }

    /// Validated section registry
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        SectionRegistry::new(self.sections.clone())
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.contact_email)
    }

    /// Interpret a `data-reveal` attribute value.
    ///
    /// `section`, `card` and `mount` are keywords; anything else is parsed
    /// as an explicit fraction. Unknown values fall back to the card threshold.
    pub fn reveal_kind(&self, attr: &str) -> RevealKind {
        match attr.trim().to_lowercase().as_str() {
            "section" => RevealKind::InView(self.section_reveal_threshold),
            "mount" => RevealKind::Mount,
            "" | "card" => RevealKind::InView(self.card_reveal_threshold),
            other => match other.parse::<f64>() {
                Ok(fraction) => RevealKind::InView(Threshold::new(fraction)),
                Err(_) => {
                    log::warn!("unknown reveal kind `{}`, treating as card", other);
                    RevealKind::InView(self.card_reveal_threshold)
                }
            },
        }
    }

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(crate::consts::SETTINGS_SCRIPT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded site settings ({} sections)", settings.sections.len());
                    return settings;
                }
                Err(e) => log::warn!("{}, using defaults", e),
            }
        }

        log::info!("Using default site settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SiteSettings::default();
        let registry = settings.registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(settings.section_reveal_threshold.value(), 0.4);
        assert_eq!(settings.card_reveal_threshold, Threshold::ANY);
        assert_eq!(settings.mailto(), "mailto:iqrazartasha33@gmail.com");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = SiteSettings::from_json(
            r#"{ "contact_email": "hello@example.com", "section_reveal_threshold": 1.7 }"#,
        )
        .unwrap();
        assert_eq!(settings.contact_email, "hello@example.com");
        assert_eq!(settings.section_reveal_threshold, Threshold::FULL);
        assert_eq!(settings.sections, SectionRegistry::default_sections());
    }

    #[test]
    fn test_custom_sections() {
        let settings = SiteSettings::from_json(
            r#"{ "sections": [ { "id": "home", "label": "Start" }, { "id": "blog", "label": "Blog" } ] }"#,
        )
        .unwrap();
        let ids: Vec<String> = settings.registry().unwrap().ids().map(str::to_string).collect();
        assert_eq!(ids, ["home", "blog"]);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            SiteSettings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SiteSettings::from_json(r#"{ "sections": [ { "id": "a", "label": "A" }, { "id": "a", "label": "B" } ] }"#),
            Err(ConfigError::Registry(RegistryError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_reveal_kind() {
        let settings = SiteSettings::default();
        assert_eq!(settings.reveal_kind("section"), RevealKind::InView(Threshold::new(0.4)));
        assert_eq!(settings.reveal_kind("Card"), RevealKind::InView(Threshold::ANY));
        assert_eq!(settings.reveal_kind(""), RevealKind::InView(Threshold::ANY));
        assert_eq!(settings.reveal_kind("mount"), RevealKind::Mount);
        assert_eq!(settings.reveal_kind("0.25"), RevealKind::InView(Threshold::new(0.25)));
        assert_eq!(settings.reveal_kind("sparkle"), RevealKind::InView(Threshold::ANY));
    }
}
