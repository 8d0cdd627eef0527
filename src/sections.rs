//! Section registry
//!
//! The ordered list of page sections. Insertion order is both the document
//! order and the menu order. Fixed at startup.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named region of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// DOM id of the section element
    pub id: String,
    /// Menu label
    pub label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Reasons a list of sections cannot form a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("section registry is empty")]
    Empty,
    #[error("section at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate section id `{0}`")]
    DuplicateId(String),
}

/// Ordered, id-unique set of sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry, rejecting empty or duplicate ids
    pub fn new(sections: Vec<Section>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(sections.len());
        for (i, section) in sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(RegistryError::EmptyId(i));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }

        Ok(Self { sections })
    }

    /// home, about, skills, projects, contact
    pub fn default_sections() -> Vec<Section> {
        vec![
            Section::new("home", "Home"),
            Section::new("about", "About"),
            Section::new("skills", "Skills"),
            Section::new("projects", "Projects"),
            Section::new("contact", "Contact"),
        ]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Position of a section in display order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            sections: Self::default_sections(),
        }
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
