//! Presentation targets: the page elements a load writes into.

use crate::error::RenderError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const PRODUCT_IMAGE: &str = "product-image";
pub const PRODUCT_TITLE: &str = "product-title";
pub const PRODUCT_DESCRIPTION: &str = "product-description";
pub const PRODUCT_PRICE: &str = "product-price";

/// Something that exposes named image and text targets.
///
/// Setters fail when the id is unknown or names the other kind of element.
pub trait PresentationTargets {
    /// Returns true if `id` names an image target.
    fn has_image(&self, id: &str) -> bool;

    /// Returns true if `id` names a text target.
    fn has_text(&self, id: &str) -> bool;

    /// Sets the source URL of an image target.
    fn set_image_source(&mut self, id: &str, src: String) -> Result<(), RenderError>;

    /// Sets the text content of a text target.
    fn set_text(&mut self, id: &str, text: String) -> Result<(), RenderError>;
}

/// A single page element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Image { src: String },
    Text { text: String },
}

impl Element {
    /// Empty image element.
    pub fn image() -> Self {
        Element::Image { src: String::new() }
    }

    /// Empty text element.
    pub fn text() -> Self {
        Element::Text { text: String::new() }
    }

    /// Returns the element kind as a lowercase name.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Image { .. } => "image",
            Element::Text { .. } => "text",
        }
    }

    /// Returns the image source or the text content.
    pub fn value(&self) -> &str {
        match self {
            Element::Image { src } => src,
            Element::Text { text } => text,
        }
    }
}

/// In-memory page holding elements by id, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    elements: BTreeMap<String, Element>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the product page with its four empty targets.
    pub fn product() -> Self {
        let mut page = Self::new();
        page.insert(PRODUCT_IMAGE, Element::image());
        page.insert(PRODUCT_TITLE, Element::text());
        page.insert(PRODUCT_DESCRIPTION, Element::text());
        page.insert(PRODUCT_PRICE, Element::text());
        page
    }

    /// Loads a page from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading page from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse page file: {}", path.display()))
    }

    /// Writes the page to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving page to: {}", path.display());

        let content = serde_json::to_string_pretty(self).context("Failed to serialize page")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write page file: {}", path.display()))
    }

    /// Adds or replaces an element.
    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    /// Removes an element, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    /// Looks up an element by id.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Iterates over elements in id order.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.elements.iter().map(|(id, element)| (id.as_str(), element))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element, RenderError> {
        self.elements.get_mut(id).ok_or_else(|| RenderError::MissingTarget(id.to_string()))
    }
}

impl PresentationTargets for Page {
    fn has_image(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Element::Image { .. }))
    }

    fn has_text(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Element::Text { .. }))
    }

    fn set_image_source(&mut self, id: &str, value: String) -> Result<(), RenderError> {
        match self.element_mut(id)? {
            Element::Image { src } => {
                *src = value;
                Ok(())
            }
            Element::Text { .. } => {
                Err(RenderError::WrongKind { id: id.to_string(), expected: "image" })
            }
        }
    }

    fn set_text(&mut self, id: &str, value: String) -> Result<(), RenderError> {
        match self.element_mut(id)? {
            Element::Text { text } => {
                *text = value;
                Ok(())
            }
            Element::Image { .. } => {
                Err(RenderError::WrongKind { id: id.to_string(), expected: "text" })
            }
        }
    }
}
