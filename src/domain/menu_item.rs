//! Menu Item Entity
//!
//! A dish on the restaurant menu, as cached in the local store.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A cached menu item
///
/// `id` and `category` never change once the row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier, assigned 1-based in remote response order
    pub id: u32,
    pub name: String,
    /// Decimal price kept as text, e.g. "12.99"
    pub price: String,
    pub description: String,
    /// Image file name, resolved against the image base URL for display
    pub image: String,
    /// Lowercase category key, e.g. "mains"
    pub category: String,
}

impl MenuItem {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            description: description.into(),
            image: image.into(),
            category: category.into(),
        }
    }

    /// Display label of this item's section
    pub fn section_name(&self) -> String {
        title_case(&self.category)
    }

    /// Projection shown inside a section (category is implied by the section)
    pub fn to_view(&self) -> MenuItemView {
        MenuItemView {
            id: self.id,
            name: self.name.clone(),
            price: self.price.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }
}

impl Entity for MenuItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Menu item as listed under a section header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl MenuItemView {
    /// Price with currency sign, as printed on the dish card
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }

    /// Full image URL for the dish card
    pub fn image_url(&self, base_url: &str) -> String {
        format!("{}/{}?raw=true", base_url.trim_end_matches('/'), self.image)
    }
}

/// Uppercase the first character, leave the rest untouched
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
