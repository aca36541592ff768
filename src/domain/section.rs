//! Section Organizer
//!
//! Groups a flat item list into display sections, one per category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use super::menu_item::{MenuItem, MenuItemView};

/// A named group of items under one section header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Title-cased category, e.g. "Mains"
    pub name: String,
    pub items: Vec<MenuItemView>,
}

/// Group items by title-cased category.
///
/// Sections appear in the order their category is first seen and items keep
/// their input order inside a section. No other sorting is applied.
pub fn organize(items: &[MenuItem]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let name = item.section_name();
        match index.get(&name) {
            Some(&pos) => sections[pos].items.push(item.to_view()),
            None => {
                index.insert(name.clone(), sections.len());
                sections.push(Section {
                    name,
                    items: vec![item.to_view()],
                });
            }
        }
    }

    sections
}
