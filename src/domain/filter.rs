//! Category Filter State
//!
//! One on/off flag per known category, in the order the pills are shown.

use serde::{Deserialize, Serialize};

/// Active category selection
///
/// No active flag means "no restriction", never "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    categories: Vec<String>,
    active: Vec<bool>,
}

impl FilterState {
    pub fn new(categories: Vec<String>) -> Self {
        let active = vec![false; categories.len()];
        Self { categories, active }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn flags(&self) -> &[bool] {
        &self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Flip one category slot. Returns false if `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.active.get_mut(index) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    /// True when no category restriction applies
    pub fn is_unrestricted(&self) -> bool {
        self.active.iter().all(|flag| !flag)
    }

    /// Categories to restrict a store query to; empty means no restriction
    pub fn selected_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .zip(&self.active)
            .filter(|&(_, &on)| on)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
