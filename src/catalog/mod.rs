//! # Catalog Model
//!
//! The data the browser displays: an ordered list of categories, each
//! holding an ordered list of tools. Built once by the [`loader`] and
//! read-only for the rest of the session.
//!
//! ```text
//! Catalog
//! └── categories: Vec<Category>
//!     ├── id, title, description
//!     └── tools: Vec<Tool>        // display order = source order
//!         └── name, description, link
//! ```

pub mod loader;
pub mod source;

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

pub use loader::load;
pub use source::{CatalogSource, FileSource, HttpSource, LoadError, source_for};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// A single catalog entry. Has no identity beyond its position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
}

/// Structural problems found after a catalog parses successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two categories share the same id.
    DuplicateId(String),
    /// A category has an empty (or whitespace-only) id. Carries its position.
    EmptyId(usize),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate category id: {id}"),
            CatalogError::EmptyId(index) => write!(f, "category #{index} has an empty id"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl Catalog {
    /// Look a category up by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Checks the identity invariant: every category id is non-empty and unique.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for (index, category) in self.categories.iter().enumerate() {
            if category.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateId(category.id.clone()));
            }
        }
        Ok(())
    }

    pub fn tool_count(&self) -> usize {
        self.categories.iter().map(|c| c.tools.len()).sum()
    }
}
