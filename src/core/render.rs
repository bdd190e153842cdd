//! # List Renderer
//!
//! Turns catalog data into display-item descriptors. Nothing here knows
//! about the terminal: the TUI adapter draws whatever these functions
//! return, and tests assert on the descriptors directly.
//!
//! Every call builds a complete replacement list. Callers swap the old
//! list out wholesale, so repeated renders never accumulate entries.

use std::time::Duration;

use crate::catalog::Catalog;

/// One card in the categories grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    /// Lookup tag used when the card is selected.
    pub category_id: String,
    pub title: String,
    pub description: String,
    /// Cards highlight under the pointer.
    pub hoverable: bool,
}

/// How an entry's outbound link is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    /// Open in a separate browser process, not tied to this one.
    pub detached: bool,
    /// Never pass along where the user came from.
    pub no_referrer: bool,
}

impl LinkTarget {
    fn isolated(url: &str) -> Self {
        Self {
            url: url.to_string(),
            detached: true,
            no_referrer: true,
        }
    }
}

/// One entry in the tools panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub link: LinkTarget,
    /// Time after the render at which the entry becomes visible.
    pub reveal_delay: Duration,
    /// Virtual time at which the entry was revealed. `None` while hidden.
    pub revealed_at: Option<Duration>,
}

impl ToolEntry {
    pub fn is_visible(&self) -> bool {
        self.revealed_at.is_some()
    }
}

/// The contents of the tools panel for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsList {
    pub category_id: String,
    pub title: String,
    pub entries: Vec<ToolEntry>,
}

/// Delay parameters for the staggered entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    /// Delay before the first entry.
    pub base: Duration,
    /// Extra delay per entry index.
    pub step: Duration,
}

impl Stagger {
    pub fn delay_for(&self, index: usize) -> Duration {
        self.base + self.step * index as u32
    }
}

/// One card per category, in catalog order.
pub fn render_categories(catalog: &Catalog) -> Vec<CategoryCard> {
    catalog
        .categories
        .iter()
        .map(|category| CategoryCard {
            category_id: category.id.clone(),
            title: category.title.clone(),
            description: category.description.clone(),
            hoverable: true,
        })
        .collect()
}

/// The tools list for `category_id`, all entries hidden with increasing
/// reveal delays. Returns `None` for an unknown id.
pub fn render_tools(catalog: &Catalog, category_id: &str, stagger: Stagger) -> Option<ToolsList> {
    let category = catalog.category(category_id)?;
    let entries = category
        .tools
        .iter()
        .enumerate()
        .map(|(index, tool)| ToolEntry {
            name: tool.name.clone(),
            description: tool.description.clone(),
            link: LinkTarget::isolated(&tool.link),
            reveal_delay: stagger.delay_for(index),
            revealed_at: None,
        })
        .collect();

    Some(ToolsList {
        category_id: category.id.clone(),
        title: category.title.clone(),
        entries,
    })
}
