//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::catalog::{Catalog, Category, Tool};
use crate::core::action::{Action, update};
use crate::core::config::Timings;
use crate::core::state::App;

/// A category whose tools are named `tool_names`, each linking to
/// `https://example.com/<name>`.
pub fn category(id: &str, title: &str, tool_names: &[&str]) -> Category {
    Category {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("All about {}", title.to_lowercase()),
        tools: tool_names
            .iter()
            .map(|name| Tool {
                name: name.to_string(),
                description: format!("{name} does things"),
                link: format!("https://example.com/{name}"),
            })
            .collect(),
    }
}

/// Three categories with 3, 2 and 1 tools.
pub fn sample_catalog() -> Catalog {
    Catalog {
        categories: vec![
            category("writing", "Writing", &["Draftly", "Proofer", "Outliner"]),
            category("coding", "Coding", &["Pairbot", "Linty"]),
            category("design", "Design", &["Sketcher"]),
        ],
    }
}

/// `{categories:[{id:"a",title:"A",tools:[{name:"T1",link:"https://x"}]}]}`
pub fn single_category_catalog() -> Catalog {
    Catalog {
        categories: vec![Category {
            id: "a".to_string(),
            title: "A".to_string(),
            description: String::new(),
            tools: vec![Tool {
                name: "T1".to_string(),
                description: String::new(),
                link: "https://x".to_string(),
            }],
        }],
    }
}

/// Creates a test App with default timings and no catalog yet.
pub fn test_app() -> App {
    App::new(Timings::default())
}

/// Creates a test App whose catalog has already loaded.
pub fn loaded_app(catalog: Catalog) -> App {
    let mut app = test_app();
    update(&mut app, Action::CatalogLoaded(Ok(catalog)));
    app
}
