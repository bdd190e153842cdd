//! One-shot catalog loading: fetch, parse, validate.

use log::{info, warn};

use super::source::{CatalogSource, LoadError};
use super::Catalog;

/// Parse and validate a catalog document.
pub fn parse(body: &str) -> Result<Catalog, LoadError> {
    let catalog: Catalog =
        serde_json::from_str(body).map_err(|e| LoadError::Parse(e.to_string()))?;
    catalog.validate().map_err(LoadError::Invalid)?;
    Ok(catalog)
}

/// Fetch the catalog from `source` once. No retry.
pub async fn load(source: &dyn CatalogSource) -> Result<Catalog, LoadError> {
    let body = source.fetch().await.inspect_err(|e| {
        warn!("Could not load tools data from {}: {}", source.describe(), e);
    })?;

    let catalog = parse(&body).inspect_err(|e| {
        warn!("Catalog from {} rejected: {}", source.describe(), e);
    })?;

    info!(
        "Loaded catalog: {} categories, {} tools",
        catalog.categories.len(),
        catalog.tool_count()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use async_trait::async_trait;

    struct StaticSource(Result<&'static str, u16>);

    #[async_trait]
    impl CatalogSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<String, LoadError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(LoadError::Status { status }),
            }
        }
    }

    #[test]
    fn test_parse_preserves_order() {
        let body = r#"{"categories":[
            {"id":"b","title":"B","description":"","tools":[
                {"name":"Z","description":"","link":"https://z"},
                {"name":"A","description":"","link":"https://a"}]},
            {"id":"a","title":"A","description":"","tools":[]}]}"#;
        let catalog = parse(body).unwrap();
        let ids: Vec<_> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        let names: Vec<_> = catalog.categories[0].tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }

    #[test]
    fn test_parse_rejects_missing_categories_field() {
        assert!(matches!(parse(r#"{"tools":[]}"#), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let body = r#"{"categories":[{"id":"a","title":"A"},{"id":"a","title":"B"}]}"#;
        assert!(matches!(
            parse(body),
            Err(LoadError::Invalid(CatalogError::DuplicateId(_)))
        ));
    }

    #[tokio::test]
    async fn test_load_success() {
        let source = StaticSource(Ok(r#"{"categories":[{"id":"a","title":"A","tools":[]}]}"#));
        let catalog = load(&source).await.unwrap();
        assert_eq!(catalog.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_load_propagates_fetch_failure() {
        let source = StaticSource(Err(503));
        assert!(matches!(
            load(&source).await,
            Err(LoadError::Status { status: 503 })
        ));
    }
}
