//! Load command implementation.

use crate::api::{ProductClient, ProductSource};
use crate::config::Config;
use crate::format::Formatter;
use crate::loader::{LoadOutcome, ProductLoader};
use crate::page::Page;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Loads the product into a page and formats the result.
pub struct LoadCommand {
    config: Config,
}

impl LoadCommand {
    /// Creates a new load command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the load against the configured endpoint.
    ///
    /// The page starts from `page_path` when given, otherwise from the empty
    /// product page. A failed load still prints the (unchanged) page.
    pub async fn execute(&self, page_path: Option<&Path>, save: bool) -> Result<String> {
        let client = ProductClient::new(&self.config).context("Failed to create HTTP client")?;

        let mut page = match page_path {
            Some(path) => Page::from_file(path)?,
            None => Page::product(),
        };

        self.execute_with_source(client, &mut page).await;

        if save {
            if let Some(path) = page_path {
                page.save(path)?;
            }
        }

        Ok(Formatter::new(self.config.format).format_page(&page))
    }

    /// Runs the load with a provided source (for testing).
    pub async fn execute_with_source<S: ProductSource>(
        &self,
        source: S,
        page: &mut Page,
    ) -> LoadOutcome {
        info!("Loading product from {}", source.endpoint());

        ProductLoader::new(source).load(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::LoadError;
    use crate::page::{PresentationTargets, PRODUCT_TITLE};
    use async_trait::async_trait;
    use tempfile::NamedTempFile;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockSource {
        body: Option<String>,
    }

    #[async_trait]
    impl ProductSource for MockSource {
        async fn fetch(&self) -> Result<String, LoadError> {
            self.body.clone().ok_or(LoadError::Status(503))
        }

        fn endpoint(&self) -> &str {
            "mock://products/"
        }
    }

    fn make_test_config(endpoint: String, format: OutputFormat) -> Config {
        Config { endpoint, proxy: None, format }
    }

    #[tokio::test]
    async fn test_execute_with_source_renders() {
        let cmd = LoadCommand::new(Config::default());
        let mut page = Page::product();
        let source = MockSource { body: Some(r#"{"name":"Widget"}"#.to_string()) };

        let outcome = cmd.execute_with_source(source, &mut page).await;
        assert!(outcome.is_rendered());
        assert_eq!(page.get(PRODUCT_TITLE).unwrap().value(), "Widget");
    }

    #[tokio::test]
    async fn test_execute_with_source_failure() {
        let cmd = LoadCommand::new(Config::default());
        let mut page = Page::product();

        let outcome = cmd.execute_with_source(MockSource { body: None }, &mut page).await;
        assert!(!outcome.is_rendered());
        assert_eq!(page, Page::product());
    }

    #[tokio::test]
    async fn test_execute_json_output() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"name":"Widget","price":9.99}"#),
            )
            .mount(&mock_server)
            .await;

        let config = make_test_config(mock_server.uri(), OutputFormat::Json);
        let output = LoadCommand::new(config).execute(None, false).await.unwrap();

        let page: Page = serde_json::from_str(&output).unwrap();
        assert_eq!(page.get(PRODUCT_TITLE).unwrap().value(), "Widget");
        assert_eq!(page.get("product-price").unwrap().value(), "$9.99");
        assert_eq!(page.get("product-image").unwrap().value(), "image-app.png");
    }

    #[tokio::test]
    async fn test_execute_failure_prints_prior_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let file = NamedTempFile::new().unwrap();
        let mut prior = Page::product();
        prior.set_text(PRODUCT_TITLE, "Loading...".to_string()).unwrap();
        prior.save(file.path()).unwrap();

        let config = make_test_config(mock_server.uri(), OutputFormat::Csv);
        let output = LoadCommand::new(config).execute(Some(file.path()), true).await.unwrap();

        assert!(output.contains("product-title,text,Loading..."));
        assert_eq!(Page::from_file(file.path()).unwrap(), prior);
    }

    #[tokio::test]
    async fn test_execute_saves_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"Widget"}"#))
            .mount(&mock_server)
            .await;

        let file = NamedTempFile::new().unwrap();
        Page::product().save(file.path()).unwrap();

        let config = make_test_config(mock_server.uri(), OutputFormat::Table);
        LoadCommand::new(config).execute(Some(file.path()), true).await.unwrap();

        let saved = Page::from_file(file.path()).unwrap();
        assert_eq!(saved.get(PRODUCT_TITLE).unwrap().value(), "Widget");
        assert_eq!(saved.get("product-description").unwrap().value(), "No description");
    }

    #[tokio::test]
    async fn test_execute_missing_page_file() {
        let config = make_test_config("http://127.0.0.1:1/".to_string(), OutputFormat::Table);
        let missing = Path::new("/nonexistent/page.json");
        let result = LoadCommand::new(config).execute(Some(missing), false).await;

        assert!(result.unwrap_err().to_string().contains("Failed to read page file"));
    }
}
