//! Fetch-and-render of a single product.
//!
//! [`ProductLoader::load`] performs one GET, decodes the body and writes four
//! fields into the page. Failures never escape: they are logged once on the
//! `tracing` error channel and the page is left untouched.

use crate::api::{FieldValue, Product, ProductSource};
use crate::error::{LoadError, RenderError};
use crate::page::{
    PresentationTargets, PRODUCT_DESCRIPTION, PRODUCT_IMAGE, PRODUCT_PRICE, PRODUCT_TITLE,
};
use tokio::sync::Mutex;
use tracing::{debug, error};

pub const FALLBACK_IMAGE: &str = "image-app.png";
pub const FALLBACK_TITLE: &str = "No title";
pub const FALLBACK_DESCRIPTION: &str = "No description";
pub const FALLBACK_PRICE: &str = "0.00";

/// The four rendered values, fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub image: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

impl ProductView {
    /// Projects a product onto display values.
    pub fn project(product: &Product) -> Self {
        Self {
            image: or_fallback(&product.image, FALLBACK_IMAGE),
            title: or_fallback(&product.name, FALLBACK_TITLE),
            description: or_fallback(&product.description, FALLBACK_DESCRIPTION),
            price: format!("${}", or_fallback(&product.price, FALLBACK_PRICE)),
        }
    }

    /// Writes the view into the page.
    ///
    /// All four targets are checked before any is assigned, so a failed
    /// render leaves the page as it was.
    pub fn render<T>(&self, targets: &mut T) -> Result<(), RenderError>
    where
        T: PresentationTargets + ?Sized,
    {
        check_image(targets, PRODUCT_IMAGE)?;
        check_text(targets, PRODUCT_TITLE)?;
        check_text(targets, PRODUCT_DESCRIPTION)?;
        check_text(targets, PRODUCT_PRICE)?;

        targets.set_image_source(PRODUCT_IMAGE, self.image.clone())?;
        targets.set_text(PRODUCT_TITLE, self.title.clone())?;
        targets.set_text(PRODUCT_DESCRIPTION, self.description.clone())?;
        targets.set_text(PRODUCT_PRICE, self.price.clone())?;

        Ok(())
    }
}

fn or_fallback(field: &Option<FieldValue>, fallback: &str) -> String {
    match field {
        Some(value) if value.is_truthy() => value.to_string(),
        _ => fallback.to_string(),
    }
}

fn check_image<T: PresentationTargets + ?Sized>(targets: &T, id: &str) -> Result<(), RenderError> {
    if targets.has_image(id) {
        Ok(())
    } else if targets.has_text(id) {
        Err(RenderError::WrongKind { id: id.to_string(), expected: "image" })
    } else {
        Err(RenderError::MissingTarget(id.to_string()))
    }
}

fn check_text<T: PresentationTargets + ?Sized>(targets: &T, id: &str) -> Result<(), RenderError> {
    if targets.has_text(id) {
        Ok(())
    } else if targets.has_image(id) {
        Err(RenderError::WrongKind { id: id.to_string(), expected: "text" })
    } else {
        Err(RenderError::MissingTarget(id.to_string()))
    }
}

/// How a load attempt settled.
#[derive(Debug)]
pub enum LoadOutcome {
    Rendered(ProductView),
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered(_))
    }
}

/// Loads a product from a source into presentation targets.
///
/// Targets are only touched once the fetch has settled, so overlapping loads
/// into shared targets are independent and the last one to finish wins.
pub struct ProductLoader<S> {
    source: S,
}

impl<S: ProductSource> ProductLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches the product and renders it into `targets`.
    ///
    /// Never fails: an error is logged as
    /// `Failed to load product: <Kind>: <message>` and returned in the
    /// outcome, with `targets` unchanged.
    pub async fn load<T>(&self, targets: &mut T) -> LoadOutcome
    where
        T: PresentationTargets + ?Sized,
    {
        let fetched = self.fetch_view().await;
        settle(fetched, targets)
    }

    /// Like [`load`](Self::load), for targets shared between tasks.
    ///
    /// The lock is taken after the fetch completes and held for the render
    /// only.
    pub async fn load_shared<T>(&self, targets: &Mutex<T>) -> LoadOutcome
    where
        T: PresentationTargets + ?Sized,
    {
        let fetched = self.fetch_view().await;
        let mut guard = targets.lock().await;
        settle(fetched, &mut *guard)
    }

    /// Fetches and decodes the product without touching any target.
    pub async fn fetch_view(&self) -> Result<ProductView, LoadError> {
        let body = self.source.fetch().await?;
        let product = Product::from_json(&body)?;
        debug!("Product from {}: {:?}", self.source.endpoint(), product);

        Ok(ProductView::project(&product))
    }
}

/// Renders a fetched view, logging any failure once.
fn settle<T>(fetched: Result<ProductView, LoadError>, targets: &mut T) -> LoadOutcome
where
    T: PresentationTargets + ?Sized,
{
    let rendered = fetched.and_then(|view| {
        view.render(targets)?;
        Ok(view)
    });

    match rendered {
        Ok(view) => LoadOutcome::Rendered(view),
        Err(e) => {
            error!("Failed to load product: {}: {}", e.name(), e);
            LoadOutcome::Failed(e)
        }
    }
}
