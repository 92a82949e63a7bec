//! product-loader - fetch a product record and render it into a page
//!
//! One GET against a JSON endpoint, permissive decoding, and four fields
//! projected onto named presentation targets with per-field fallbacks.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod page;

pub use api::{FieldValue, Product, ProductClient, ProductSource};
pub use config::Config;
pub use error::{LoadError, RenderError};
pub use loader::{LoadOutcome, ProductLoader, ProductView};
pub use page::{Element, Page, PresentationTargets};
