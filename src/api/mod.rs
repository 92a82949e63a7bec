//! Product API client and data model.

pub mod client;
pub mod models;

pub use client::{ProductClient, ProductSource};
pub use models::{FieldValue, Product};
