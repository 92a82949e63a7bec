//! CLI command implementations.

pub mod load;

pub use load::LoadCommand;
