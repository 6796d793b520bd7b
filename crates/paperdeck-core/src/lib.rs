pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod resolve;

pub use catalog::{Catalog, LoadCache, PaperRecord};
pub use config::PaperdeckConfig;
pub use error::{PaperdeckError, Result};
