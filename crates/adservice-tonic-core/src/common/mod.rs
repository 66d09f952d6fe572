pub mod catalog;
pub mod error;

pub use catalog::AdCatalog;
pub use error::{Error, Result};
