pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::VoiceCatalog;
pub use error::CatalogError;
pub use model::Voice;
