//! Contract module containing trait definitions for model resolution

mod model_catalog;
mod model_selector;

pub use model_catalog::ModelCatalog;
pub use model_selector::ModelSelector;
