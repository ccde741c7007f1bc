pub mod models;
pub mod session;
pub mod provider;
pub mod events;

pub use models::{CartConfig, CartEvaluation, CartLine, LineAssessment};
pub use session::{CartError, CartSession};
pub use provider::{InMemoryVariantProvider, VariantProvider};
pub use events::CartEvent;
