pub mod error;
pub mod orchestrator;
pub mod order;
pub mod resolver;
pub mod user;

pub use error::{Result, StorefrontError};
