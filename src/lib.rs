//! Betpool core library
//!
//! The authenticated social-action subsystem of the Betpool prediction
//! market: recoverable-signature authentication of comments and likes,
//! optimistic client state with debounced persistence, and bet/payout
//! analytics derived from the on-chain indexer's GraphQL API.

pub mod auth;
pub mod config;
pub mod error;
pub mod indexer;
pub mod models;
pub mod social;
pub mod stats;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AuthRejection, CoreError, CoreResult};
pub use models::*;
