//! Off-chain authentication of social actions via recoverable signatures

mod authenticator;
mod signature;

pub use authenticator::{Authenticated, Authenticator};
pub use signature::{personal_message_hash, recover_signer};
