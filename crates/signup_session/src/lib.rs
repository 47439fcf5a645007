//! # Session Store
//!
//! Holds the in-progress form session of every chat, keyed by chat identity.
//! The store is injected into the dispatcher; nothing here is global.

pub mod error;
pub mod memory;
pub mod store;

// Re-exports
pub use error::SessionError;
pub use memory::InMemorySessionStore;
pub use store::SessionStore;
