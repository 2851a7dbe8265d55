//! Azure resource discovery
//!
//! Models and listing calls for the subscription → server → database
//! chain used by both the interactive workflow and the flag-driven
//! commands.

pub mod discovery;
pub mod models;

pub use discovery::{AzureDiscovery, DiscoveryError, ResourceDiscovery};
pub use models::{Database, Server, Subscription};
