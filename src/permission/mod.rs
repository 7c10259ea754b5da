// ABOUTME: Permission module - per-player grants with a local host bypass.
// ABOUTME: Holds the store, identity contract, well-known names and config.

mod config;
mod identity;
pub mod names;
mod store;

pub use config::*;
pub use identity::*;
pub use store::*;
