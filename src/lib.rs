// ABOUTME: Root module for warden - permission grants for game server players.
// ABOUTME: Re-exports all public types from submodules.

pub mod error;
pub mod permission;
pub mod prelude;

pub use error::WardenError;
