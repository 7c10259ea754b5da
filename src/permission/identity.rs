// ABOUTME: Defines the Identity trait - the opaque player handle the store keys on.
// ABOUTME: Handles are owned by the session layer; the store only compares them.

use std::fmt::Debug;
use std::hash::Hash;

/// A handle for a connected player or session.
///
/// The store never creates or destroys identities. A handle that can outlive
/// its session (like an entity reference) overrides [`Identity::is_valid`];
/// querying the store with an invalid handle is a caller bug and panics.
pub trait Identity: Clone + Eq + Hash + Debug + Send + Sync {
    /// Whether the handle still refers to a live session.
    fn is_valid(&self) -> bool {
        true
    }
}

impl Identity for u32 {}

impl Identity for u64 {}

impl Identity for String {}

impl Identity for uuid::Uuid {
    fn is_valid(&self) -> bool {
        !self.is_nil()
    }
}
