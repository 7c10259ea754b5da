// ABOUTME: Implements the PermissionStore - a thread-safe map from player
// ABOUTME: identities to their granted permission names.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use super::Identity;
use super::names;
use crate::error::PermissionError;

/// A thread-safe store of permission grants.
///
/// Each identity maps to the set of permission names it holds. Entries are
/// created on the first grant and dropped once the last permission is
/// removed, so an unknown identity and one with no grants look the same.
///
/// An optional local identity (the host of a listen server) holds every
/// permission regardless of what is stored for it.
pub struct PermissionStore<I: Identity> {
    grants: Arc<RwLock<HashMap<I, HashSet<String>>>>,
    local: Option<I>,
    defaults: Arc<[String]>,
}

impl<I: Identity> Default for PermissionStore<I> {
    fn default() -> Self {
        Self {
            grants: Arc::new(RwLock::new(HashMap::new())),
            local: None,
            defaults: Vec::new().into(),
        }
    }
}

impl<I: Identity> PermissionStore<I> {
    /// Create a new empty store with no local identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty store where `local` bypasses every check.
    pub fn with_local_identity(local: I) -> Self {
        tracing::info!(identity = ?local, "permission store created with local identity");
        Self {
            local: Some(local),
            ..Self::default()
        }
    }

    /// Set the permissions granted by [`PermissionStore::on_connect`].
    pub fn with_default_permissions<P>(mut self, defaults: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<String>,
    {
        self.defaults = defaults.into_iter().map(Into::into).collect();
        self
    }

    /// The permissions granted to newly connected players.
    pub fn default_permissions(&self) -> &[String] {
        &self.defaults
    }

    /// The identity that bypasses checks, if any.
    pub fn local_identity(&self) -> Option<&I> {
        self.local.as_ref()
    }

    /// Check if `identity` is the local identity.
    pub fn is_local(&self, identity: &I) -> bool {
        self.local.as_ref() == Some(identity)
    }

    /// Grant a permission. Granting a held permission is a no-op, as is
    /// granting [`names::NO_PERMISSION`].
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn add_permission(&self, identity: &I, permission: &str) {
        assert_valid(identity);
        if names::is_no_permission(permission) {
            return;
        }

        let mut grants = self.grants.write();
        let added = grants
            .entry(identity.clone())
            .or_default()
            .insert(permission.to_string());
        if added {
            tracing::debug!(?identity, permission, "permission granted");
        }
    }

    /// Grant several permissions under a single lock.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn grant_all<P>(&self, identity: &I, permissions: impl IntoIterator<Item = P>)
    where
        P: AsRef<str>,
    {
        assert_valid(identity);

        let mut grants = self.grants.write();
        let set = grants.entry(identity.clone()).or_default();
        for permission in permissions {
            let permission = permission.as_ref();
            if !names::is_no_permission(permission) && set.insert(permission.to_string()) {
                tracing::debug!(?identity, permission, "permission granted");
            }
        }
        if set.is_empty() {
            grants.remove(identity);
        }
    }

    /// Revoke a permission. Revoking one that isn't held is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn remove_permission(&self, identity: &I, permission: &str) {
        assert_valid(identity);

        let mut grants = self.grants.write();
        let Some(set) = grants.get_mut(identity) else {
            return;
        };
        if set.remove(permission) {
            tracing::debug!(?identity, permission, "permission revoked");
        }
        if set.is_empty() {
            grants.remove(identity);
        }
    }

    /// Check if `identity` holds `permission`.
    ///
    /// Always true for the local identity and for [`names::NO_PERMISSION`].
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn has_permission(&self, identity: &I, permission: &str) -> bool {
        assert_valid(identity);
        if self.is_local(identity) || names::is_no_permission(permission) {
            return true;
        }

        let grants = self.grants.read();
        let held = grants
            .get(identity)
            .is_some_and(|set| set.contains(permission));
        tracing::trace!(?identity, permission, held, "permission check");
        held
    }

    /// Check if `identity` holds any permission accepted by `predicate`.
    ///
    /// Always true for the local identity. False for an identity with no
    /// grants; the [`names::NO_PERMISSION`] rule does not apply here. The order in
    /// which held permissions are offered to `predicate` is unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn has_permission_matching<F>(&self, identity: &I, predicate: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        assert_valid(identity);
        if self.is_local(identity) {
            return true;
        }

        // The predicate may call back into the store, so it runs unlocked.
        let held: Vec<String> = match self.grants.read().get(identity) {
            Some(set) => set.iter().cloned().collect(),
            None => return false,
        };
        held.iter().any(|p| predicate(p.as_str()))
    }

    /// Gate an action on `permission`.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn require(&self, identity: &I, permission: &str) -> Result<(), PermissionError> {
        if self.has_permission(identity, permission) {
            return Ok(());
        }
        tracing::warn!(?identity, permission, "permission denied");
        Err(PermissionError::Denied {
            permission: permission.to_string(),
        })
    }

    /// The permissions stored for `identity`, sorted alphabetically.
    ///
    /// The local identity's bypass is not reflected here.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn permissions(&self, identity: &I) -> Vec<String> {
        assert_valid(identity);
        let grants = self.grants.read();
        let mut names: Vec<_> = grants
            .get(identity)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Grant the default permissions to a newly connected player.
    ///
    /// # Panics
    ///
    /// Panics if `identity` is no longer valid.
    pub fn on_connect(&self, identity: &I) {
        let defaults = Arc::clone(&self.defaults);
        self.grant_all(identity, defaults.iter());
    }

    /// Drop everything held by `identity`, returning what it held (sorted).
    ///
    /// Called when a session ends, so the identity may already be invalid.
    pub fn forget(&self, identity: &I) -> Vec<String> {
        let removed = self.grants.write().remove(identity);
        let mut names: Vec<_> = removed.map(|set| set.into_iter().collect()).unwrap_or_default();
        if !names.is_empty() {
            tracing::debug!(?identity, count = names.len(), "identity forgotten");
        }
        names.sort();
        names
    }

    /// Drop entries for identities that are no longer valid.
    ///
    /// Returns the number of entries removed.
    pub fn prune_invalid(&self) -> usize {
        let mut grants = self.grants.write();
        let before = grants.len();
        grants.retain(|identity, _| identity.is_valid());
        let pruned = before - grants.len();
        if pruned > 0 {
            tracing::debug!(pruned, "pruned invalid identities");
        }
        pruned
    }

    /// Get the number of identities holding at least one permission.
    pub fn count(&self) -> usize {
        self.grants.read().len()
    }
}

impl<I: Identity> Clone for PermissionStore<I> {
    fn clone(&self) -> Self {
        Self {
            grants: Arc::clone(&self.grants),
            local: self.local.clone(),
            defaults: Arc::clone(&self.defaults),
        }
    }
}

fn assert_valid<I: Identity>(identity: &I) {
    assert!(
        identity.is_valid(),
        "permission store used with invalid identity {identity:?}"
    );
}
