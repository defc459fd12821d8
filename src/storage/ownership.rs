// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for stored resources.
//!
//! Route handlers look resources up first and then verify that the caller
//! may act on them. Admins bypass the ownership requirement.

use crate::auth::Principal;

use super::{StorageError, StorageResult};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user ID.
    fn owner_user_id(&self) -> &str;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the principal owns this resource or is an admin.
    ///
    /// # Errors
    /// Returns `StorageError::PermissionDenied` for a non-owner, non-admin
    /// principal.
    fn verify_ownership(&self, principal: &Principal) -> StorageResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, principal: &Principal) -> StorageResult<()> {
        if self.owner_user_id() == principal.user_id || principal.is_admin() {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied {
                user_id: principal.user_id.clone(),
                resource: "resource".to_string(),
            })
        }
    }
}
