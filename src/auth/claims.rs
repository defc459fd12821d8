// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the resolved per-request identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims embedded in a signed auth token.
///
/// The wire field names (`userId`, `email`, `role`) match what browser
/// clients already decode from the payload segment, so they are part of
/// the public contract. `iat`/`exp` are standard JWT timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Canonical user ID
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Account email, carried for display and audit only
    pub email: String,

    /// Role at issuance time (role changes apply at next issuance)
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// The authenticated identity resolved from a verified token.
///
/// This is the primary type used throughout the application to represent
/// the user making a request. It is constructed only by successful token
/// verification, lives for one request, and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Canonical user ID
    pub user_id: String,

    /// Account email
    pub email: String,

    /// Authorization role
    pub role: Role,
}

impl Principal {
    /// Create from verified claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }

    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
