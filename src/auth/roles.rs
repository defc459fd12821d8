// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access to all endpoints and every listing
/// - `Agent` - Can manage own property listings and their inquiries
/// - `User` - Normal visitor account (favorites, own inquiries)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Listing agent (owns properties)
    Agent,
    /// Normal end user
    User,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            // Admin can do anything
            (Role::Admin, _) => true,
            // Agents can do agent and user things
            (Role::Agent, Role::Agent) => true,
            (Role::Agent, Role::User) => true,
            // Users can do user things
            (Role::User, Role::User) => true,
            // Everything else is denied
            _ => false,
        }
    }

    /// True for roles allowed to manage property listings.
    pub fn can_manage_listings(&self) -> bool {
        matches!(self, Role::Agent | Role::Admin)
    }

    /// Parse role from string (case-insensitive).
    /// Used when extracting roles from token claims.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "agent" => Some(Role::Agent),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is User (least privilege for authenticated users).
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Agent => write!(f, "agent"),
            Role::User => write!(f, "user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_all_privileges() {
        assert!(Role::Admin.has_privilege(Role::Admin));
        assert!(Role::Admin.has_privilege(Role::Agent));
        assert!(Role::Admin.has_privilege(Role::User));
    }

    #[test]
    fn agent_covers_agent_and_user() {
        assert!(!Role::Agent.has_privilege(Role::Admin));
        assert!(Role::Agent.has_privilege(Role::Agent));
        assert!(Role::Agent.has_privilege(Role::User));
    }

    #[test]
    fn user_only_has_user_privilege() {
        assert!(!Role::User.has_privilege(Role::Admin));
        assert!(!Role::User.has_privilege(Role::Agent));
        assert!(Role::User.has_privilege(Role::User));
    }

    #[test]
    fn listing_management_is_agent_or_admin() {
        assert!(Role::Admin.can_manage_listings());
        assert!(Role::Agent.can_manage_listings());
        assert!(!Role::User.can_manage_listings());
    }

    #[test]
    fn from_str_parses_correctly() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_str("Agent"), Some(Role::Agent));
        assert_eq!(Role::from_str("unknown"), None);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn serde_uses_lowercase_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"agent\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }
}
