// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors gating handlers on authentication and role.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is Principal
//! }
//! ```
//!
//! `AgentOrAdmin` and `AdminOnly` add a role check on top. A handler taking
//! one of these extractors cannot run unless the check passed, so the gate
//! ordering (401 for authentication before 403 for role) is enforced by
//! construction.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use super::cookie::{get_cookie, AUTH_COOKIE_NAME};
use super::{AuthError, Principal, Role};
use crate::state::AppState;

/// Resolve the request's credential to a [`Principal`].
///
/// Lookup order: a pre-resolved principal in the request extensions, then
/// a `Bearer` token in the `Authorization` header, then the auth cookie.
/// A present-but-unusable header falls through to the cookie; only when
/// neither channel yields a candidate does this fail `NoCredential`.
///
/// Verification trusts the token's embedded claims. No user record is
/// fetched here, so role changes apply at the next token issuance; the
/// current-user endpoint is the only place that refetches.
pub(crate) fn authenticate(parts: &Parts, state: &AppState) -> Result<Principal, AuthError> {
    if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
        return Ok(principal);
    }

    let token = bearer_token(parts)
        .or_else(|| cookie_token(parts))
        .ok_or(AuthError::NoCredential)?;

    match state.codec.verify(token) {
        Ok(claims) => Ok(Principal::from_claims(claims)),
        Err(reason) => {
            // The subtype stays internal; the response is a generic 401.
            if reason == super::TokenError::MissingSecret {
                tracing::error!("rejecting credential: no signing secret configured");
            } else {
                tracing::warn!(reason = %reason, "rejecting presented credential");
            }
            Err(AuthError::InvalidCredential(reason))
        }
    }
}

/// Candidate token from `Authorization: Bearer <token>`, if well-formed.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Candidate token from the auth cookie, if present.
fn cookie_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(COOKIE)?.to_str().ok()?;
    let token = get_cookie(value, AUTH_COOKIE_NAME)?;
    (!token.is_empty()).then_some(token)
}

fn require_role(principal: &Principal, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}

/// Extractor for authenticated requests.
///
/// Resolves the credential from the bearer header or the auth cookie and
/// rejects with a 401 body when neither verifies.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_favorites(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<Favorite>>, ApiError> {
///     // user.user_id scopes the query
/// }
/// ```
pub struct Auth(pub Principal);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(Auth)
    }
}

/// Extractor that requires the agent or admin role.
///
/// Listing management (create/update/delete properties, inquiry handling)
/// goes through this gate.
pub struct AgentOrAdmin(pub Principal);

impl FromRequestParts<AppState> for AgentOrAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state)?;
        require_role(&principal, &[Role::Agent, Role::Admin])?;
        Ok(AgentOrAdmin(principal))
    }
}

/// Extractor that requires the admin role.
pub struct AdminOnly(pub Principal);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state)?;
        require_role(&principal, &[Role::Admin])?;
        Ok(AdminOnly(principal))
    }
}

/// Optional authentication extractor.
///
/// Returns `None` instead of rejecting, for routes that serve both
/// anonymous and signed-in callers (public inquiry creation records the
/// caller's identity when one is present).
pub struct OptionalAuth(pub Option<Principal>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(authenticate(parts, state).ok()))
    }
}
