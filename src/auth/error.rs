// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::token::TokenError;

/// Why a gated request was rejected.
///
/// The response body is deliberately generic: a presented-but-bad token
/// answers exactly like a missing one, and the verify-failure subtype
/// inside [`AuthError::InvalidCredential`] is for internal logging only.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No token found in the bearer header or the auth cookie
    NoCredential,
    /// A token was presented but failed verification
    InvalidCredential(TokenError),
    /// Authenticated, but the role is not in the allowed set
    InsufficientRole,
}

/// Error body shared by every gated route.
#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    ///
    /// Authentication failures are 401 and always take precedence over
    /// the 403 role check (a credential-less request reports 401, never
    /// 403).
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NoCredential | AuthError::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
        }
    }
}

impl std::fmt::Display for AuthError {
    /// The caller-facing message. Identical for every 401 so responses
    /// never reveal whether a token was absent, tampered, or expired.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NoCredential | AuthError::InvalidCredential(_) => {
                write!(f, "Unauthorized")
            }
            AuthError::InsufficientRole => {
                write!(f, "Forbidden: Insufficient permissions")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
