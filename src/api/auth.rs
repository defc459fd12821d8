// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication routes: registration, login, logout, current-user,
//! and the password-reset flow.
//!
//! Tokens travel in an HTTP-only cookie (primary) or a bearer header.
//! Every route here trusts nothing from the client beyond the validated
//! body; the one place that refetches the account is `GET /api/auth/me`.

use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;

use argon2::password_hash::rand_core::{OsRng, RngCore};

use crate::{
    auth::{create_auth_cookie, create_logout_cookie, Auth, Principal},
    error::ApiError,
    models::{
        ForgotPasswordRequest, LoginRequest, PublicUser, RegisterRequest, ResetPasswordRequest,
        User,
    },
    password::{hash_password, verify_password},
    state::AppState,
    storage::UserRepository,
    validation::{
        validate_forgot_password_email, validate_login, validate_register,
        validate_reset_password,
    },
};

use super::MessageResponse;

/// How long a password-reset token stays usable.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Generic response to both known and unknown forgot-password emails.
const RESET_REQUESTED_MESSAGE: &str =
    "If that email address is in our database, we will send you a password reset link.";

/// Payload carried by successful auth responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthData {
    pub user: PublicUser,
    /// Present on registration only; login and me rely on the cookie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Successful auth response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub data: AuthData,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, body = AuthResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<AuthResponse>), ApiError> {
    validate_register(&request)?;

    let repo = UserRepository::new(&state.storage);
    let email = request.email.trim().to_lowercase();

    if repo.find_by_email(&email)?.is_some() {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        email,
        password_hash: hash_password(&request.password)?,
        role: request.role.unwrap_or_default(),
        phone: request.phone,
        avatar: None,
        password_reset_token: None,
        password_reset_expires: None,
        created_at: now,
        updated_at: now,
    };
    repo.create(&user)?;

    let token = issue_token(&state, &user)?;
    let cookie = create_auth_cookie(&token, state.config.auth.cookie_secure);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            success: true,
            data: AuthData {
                user: PublicUser::from(user),
                token: Some(token),
            },
            message: "Registration successful".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<([(HeaderName, String); 1], Json<AuthResponse>), ApiError> {
    validate_login(&request)?;

    let repo = UserRepository::new(&state.storage);

    // One generic message for unknown email and wrong password alike.
    let user = repo
        .find_by_email(request.email.trim())?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = issue_token(&state, &user)?;
    let cookie = create_auth_cookie(&token, state.config.auth.cookie_secure);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            success: true,
            data: AuthData {
                user: PublicUser::from(user),
                token: None,
            },
            message: "Login successful".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, body = MessageResponse))
)]
pub async fn logout(
    State(state): State<AppState>,
) -> ([(HeaderName, String); 1], Json<MessageResponse>) {
    let cookie = create_logout_cookie(state.config.auth.cookie_secure);
    (
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, body = AuthResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn me(
    Auth(principal): Auth,
    State(state): State<AppState>,
) -> Result<Json<AuthResponse>, ApiError> {
    // The distinguished freshness endpoint: the claims carry identity, but
    // the profile returned is whatever storage holds right now.
    let repo = UserRepository::new(&state.storage);
    let user = repo.get(&principal.user_id)?;

    Ok(Json(AuthResponse {
        success: true,
        data: AuthData {
            user: PublicUser::from(user),
            token: None,
        },
        message: "User authenticated".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    tag = "Auth",
    responses((status = 200, body = MessageResponse))
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_forgot_password_email(&request.email)?;

    let repo = UserRepository::new(&state.storage);

    let Some(mut user) = repo.find_by_email(request.email.trim())? else {
        // Same response as the known-account path, so callers cannot probe
        // which emails exist.
        tracing::info!("Password reset requested for unknown email");
        return Ok(Json(MessageResponse {
            success: true,
            message: RESET_REQUESTED_MESSAGE.to_string(),
        }));
    };

    // The raw token goes into the emailed link; only its digest is stored.
    let reset_token = generate_reset_token();
    user.password_reset_token = Some(sha256_hex(&reset_token));
    user.password_reset_expires = Some(Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS));
    user.updated_at = Utc::now();
    repo.update(&user)?;

    let reset_url = format!(
        "{}/reset-password?token={}&email={}",
        state.config.public_base_url, reset_token, user.email
    );
    // Mail delivery is an external relay; hand the artifact to the log boundary.
    tracing::info!(email = %user.email, url = %reset_url, "Queued password reset email");

    Ok(Json(MessageResponse {
        success: true,
        message: RESET_REQUESTED_MESSAGE.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    tag = "Auth",
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Invalid or expired reset token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_reset_password(&request)?;

    let repo = UserRepository::new(&state.storage);

    // One generic rejection regardless of which part failed.
    let invalid = || ApiError::bad_request("Invalid or expired reset token");

    let mut user = repo
        .find_by_email(request.email.trim())?
        .ok_or_else(invalid)?;

    let stored_digest = user.password_reset_token.as_deref().ok_or_else(invalid)?;
    if sha256_hex(&request.token) != stored_digest {
        return Err(invalid());
    }

    let expires = user.password_reset_expires.ok_or_else(invalid)?;
    if expires < Utc::now() {
        return Err(invalid());
    }

    user.password_hash = hash_password(&request.password)?;
    user.password_reset_token = None;
    user.password_reset_expires = None;
    user.updated_at = Utc::now();
    repo.update(&user)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Password reset successful".to_string(),
    }))
}

fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let principal = Principal {
        user_id: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
    };
    state.codec.issue(&principal).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue auth token");
        ApiError::internal("Internal server error")
    })
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
