// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Issues and verifies the signed identity tokens behind every gated route.
//!
//! ## Auth Flow
//!
//! 1. Login/registration verifies credentials against the user store and
//!    issues an HS256 JWT carrying `{userId, email, role}` plus `iat`/`exp`
//! 2. The client stores the token in the HTTP-only auth cookie (browsers)
//!    or replays it as `Authorization: Bearer <token>` (API clients)
//! 3. On each gated request the server:
//!    - Locates a candidate token (bearer header first, cookie second)
//!    - Verifies signature and expiry against the configured secret
//!    - Resolves a [`Principal`] and hands it to the handler
//!
//! ## Security
//!
//! - Tokens expire exactly 7 days after issuance; no server-side sessions,
//!   so no revocation before expiry
//! - A missing signing secret fails closed (production refuses to start)
//! - 401 responses are uniform; which verification check failed is logged
//!   server-side only
//! - Role changes take effect at next issuance; gated routes trust claims

pub mod claims;
pub mod cookie;
pub mod error;
pub mod extractor;
pub mod roles;
pub mod token;

pub use claims::{Claims, Principal};
pub use cookie::{create_auth_cookie, create_logout_cookie, AUTH_COOKIE_NAME};
pub use error::AuthError;
pub use extractor::{AdminOnly, AgentOrAdmin, Auth, OptionalAuth};
pub use roles::Role;
pub use token::{TokenCodec, TokenError, TOKEN_TTL_DAYS};
