// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth cookie: one canonical name, one way to set and clear it.

use super::token::TOKEN_TTL_DAYS;

/// Name of the cookie carrying the auth token. Every route that reads or
/// writes the cookie goes through this constant.
pub const AUTH_COOKIE_NAME: &str = "authToken";

/// Cookie lifetime in seconds, matching the token lifetime.
const AUTH_COOKIE_MAX_AGE: i64 = TOKEN_TTL_DAYS * 24 * 60 * 60;

/// Build the `Set-Cookie` value that stores the token on the client.
///
/// HTTP-only keeps the token away from page scripts; `SameSite=Strict`
/// keeps it off cross-site requests. `Secure` is appended when the server
/// runs behind HTTPS (production).
pub fn create_auth_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{AUTH_COOKIE_NAME}={token}; HttpOnly; Path=/; SameSite=Strict; Max-Age={AUTH_COOKIE_MAX_AGE}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the token at logout.
///
/// An empty value with `Max-Age=0` instructs the client to drop the
/// cookie immediately.
pub fn create_logout_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{AUTH_COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Strict; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find a named cookie's value inside a `Cookie` request header.
pub fn get_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}
