// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed auth-token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the claims in [`Claims`] plus issue and
//! expiry timestamps. There is no server-side session table: expiry lives
//! inside the token, so a token cannot be revoked before it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::{Claims, Principal};

/// Token lifetime. The auth cookie Max-Age is kept in sync with this.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Why a token failed to issue or verify.
///
/// Verification failures stay distinct here for logging and tests; the
/// HTTP boundary collapses all of them into one generic 401 so responses
/// never reveal which check rejected a presented token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not a structurally valid token, or claims missing/empty.
    #[error("malformed token")]
    Malformed,
    /// Well-formed but the signature does not match the current secret.
    #[error("token signature mismatch")]
    SignatureMismatch,
    /// Signature checks out but the expiry has passed.
    #[error("token expired")]
    Expired,
    /// No signing secret is configured. Every operation fails closed.
    #[error("signing secret not configured")]
    MissingSecret,
}

/// Issues and verifies signed, expiring identity tokens.
///
/// Built once at startup from the loaded configuration and shared through
/// application state. Issue and verify are pure computation over the token
/// string, the secret, and the clock; neither performs I/O.
#[derive(Clone)]
pub struct TokenCodec {
    keys: Option<(EncodingKey, DecodingKey)>,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec signing and verifying with the given secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            keys: Some((
                EncodingKey::from_secret(secret),
                DecodingKey::from_secret(secret),
            )),
            validation: Self::validation(),
        }
    }

    /// Create a codec with no secret. Every issue and verify call fails
    /// with [`TokenError::MissingSecret`].
    ///
    /// Config loading refuses to reach this point in production; outside
    /// production it keeps a misconfigured server fail-closed instead of
    /// minting tokens under a fallback secret.
    pub fn unconfigured() -> Self {
        Self {
            keys: None,
            validation: Self::validation(),
        }
    }

    /// Build from an optional secret, as held by the loaded configuration.
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(s) if !s.is_empty() => Self::new(s.as_bytes()),
            _ => Self::unconfigured(),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is valid strictly before its exp.
        validation.leeway = 0;
        validation.validate_aud = false;
        validation
    }

    /// True when a signing secret is configured.
    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    /// Issue a signed token for the principal.
    ///
    /// The token embeds the identity claims, an issued-at timestamp, and
    /// an expiry exactly [`TOKEN_TTL_DAYS`] days later. Empty identity
    /// fields are refused as [`TokenError::Malformed`].
    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        if principal.user_id.is_empty() || principal.email.is_empty() {
            return Err(TokenError::Malformed);
        }

        let now = Utc::now();
        let claims = Claims {
            user_id: principal.user_id.clone(),
            email: principal.email.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, encoding_key).map_err(|_| TokenError::Malformed)
    }

    /// Verify a token and return its claims.
    ///
    /// Succeeds only when the signature matches the configured secret and
    /// the current time is before the embedded expiry. Failures map to one
    /// of the [`TokenError`] kinds; anything that is not an expiry or
    /// signature failure (bad segment count, undecodable payload, missing
    /// claims) is [`TokenError::Malformed`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(TokenError::MissingSecret)?;

        let data = decode::<Claims>(token, decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    const SECRET: &str = "test-signing-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
    }

    fn principal() -> Principal {
        Principal {
            user_id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Agent,
        }
    }

    /// Encode claims directly with the test secret, bypassing `issue`, so
    /// tests can control iat/exp.
    fn encode_raw(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trip_returns_original_claims() {
        let codec = codec();
        let token = codec.issue(&principal()).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.user_id, "u1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, Role::Agent);
    }

    #[test]
    fn expiry_is_exactly_seven_days_after_issue() {
        let codec = codec();
        let token = codec.issue(&principal()).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn tampered_payload_fails_with_signature_mismatch() {
        let codec = codec();
        let token = codec.issue(&principal()).unwrap();

        // Flip one character of the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let payload = &parts[1];
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        parts[1] = format!("{}{}", &payload[..payload.len() - 1], flipped);
        let tampered = parts.join(".");

        assert_eq!(codec.verify(&tampered), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn tampered_signature_fails_with_signature_mismatch() {
        let codec = codec();
        let token = codec.issue(&principal()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let sig = &parts[2];
        let flipped = if sig.ends_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", &sig[..sig.len() - 1], flipped);
        let tampered = parts.join(".");

        assert_eq!(codec.verify(&tampered), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn wrong_secret_fails_with_signature_mismatch() {
        let token = codec().issue(&principal()).unwrap();
        let other = TokenCodec::new("a-different-secret");

        assert_eq!(other.verify(&token), Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn expired_token_fails_even_with_valid_signature() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Agent,
            iat: now - 8 * 24 * 60 * 60,
            exp: now - 24 * 60 * 60,
        };
        let token = encode_raw(&claims);

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec();
        assert_eq!(codec.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify("a.b.c"), Err(TokenError::Malformed));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn unconfigured_codec_fails_closed() {
        let codec = TokenCodec::unconfigured();
        assert!(!codec.is_configured());
        assert_eq!(codec.issue(&principal()), Err(TokenError::MissingSecret));

        // Even a token signed with a known secret is rejected.
        let token = TokenCodec::new(SECRET).issue(&principal()).unwrap();
        assert_eq!(codec.verify(&token), Err(TokenError::MissingSecret));
    }

    #[test]
    fn from_secret_treats_empty_as_unconfigured() {
        assert!(!TokenCodec::from_secret(None).is_configured());
        assert!(!TokenCodec::from_secret(Some("")).is_configured());
        assert!(TokenCodec::from_secret(Some(SECRET)).is_configured());
    }

    #[test]
    fn empty_identity_fields_refuse_issue() {
        let codec = codec();
        let mut p = principal();
        p.user_id = String::new();
        assert_eq!(codec.issue(&p), Err(TokenError::Malformed));

        let mut p = principal();
        p.email = String::new();
        assert_eq!(codec.issue(&p), Err(TokenError::Malformed));
    }
}
