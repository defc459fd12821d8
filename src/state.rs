// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::config::Config;
use crate::storage::DocumentStore;

/// Shared application state, cheap to clone into every handler.
///
/// The token codec is built once from the configured secret; request
/// handling never re-reads the environment.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub codec: Arc<TokenCodec>,
    pub storage: Arc<DocumentStore>,
}

impl AppState {
    pub fn new(config: Config, storage: DocumentStore) -> Self {
        let codec = TokenCodec::from_secret(config.auth.jwt_secret.as_deref());
        Self {
            config: Arc::new(config),
            codec: Arc::new(codec),
            storage: Arc::new(storage),
        }
    }
}
