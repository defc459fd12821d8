// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Realty - Real Estate Listing Service
//!
//! HTTP API for property listings backed by a document-file store. Accounts
//! carry a role (user, agent, admin); signed tokens travel in an HTTP-only
//! cookie or a bearer header and gate everything beyond public search.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification, and role gates
//! - `storage` - Document-file persistence and repositories
//! - `validation` - Request validation rules

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod state;
pub mod storage;
pub mod validation;
