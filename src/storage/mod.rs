// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistence for the listing service: every entity is a JSON document on
//! the local filesystem, one file per record. The document database of a
//! larger deployment stays an external collaborator; this layer is the
//! adapter the route handlers talk to.
//!
//! ## Storage Layout
//!
//! ```text
//! data/
//!   users/{user_id}.json          # Accounts (argon2 hash, reset fields)
//!   properties/{property_id}.json # Listings (soft-deleted stay on disk)
//!   favorites/{favorite_id}.json
//!   inquiries/{inquiry_id}.json
//!   media/{asset_id}.{ext}        # Uploaded listing photos
//! ```
//!
//! ## Notes
//!
//! - Writes are atomic (temp file + rename)
//! - Scans filter in memory; there are no secondary indexes to drift
//! - Ownership checks live in [`ownership`] and run after lookup

pub mod document_fs;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use document_fs::{DocumentStore, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{FavoriteRepository, InquiryRepository, PropertyRepository, UserRepository};
