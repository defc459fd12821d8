// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to document storage.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStore for all file operations.

pub mod favorites;
pub mod inquiries;
pub mod properties;
pub mod users;

pub use favorites::FavoriteRepository;
pub use inquiries::InquiryRepository;
pub use properties::PropertyRepository;
pub use users::UserRepository;
