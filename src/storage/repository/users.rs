// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account repository.
//!
//! Each account is stored as a separate JSON file under `users/`. Email
//! lookup scans the directory; emails are stored lowercased so the scan
//! compares case-insensitively.

use crate::models::User;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Repository for user account operations.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<User> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound {
                resource: "User".to_string(),
                id: user_id.to_string(),
            });
        }
        self.storage.read_json(path)
    }

    /// Create a new user.
    pub fn create(&self, user: &User) -> StorageResult<()> {
        let user_id = &user.id;

        if self.exists(user_id) {
            return Err(StorageError::AlreadyExists(format!("User {user_id}")));
        }

        self.storage
            .write_json(self.storage.paths().user(user_id), user)
    }

    /// Update an existing user.
    pub fn update(&self, user: &User) -> StorageResult<()> {
        let user_id = &user.id;

        if !self.exists(user_id) {
            return Err(StorageError::NotFound {
                resource: "User".to_string(),
                id: user_id.to_string(),
            });
        }

        self.storage
            .write_json(self.storage.paths().user(user_id), user)
    }

    /// Find a user by email (case-insensitive).
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                if user.email.eq_ignore_ascii_case(email) {
                    return Ok(Some(user));
                }
            }
        }

        Ok(None)
    }
}
