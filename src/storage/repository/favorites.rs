// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Favorites repository.
//!
//! A favorite records that one user saved one listing. The (user, property)
//! pair is unique; the routes check `find_by_user_and_property` before
//! creating to return a conflict instead of a second row.

use crate::models::Favorite;
use crate::storage::OwnedResource;

use super::super::{DocumentStore, StorageError, StorageResult};

impl OwnedResource for Favorite {
    fn owner_user_id(&self) -> &str {
        &self.user_id
    }
}

/// Repository for favorite operations.
pub struct FavoriteRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new FavoriteRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a favorite exists.
    pub fn exists(&self, favorite_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().favorite(favorite_id))
    }

    /// Get a favorite by ID.
    pub fn get(&self, favorite_id: &str) -> StorageResult<Favorite> {
        let path = self.storage.paths().favorite(favorite_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound {
                resource: "Favorite".to_string(),
                id: favorite_id.to_string(),
            });
        }
        self.storage.read_json(path)
    }

    /// Create a new favorite.
    pub fn create(&self, favorite: &Favorite) -> StorageResult<()> {
        let favorite_id = &favorite.id;

        if self.exists(favorite_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Favorite {favorite_id}"
            )));
        }

        self.storage
            .write_json(self.storage.paths().favorite(favorite_id), favorite)
    }

    /// Delete a favorite.
    pub fn delete(&self, favorite_id: &str) -> StorageResult<()> {
        if !self.exists(favorite_id) {
            return Err(StorageError::NotFound {
                resource: "Favorite".to_string(),
                id: favorite_id.to_string(),
            });
        }

        self.storage
            .delete(self.storage.paths().favorite(favorite_id))
    }

    /// List all favorites saved by a user.
    pub fn list_by_user(&self, user_id: &str) -> StorageResult<Vec<Favorite>> {
        let favorite_ids = self
            .storage
            .list_files(self.storage.paths().favorites_dir(), "json")?;

        let mut favorites = Vec::new();
        for id in favorite_ids {
            if let Ok(favorite) = self.get(&id) {
                if favorite.user_id == user_id {
                    favorites.push(favorite);
                }
            }
        }

        Ok(favorites)
    }

    /// Find the favorite a user saved for a specific property, if any.
    pub fn find_by_user_and_property(
        &self,
        user_id: &str,
        property_id: &str,
    ) -> StorageResult<Option<Favorite>> {
        let favorite_ids = self
            .storage
            .list_files(self.storage.paths().favorites_dir(), "json")?;

        for id in favorite_ids {
            if let Ok(favorite) = self.get(&id) {
                if favorite.user_id == user_id && favorite.property_id == property_id {
                    return Ok(Some(favorite));
                }
            }
        }

        Ok(None)
    }
}
