// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Property listing repository.
//!
//! Each listing is stored as a separate JSON file under `properties/`.
//! Public queries only ever see active listings; soft-deleted ones stay on
//! disk with `is_active = false` so an agent's own view keeps them.

use crate::models::Property;
use crate::storage::OwnedResource;

use super::super::{DocumentStore, StorageError, StorageResult};

impl OwnedResource for Property {
    fn owner_user_id(&self) -> &str {
        &self.agent_id
    }
}

/// Repository for property listing operations.
pub struct PropertyRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> PropertyRepository<'a> {
    /// Create a new PropertyRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a property exists.
    pub fn exists(&self, property_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().property(property_id))
    }

    /// Get a property by ID.
    pub fn get(&self, property_id: &str) -> StorageResult<Property> {
        let path = self.storage.paths().property(property_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound {
                resource: "Property".to_string(),
                id: property_id.to_string(),
            });
        }
        self.storage.read_json(path)
    }

    /// Create a new property.
    pub fn create(&self, property: &Property) -> StorageResult<()> {
        let property_id = &property.id;

        if self.exists(property_id) {
            return Err(StorageError::AlreadyExists(format!(
                "Property {property_id}"
            )));
        }

        self.storage
            .write_json(self.storage.paths().property(property_id), property)
    }

    /// Update an existing property.
    pub fn update(&self, property: &Property) -> StorageResult<()> {
        let property_id = &property.id;

        if !self.exists(property_id) {
            return Err(StorageError::NotFound {
                resource: "Property".to_string(),
                id: property_id.to_string(),
            });
        }

        self.storage
            .write_json(self.storage.paths().property(property_id), property)
    }

    /// Increment the view counter for a property, returning the updated record.
    pub fn increment_views(&self, property_id: &str) -> StorageResult<Property> {
        let mut property = self.get(property_id)?;
        property.views += 1;
        self.update(&property)?;
        Ok(property)
    }

    /// List all active listings.
    pub fn list_active(&self) -> StorageResult<Vec<Property>> {
        let property_ids = self
            .storage
            .list_files(self.storage.paths().properties_dir(), "json")?;

        let mut properties = Vec::new();
        for id in property_ids {
            if let Ok(property) = self.get(&id) {
                if property.is_active {
                    properties.push(property);
                }
            }
        }

        Ok(properties)
    }

    /// List all listings owned by an agent, including inactive ones.
    pub fn list_by_agent(&self, agent_id: &str) -> StorageResult<Vec<Property>> {
        let property_ids = self
            .storage
            .list_files(self.storage.paths().properties_dir(), "json")?;

        let mut properties = Vec::new();
        for id in property_ids {
            if let Ok(property) = self.get(&id) {
                if property.agent_id == agent_id {
                    properties.push(property);
                }
            }
        }

        Ok(properties)
    }
}
