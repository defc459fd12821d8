// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inquiry repository.
//!
//! Inquiries are lead-capture records against a listing. Anonymous leads
//! carry no `user_id`. The role-scoped listings the routes need are all
//! directory scans filtered in memory.

use crate::models::Inquiry;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Repository for inquiry operations.
pub struct InquiryRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> InquiryRepository<'a> {
    /// Create a new InquiryRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if an inquiry exists.
    pub fn exists(&self, inquiry_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().inquiry(inquiry_id))
    }

    /// Get an inquiry by ID.
    pub fn get(&self, inquiry_id: &str) -> StorageResult<Inquiry> {
        let path = self.storage.paths().inquiry(inquiry_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound {
                resource: "Inquiry".to_string(),
                id: inquiry_id.to_string(),
            });
        }
        self.storage.read_json(path)
    }

    /// Create a new inquiry.
    pub fn create(&self, inquiry: &Inquiry) -> StorageResult<()> {
        let inquiry_id = &inquiry.id;

        if self.exists(inquiry_id) {
            return Err(StorageError::AlreadyExists(format!("Inquiry {inquiry_id}")));
        }

        self.storage
            .write_json(self.storage.paths().inquiry(inquiry_id), inquiry)
    }

    /// Update an existing inquiry.
    pub fn update(&self, inquiry: &Inquiry) -> StorageResult<()> {
        let inquiry_id = &inquiry.id;

        if !self.exists(inquiry_id) {
            return Err(StorageError::NotFound {
                resource: "Inquiry".to_string(),
                id: inquiry_id.to_string(),
            });
        }

        self.storage
            .write_json(self.storage.paths().inquiry(inquiry_id), inquiry)
    }

    /// Delete an inquiry.
    pub fn delete(&self, inquiry_id: &str) -> StorageResult<()> {
        if !self.exists(inquiry_id) {
            return Err(StorageError::NotFound {
                resource: "Inquiry".to_string(),
                id: inquiry_id.to_string(),
            });
        }

        self.storage
            .delete(self.storage.paths().inquiry(inquiry_id))
    }

    /// List every inquiry (admin view).
    pub fn list_all(&self) -> StorageResult<Vec<Inquiry>> {
        let inquiry_ids = self
            .storage
            .list_files(self.storage.paths().inquiries_dir(), "json")?;

        let mut inquiries = Vec::new();
        for id in inquiry_ids {
            if let Ok(inquiry) = self.get(&id) {
                inquiries.push(inquiry);
            }
        }

        Ok(inquiries)
    }

    /// List inquiries submitted by an authenticated user.
    pub fn list_by_user(&self, user_id: &str) -> StorageResult<Vec<Inquiry>> {
        let all = self.list_all()?;
        Ok(all
            .into_iter()
            .filter(|i| i.user_id.as_deref() == Some(user_id))
            .collect())
    }

    /// List inquiries against a single property.
    pub fn list_by_property(&self, property_id: &str) -> StorageResult<Vec<Inquiry>> {
        let all = self.list_all()?;
        Ok(all
            .into_iter()
            .filter(|i| i.property_id == property_id)
            .collect())
    }

    /// List inquiries against any of the given properties (agent scope).
    pub fn list_by_properties(&self, property_ids: &[String]) -> StorageResult<Vec<Inquiry>> {
        let all = self.list_all()?;
        Ok(all
            .into_iter()
            .filter(|i| property_ids.contains(&i.property_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InquiryStatus;
    use crate::storage::{DocumentStore, StoragePaths};
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DocumentStore) {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp.path());
        let mut storage = DocumentStore::new(paths);
        storage.initialize().expect("Failed to initialize");
        (temp, storage)
    }

    fn test_inquiry(id: &str, property_id: &str, user_id: Option<&str>) -> Inquiry {
        let now = Utc::now();
        Inquiry {
            id: id.to_string(),
            property_id: property_id.to_string(),
            user_id: user_id.map(str::to_string),
            name: "Dana Prospect".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0100-200".to_string(),
            message: "Is this property still available for viewing?".to_string(),
            status: InquiryStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_and_get_inquiry() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        let inquiry = test_inquiry("inq-1", "prop-1", Some("user-1"));
        repo.create(&inquiry).unwrap();

        let loaded = repo.get("inq-1").unwrap();
        assert_eq!(loaded.id, inquiry.id);
        assert_eq!(loaded.message, inquiry.message);
        assert_eq!(loaded.status, InquiryStatus::Pending);
    }

    #[test]
    fn list_by_user_skips_anonymous() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        repo.create(&test_inquiry("inq-a", "prop-1", Some("user-1")))
            .unwrap();
        repo.create(&test_inquiry("inq-b", "prop-2", None)).unwrap();
        repo.create(&test_inquiry("inq-c", "prop-3", Some("user-2")))
            .unwrap();

        let mine = repo.list_by_user("user-1").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "inq-a");
    }

    #[test]
    fn list_by_property_filters_correctly() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        repo.create(&test_inquiry("inq-d", "prop-1", None)).unwrap();
        repo.create(&test_inquiry("inq-e", "prop-1", Some("user-1")))
            .unwrap();
        repo.create(&test_inquiry("inq-f", "prop-2", None)).unwrap();

        let for_prop = repo.list_by_property("prop-1").unwrap();
        assert_eq!(for_prop.len(), 2);
    }

    #[test]
    fn list_by_properties_covers_agent_scope() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        repo.create(&test_inquiry("inq-g", "prop-1", None)).unwrap();
        repo.create(&test_inquiry("inq-h", "prop-2", None)).unwrap();
        repo.create(&test_inquiry("inq-i", "prop-3", None)).unwrap();

        let scope = vec!["prop-1".to_string(), "prop-3".to_string()];
        let scoped = repo.list_by_properties(&scope).unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|i| scope.contains(&i.property_id)));
    }

    #[test]
    fn update_transitions_status() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        let mut inquiry = test_inquiry("inq-j", "prop-1", None);
        repo.create(&inquiry).unwrap();

        inquiry.status = InquiryStatus::Contacted;
        repo.update(&inquiry).unwrap();

        let loaded = repo.get("inq-j").unwrap();
        assert_eq!(loaded.status, InquiryStatus::Contacted);
    }

    #[test]
    fn delete_missing_inquiry_is_not_found() {
        let (_temp, storage) = setup();
        let repo = InquiryRepository::new(&storage);

        let result = repo.delete("ghost");
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }
}
