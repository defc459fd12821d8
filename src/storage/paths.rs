// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document storage layout.

use std::path::{Path, PathBuf};

/// Default base directory for all persistent storage, relative to the
/// working directory. Override with the `DATA_DIR` environment variable.
pub const DATA_ROOT: &str = "data";

/// Storage path utilities for the document filesystem.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user accounts.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user file.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Property Paths ==========

    /// Directory containing all property listings.
    pub fn properties_dir(&self) -> PathBuf {
        self.root.join("properties")
    }

    /// Path to a specific property file.
    pub fn property(&self, property_id: &str) -> PathBuf {
        self.properties_dir().join(format!("{property_id}.json"))
    }

    // ========== Favorite Paths ==========

    /// Directory containing all favorites.
    pub fn favorites_dir(&self) -> PathBuf {
        self.root.join("favorites")
    }

    /// Path to a specific favorite file.
    pub fn favorite(&self, favorite_id: &str) -> PathBuf {
        self.favorites_dir().join(format!("{favorite_id}.json"))
    }

    // ========== Inquiry Paths ==========

    /// Directory containing all inquiries.
    pub fn inquiries_dir(&self) -> PathBuf {
        self.root.join("inquiries")
    }

    /// Path to a specific inquiry file.
    pub fn inquiry(&self, inquiry_id: &str) -> PathBuf {
        self.inquiries_dir().join(format!("{inquiry_id}.json"))
    }

    // ========== Media Paths ==========

    /// Directory containing uploaded media assets.
    pub fn media_dir(&self) -> PathBuf {
        self.root.join("media")
    }

    /// Path to a specific media file (full file name including extension).
    pub fn media_file(&self, file_name: &str) -> PathBuf {
        self.media_dir().join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("data"));
    }

    #[test]
    fn custom_root_for_testing() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.root(), Path::new("/tmp/test-data"));
        assert_eq!(
            paths.user("user-123"),
            PathBuf::from("/tmp/test-data/users/user-123.json")
        );
    }

    #[test]
    fn user_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.users_dir(), PathBuf::from("/data/users"));
        assert_eq!(paths.user("u1"), PathBuf::from("/data/users/u1.json"));
    }

    #[test]
    fn property_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.properties_dir(), PathBuf::from("/data/properties"));
        assert_eq!(
            paths.property("prop-123"),
            PathBuf::from("/data/properties/prop-123.json")
        );
    }

    #[test]
    fn favorite_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.favorites_dir(), PathBuf::from("/data/favorites"));
        assert_eq!(
            paths.favorite("fav-456"),
            PathBuf::from("/data/favorites/fav-456.json")
        );
    }

    #[test]
    fn inquiry_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.inquiries_dir(), PathBuf::from("/data/inquiries"));
        assert_eq!(
            paths.inquiry("inq-789"),
            PathBuf::from("/data/inquiries/inq-789.json")
        );
    }

    #[test]
    fn media_paths_are_correct() {
        let paths = StoragePaths::new("/data");
        assert_eq!(paths.media_dir(), PathBuf::from("/data/media"));
        assert_eq!(
            paths.media_file("asset-1.jpg"),
            PathBuf::from("/data/media/asset-1.jpg")
        );
    }
}
