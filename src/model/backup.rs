// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::tab::{BackupPayload, Tab};

/// Identity of a loaded backup file: where it lives plus the name shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey {
    path: PathBuf,
    display_name: String,
}

impl FileKey {
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// A backup file held in memory.
///
/// `modified` is only ever set by [`BackupFile::remove_urls`] and only ever cleared by
/// [`BackupFile::mark_saved`], so it reflects exactly "removals since the last write".
#[derive(Debug, Clone, PartialEq)]
pub struct BackupFile {
    key: FileKey,
    payload: BackupPayload,
    modified: bool,
}

impl BackupFile {
    pub fn new(key: FileKey, payload: BackupPayload) -> Self {
        Self {
            key,
            payload,
            modified: false,
        }
    }

    pub fn key(&self) -> &FileKey {
        &self.key
    }

    pub fn path(&self) -> &Path {
        self.key.path()
    }

    pub fn display_name(&self) -> &str {
        self.key.display_name()
    }

    pub fn version(&self) -> &str {
        &self.payload.version
    }

    pub fn payload(&self) -> &BackupPayload {
        &self.payload
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn tab_count(&self) -> usize {
        self.payload.tab_count()
    }

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.payload.groups.iter().flat_map(|group| group.tabs.iter())
    }

    /// Drops every tab whose URL is in `urls` from every group and returns how many went.
    pub fn remove_urls(&mut self, urls: &HashSet<String>) -> usize {
        if urls.is_empty() {
            return 0;
        }

        let mut removed = 0;
        for group in &mut self.payload.groups {
            let before = group.tabs.len();
            group.tabs.retain(|tab| !urls.contains(&tab.url));
            removed += before - group.tabs.len();
        }

        if removed > 0 {
            self.modified = true;
        }
        removed
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}
