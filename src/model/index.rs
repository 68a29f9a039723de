// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashSet};

use super::backup::{BackupFile, FileKey};

/// Every backup file loaded at startup, keyed (and iterated) by path.
///
/// Files are only inserted while the index is being built; afterwards the set of files is
/// fixed and only their contents shrink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackupIndex {
    files: BTreeMap<FileKey, BackupFile>,
}

impl BackupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: BackupFile) {
        self.files.insert(file.key().clone(), file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, key: &FileKey) -> Option<&BackupFile> {
        self.files.get(key)
    }

    pub fn files(&self) -> impl Iterator<Item = &BackupFile> {
        self.files.values()
    }

    pub fn files_mut(&mut self) -> impl Iterator<Item = &mut BackupFile> {
        self.files.values_mut()
    }

    pub fn total_tabs(&self) -> usize {
        self.files.values().map(BackupFile::tab_count).sum()
    }

    /// Applies a removal batch to every file; returns the number of tabs removed overall.
    pub fn remove_urls(&mut self, urls: &HashSet<String>) -> usize {
        self.files.values_mut().map(|file| file.remove_urls(urls)).sum()
    }
}

impl FromIterator<BackupFile> for BackupIndex {
    fn from_iter<I: IntoIterator<Item = BackupFile>>(iter: I) -> Self {
        let mut index = Self::new();
        for file in iter {
            index.insert(file);
        }
        index
    }
}
