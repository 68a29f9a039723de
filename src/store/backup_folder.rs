// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::model::{BackupFile, BackupIndex, BackupPayload, FileKey};

/// Only files whose name starts with this prefix are treated as backups.
pub const FILENAME_PREFIX: &str = "manual-stg-";

pub const BACKUP_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus rename, no fsync. A crash can lose the latest save.
    #[default]
    BestEffort,

    /// Also fsyncs the saved file and, on unix, its directory (`--durable-writes`).
    Durable,
}

/// Result of scanning a backup directory.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedIndex {
    pub index: BackupIndex,
    pub total_tabs: usize,
}

/// A directory of Simple Tab Groups backups.
#[derive(Debug, Clone)]
pub struct BackupFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl BackupFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    /// Loads every eligible backup in the folder.
    ///
    /// Any unreadable or unparsable backup fails the whole load; a partially loaded index is
    /// never returned.
    pub fn load_index(&self) -> Result<LoadedIndex, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut index = BackupIndex::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| StoreError::Io {
                path: entry.path(),
                source,
            })?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_backup_file_name(&name) {
                continue;
            }

            let file = self.load_file(&entry.path(), &name)?;
            tracing::debug!(
                file = %name,
                groups = file.payload().groups.len(),
                tabs = file.tab_count(),
                "loaded backup"
            );
            index.insert(file);
        }

        let total_tabs = index.total_tabs();
        Ok(LoadedIndex { index, total_tabs })
    }

    /// Reads and parses one backup, applying the group allow-list encoded in `name`.
    pub fn load_file(&self, path: &Path, name: &str) -> Result<BackupFile, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut payload: BackupPayload =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        retain_allowed_groups(name, &mut payload);

        Ok(BackupFile::new(FileKey::new(path, name), payload))
    }

    /// Writes the current payload of `file` back to its own path.
    pub fn write_file(&self, file: &BackupFile) -> Result<(), StoreError> {
        let contents = encode_pretty(file.payload()).map_err(|source| StoreError::Json {
            path: file.path().to_path_buf(),
            source,
        })?;
        write_atomic(file.path(), &contents, self.durability)
    }
}

include!("backup_folder/helpers.rs");
