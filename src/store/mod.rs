// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for backup files on disk.
//!
//! The store module discovers and parses backups in a folder and writes modified backups back
//! in place.

pub mod backup_folder;

pub use backup_folder::{
    allowed_group_ids, is_backup_file_name, BackupFolder, LoadedIndex, StoreError,
    WriteDurability, BACKUP_EXTENSION, FILENAME_PREFIX,
};
