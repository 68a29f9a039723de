// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Backup files hold groups of tabs; the index holds every loaded file; the session wraps the
//! index together with the found/consumed sets and the runtime tunables.

pub mod backup;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod index;
pub mod session;
pub mod tab;

pub use backup::{BackupFile, FileKey};
pub use index::BackupIndex;
pub use session::{Session, DEFAULT_OPEN_LIMIT, MAX_OPEN};
pub use tab::{BackupPayload, Group, Tab};
