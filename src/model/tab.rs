// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One browser tab as exported by Simple Tab Groups.
///
/// Fields the reader does not model (container ids, opener ids, favicons, ...) are kept in
/// `extra` so a rewritten file does not lose them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tab {
    pub fn new(url: impl Into<String>, title: impl Into<String>, id: i64) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            id,
            extra: Map::new(),
        }
    }

    /// `url` and `title` separated by a space, the form used for console listings.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.url, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Group {
    pub fn new(id: i64, title: impl Into<String>, tabs: Vec<Tab>) -> Self {
        Self {
            id,
            title: title.into(),
            tabs,
            extra: Map::new(),
        }
    }
}

/// Top-level document of a backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupPayload {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackupPayload {
    pub fn new(version: impl Into<String>, groups: Vec<Group>) -> Self {
        Self {
            version: version.into(),
            groups,
            extra: Map::new(),
        }
    }

    pub fn tab_count(&self) -> usize {
        self.groups.iter().map(|group| group.tabs.len()).sum()
    }
}
