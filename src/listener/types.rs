// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// How many tabs match.
    Count,
    /// The matching URLs; the matches are removed from the session afterwards.
    Tabs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageIn {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub id: i64,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageOut {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub id: i64,
    pub data: ResponseData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Count(usize),
    Tabs(Vec<String>),
}
