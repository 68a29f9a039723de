// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over tab collections.
//!
//! Searching is stateless: callers pass the tabs to scan (the whole index for `find`, the
//! current found set for `filter`) and get independent copies back.

pub mod highlight;
pub mod search;

pub use highlight::{find_ignore_case, highlight_first};
pub use search::{search, strip_scheme, SearchQuery, TabMatcher};
