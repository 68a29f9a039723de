// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! stg-reader: search, open and prune tabs across Simple Tab Groups backup files.
//!
//! Backups are loaded once into a [`model::Session`]; a console and an optional WebSocket
//! listener submit [`ops::Command`]s to a single executor, and only files that lost tabs
//! are written back on save.

pub mod console;
pub mod dispatch;
pub mod listener;
pub mod logging;
pub mod model;
pub mod opener;
pub mod ops;
pub mod query;
pub mod shutdown;
pub mod store;
