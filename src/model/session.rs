// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use super::index::BackupIndex;
use super::tab::Tab;

/// Tabs opened by a bare `open` unless changed with `set limit`.
pub const DEFAULT_OPEN_LIMIT: usize = 10;

/// Hard ceiling for a single `open`, and for the configurable limit.
pub const MAX_OPEN: usize = 40;

/// The mutable record every command runs against.
///
/// A `Session` is owned by exactly one executor thread (see [`crate::dispatch`]); front ends
/// never touch it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    index: BackupIndex,
    found: Vec<Tab>,
    consumed: HashSet<String>,
    open_limit: usize,
    remove_pending: usize,
    removed_total: usize,
    case_insensitive: bool,
    debug_level: u8,
    last_pattern: String,
}

impl Session {
    pub fn new(index: BackupIndex) -> Self {
        Self {
            index,
            found: Vec::new(),
            consumed: HashSet::new(),
            open_limit: DEFAULT_OPEN_LIMIT,
            remove_pending: 0,
            removed_total: 0,
            case_insensitive: true,
            debug_level: 0,
            last_pattern: String::new(),
        }
    }

    pub fn with_open_limit(mut self, open_limit: usize) -> Self {
        self.set_open_limit(open_limit);
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn index(&self) -> &BackupIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut BackupIndex {
        &mut self.index
    }

    pub fn found(&self) -> &[Tab] {
        &self.found
    }

    pub fn set_found(&mut self, found: Vec<Tab>) {
        self.found = found;
    }

    /// Removes and returns the first `count` entries of the found set.
    pub fn take_found_front(&mut self, count: usize) -> Vec<Tab> {
        let count = count.min(self.found.len());
        self.found.drain(..count).collect()
    }

    pub fn take_found(&mut self) -> Vec<Tab> {
        std::mem::take(&mut self.found)
    }

    pub fn consumed(&self) -> &HashSet<String> {
        &self.consumed
    }

    pub fn stage(&mut self, url: impl Into<String>) {
        self.consumed.insert(url.into());
    }

    pub fn take_consumed(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.consumed)
    }

    pub fn open_limit(&self) -> usize {
        self.open_limit
    }

    /// Values outside `1..=MAX_OPEN` are ignored; returns whether the limit changed.
    pub fn set_open_limit(&mut self, open_limit: usize) -> bool {
        if open_limit == 0 || open_limit > MAX_OPEN {
            return false;
        }
        self.open_limit = open_limit;
        true
    }

    pub fn remove_pending(&self) -> usize {
        self.remove_pending
    }

    pub fn removed_total(&self) -> usize {
        self.removed_total
    }

    pub fn record_removed(&mut self, removed: usize) {
        self.remove_pending += removed;
        self.removed_total += removed;
    }

    pub fn reset_remove_pending(&mut self) {
        self.remove_pending = 0;
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn set_case_insensitive(&mut self, case_insensitive: bool) {
        self.case_insensitive = case_insensitive;
    }

    pub fn debug_level(&self) -> u8 {
        self.debug_level
    }

    pub fn set_debug_level(&mut self, debug_level: u8) {
        self.debug_level = debug_level;
    }

    /// Pattern of the last `find`, used to highlight `show` output.
    pub fn last_pattern(&self) -> &str {
        &self.last_pattern
    }

    pub fn set_last_pattern(&mut self, pattern: impl Into<String>) {
        self.last_pattern = pattern.into();
    }

    pub fn clear_last_pattern(&mut self) {
        self.last_pattern.clear();
    }
}
