// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session commands.
//!
//! Both front ends turn their input into [`Command`]s; the executor applies them to the
//! [`Session`] one at a time and hands back an [`Outcome`] describing what happened. Input that
//! does not make sense (unknown command, bad number, too-short pattern) never reaches the
//! session as an error: it either fails to parse or applies as [`Outcome::Nothing`].

use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Session, Tab, MAX_OPEN};
use crate::opener::UrlOpener;
use crate::query::{search, strip_scheme, SearchQuery};
use crate::store::{BackupFolder, StoreError};

/// Patterns this short would match nearly everything.
pub const MIN_PATTERN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Setting),
    Find {
        pattern: String,
        url_only: bool,
        echo: bool,
    },
    Filter {
        pattern: String,
    },
    Open {
        count: Option<usize>,
    },
    Remove,
    Show(ShowTarget),
    Save,
    Quit,
    Clear,
}

impl Command {
    pub fn find(pattern: impl Into<String>) -> Self {
        Self::Find {
            pattern: pattern.into(),
            url_only: false,
            echo: true,
        }
    }

    /// A find whose matches are not echoed to the console (used for remote lookups).
    pub fn find_quiet(pattern: impl Into<String>) -> Self {
        Self::Find {
            pattern: pattern.into(),
            url_only: false,
            echo: false,
        }
    }

    pub fn filter(pattern: impl Into<String>) -> Self {
        Self::Filter {
            pattern: pattern.into(),
        }
    }

    pub fn open(count: Option<usize>) -> Self {
        Self::Open { count }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    OpenLimit(usize),
    CaseInsensitive(bool),
    DebugLevel(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Found,
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Find,
    Filter,
}

/// Per-group hit counts, only collected while `debug` is above zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHit {
    pub file: String,
    pub group: String,
    pub hits: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub kind: SearchKind,
    pub pattern: String,
    /// Every match of this search; for a filter that matched nothing this is empty and the
    /// found set was left alone.
    pub tabs: Vec<Tab>,
    pub echo: bool,
    pub groups: Vec<GroupHit>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub staged: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub name: String,
    pub tabs: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Nothing,
    Set {
        name: &'static str,
        old: String,
        new: String,
    },
    Searched(SearchReport),
    Opened {
        tabs: Vec<Tab>,
        removal: RemovalReport,
    },
    Removed(RemovalReport),
    Listing {
        pattern: String,
        tabs: Vec<Tab>,
    },
    Files {
        rows: Vec<FileRow>,
        total: usize,
    },
    Saved {
        files: Vec<String>,
    },
    Quit {
        removed_total: usize,
        remove_pending: usize,
    },
    Clear,
}

/// Counters shown in the terminal title after every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    pub found: usize,
    pub remove_pending: usize,
}

/// Everything a batch of commands produced, plus the session status right after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub outcomes: Vec<Outcome>,
    pub status: Status,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to save {path:?}: {source}")]
    Save {
        path: PathBuf,
        /// Files written successfully before the failure.
        saved: Vec<String>,
        #[source]
        source: StoreError,
    },
    #[error("session executor is no longer running")]
    ExecutorGone,
}

/// Side-effecting collaborators a command may need.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub folder: &'a BackupFolder,
    pub opener: &'a dyn UrlOpener,
}

/// Parses one console line.
///
/// Lines starting with `;` or `:` are structured commands; anything else searches for the
/// whole line. Returns `None` for input that should be ignored.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let Some(structured) = input.strip_prefix(|c: char| c == ';' || c == ':') else {
        return Some(Command::find(input));
    };

    let (name, rest) = split_token(structured);
    match name {
        "set" => {
            let (key, rest) = split_token(rest);
            let (value, _) = split_token(rest);
            parse_setting(key, value).map(Command::Set)
        }
        "f" | "find" => Some(Command::find(rest)),
        "findurl" => Some(Command::Find {
            pattern: rest.to_owned(),
            url_only: true,
            echo: true,
        }),
        "filter" => Some(Command::filter(rest)),
        "o" | "open" => {
            let (count, _) = split_token(rest);
            if count.is_empty() {
                Some(Command::open(None))
            } else {
                count.parse().ok().map(|count| Command::open(Some(count)))
            }
        }
        "remove" | "rm" | "rem" => Some(Command::Remove),
        "show" | "list" | "ls" => match split_token(rest).0 {
            "files" => Some(Command::Show(ShowTarget::Files)),
            _ => Some(Command::Show(ShowTarget::Found)),
        },
        "s" | "save" => Some(Command::Save),
        "q" | "quit" | "exit" => Some(Command::Quit),
        "c" | "clear" => Some(Command::Clear),
        _ => None,
    }
}

fn split_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (input, ""),
    }
}

fn parse_setting(key: &str, value: &str) -> Option<Setting> {
    match key {
        "limit" | "l" => value.parse().ok().map(Setting::OpenLimit),
        "insensitive" | "i" => parse_bool(value).map(Setting::CaseInsensitive),
        "debug" | "d" => value.parse().ok().map(Setting::DebugLevel),
        _ => None,
    }
}

/// Accepts the usual spellings: `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

// Command application against the session.
include!("ops_impl.rs");
