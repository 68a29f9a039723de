// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use super::backup::{BackupFile, FileKey};
use super::index::BackupIndex;
use super::tab::{BackupPayload, Group, Tab};

pub(crate) fn file_at(dir: &Path, name: &str, groups: Vec<Group>) -> BackupFile {
    BackupFile::new(
        FileKey::new(dir.join(name), name),
        BackupPayload::new("5.2", groups),
    )
}

/// File A of the alpha/beta walkthrough: one group holding `Alpha` and `Beta`.
pub(crate) fn alpha_beta_file(dir: &Path) -> BackupFile {
    file_at(
        dir,
        "manual-stg-a.json",
        vec![Group::new(
            1,
            "G1",
            vec![
                Tab::new("http://x.com/a", "Alpha", 1),
                Tab::new("http://y.com/b", "Beta", 2),
            ],
        )],
    )
}

/// Two files sharing `https://shared.example/` across three groups.
pub(crate) fn reading_list_index(dir: &Path) -> BackupIndex {
    let a = file_at(
        dir,
        "manual-stg-2024-01-01.json",
        vec![
            Group::new(
                1,
                "Rust",
                vec![
                    Tab::new("https://doc.rust-lang.org/book/", "The Rust Book", 1),
                    Tab::new("https://shared.example/", "Shared page", 2),
                    Tab::new("https://crates.io/crates/serde", "serde - crates.io", 3),
                ],
            ),
            Group::new(
                2,
                "Cooking",
                vec![
                    Tab::new("http://recipes.example/bread", "Sourdough Bread", 4),
                    Tab::new("http://recipes.example/rust-cake", "Chocolate cake", 5),
                ],
            ),
        ],
    );
    let b = file_at(
        dir,
        "manual-stg-2024-02-01.json",
        vec![Group::new(
            7,
            "Later",
            vec![
                Tab::new("https://shared.example/", "Shared page (copy)", 6),
                Tab::new("https://blog.example/RUST-tips", "Tips for rustaceans", 7),
            ],
        )],
    );
    BackupIndex::from_iter([a, b])
}

pub(crate) fn numbered_tabs(count: usize) -> Vec<Tab> {
    (0..count)
        .map(|n| Tab::new(format!("https://site.example/page/{n}"), format!("Page {n}"), n as i64))
        .collect()
}
