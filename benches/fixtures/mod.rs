// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use stg_reader::model::{BackupFile, BackupIndex, BackupPayload, FileKey, Group, Tab};

const HOSTS: [&str; 8] = [
    "doc.rust-lang.org",
    "github.com",
    "news.example",
    "recipes.example",
    "video.example",
    "blog.example",
    "crates.io",
    "wiki.example",
];

const WORDS: [&str; 8] = [
    "Rust", "async", "Sourdough", "Release", "Notes", "Tutorial", "Review", "Weekly",
];

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Large,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }

    /// `(files, groups per file, tabs per group)`.
    const fn shape(self) -> (usize, usize, usize) {
        match self {
            Self::Small => (4, 5, 40),
            Self::Large => (24, 12, 150),
        }
    }
}

/// Small deterministic generator so runs are comparable.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize
    }
}

pub fn index(dir: &Path, case: Case) -> BackupIndex {
    let (files, groups, tabs) = case.shape();
    let mut rng = Lcg(0x5eed);
    let mut next_id = 0i64;

    (0..files)
        .map(|file| {
            let name = format!("manual-stg-bench-{file:03}.json");
            let groups = (0..groups)
                .map(|group| {
                    let tabs = (0..tabs)
                        .map(|_| {
                            next_id += 1;
                            let host = HOSTS[rng.next() % HOSTS.len()];
                            let word = WORDS[rng.next() % WORDS.len()];
                            Tab::new(
                                format!("https://{host}/{}/{next_id}", word.to_lowercase()),
                                format!("{word} {} #{next_id}", WORDS[rng.next() % WORDS.len()]),
                                next_id,
                            )
                        })
                        .collect();
                    Group::new(group as i64, format!("group {group}"), tabs)
                })
                .collect();
            BackupFile::new(
                FileKey::new(dir.join(&name), name),
                BackupPayload::new("5.2", groups),
            )
        })
        .collect()
}

pub fn all_tabs(index: &BackupIndex) -> Vec<Tab> {
    index.files().flat_map(|file| file.tabs().cloned()).collect()
}
