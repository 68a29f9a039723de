// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Backup folder helpers:
// file name conventions, group allow-lists, pretty encoding, and safe filesystem writes.

/// `manual-stg-*.json`
pub fn is_backup_file_name(name: &str) -> bool {
    name.starts_with(FILENAME_PREFIX)
        && Path::new(name)
            .extension()
            .is_some_and(|ext| ext == BACKUP_EXTENSION)
}

fn group_list_regex() -> &'static Regex {
    static GROUP_LIST: OnceLock<Regex> = OnceLock::new();
    GROUP_LIST.get_or_init(|| Regex::new(r"\[(.*)\]").expect("static group list regex"))
}

/// Group ids listed in brackets in a backup file name, e.g.
/// `manual-stg-backup-2025-08-19@drive4ik[417 12].json`.
///
/// Returns `None` when the name carries no bracket. Entries that are not integers are skipped.
pub fn allowed_group_ids(name: &str) -> Option<Vec<i64>> {
    let captures = group_list_regex().captures(name)?;
    let list = captures.get(1)?.as_str();
    Some(
        list.split(' ')
            .filter_map(|raw| raw.parse::<i64>().ok())
            .collect(),
    )
}

/// Drops groups not named in the file name's allow-list (if it has one).
pub fn retain_allowed_groups(name: &str, payload: &mut BackupPayload) {
    let Some(allowed) = allowed_group_ids(name) else {
        return;
    };
    payload.groups.retain(|group| allowed.contains(&group.id));
}

/// Pretty JSON with four-space indentation, the layout the extension itself exports.
fn encode_pretty(payload: &BackupPayload) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    payload.serialize(&mut serializer)?;
    Ok(out)
}

/// Windows refuses to rename onto an existing file, so the target is removed and the rename
/// retried there.
fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

/// Writes `contents` next to `path` under a temp name, then renames it over `path`.
///
/// Readers see either the old file or the new one. A failed write leaves no temp file.
fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".stg-reader.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    let filled = file.write_all(contents).and_then(|()| match durability {
        WriteDurability::Durable => file.sync_all(),
        WriteDurability::BestEffort => Ok(()),
    });
    drop(file);
    if let Err(source) = filled {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
