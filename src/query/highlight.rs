// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use crossterm::style::Stylize;

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Compares char by char so the range always lands on char boundaries of `haystack`, even
/// when lower-casing would change byte lengths.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        prefix_len_ignore_case(&haystack[start..], needle).map(|len| start..start + len)
    })
}

fn prefix_len_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for wanted in needle.chars() {
        let (_, got) = chars.next()?;
        if !got.to_lowercase().eq(wanted.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(end, _)| end))
}

/// Colors the first case-insensitive occurrence of `pattern` in `line`.
///
/// Later occurrences stay plain; a line without the pattern is returned as is.
pub fn highlight_first(pattern: &str, line: &str) -> String {
    let Some(range) = find_ignore_case(line, pattern) else {
        return line.to_owned();
    };

    format!(
        "{}{}{}",
        &line[..range.start],
        (&line[range.clone()]).blue(),
        &line[range.end..]
    )
}
