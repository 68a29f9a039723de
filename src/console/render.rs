// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType, SetTitle};

use crate::model::Tab;
use crate::ops::{Outcome, SearchKind, SearchReport, Status};
use crate::query::highlight_first;

const INFO_GRAY: Color = Color::Rgb {
    r: 100,
    g: 100,
    b: 100,
};

/// Gray `# ...` line used for everything that is not a tab listing.
pub fn info(out: &mut impl Write, message: impl AsRef<str>) -> io::Result<()> {
    writeln!(out, "{}", format!("# {}", message.as_ref()).with(INFO_GRAY))
}

pub fn title(status: Status, client_connected: bool) -> String {
    let marker = if client_connected { " | *" } else { "" };
    format!(
        "f:{} | rem:{}{}",
        status.found, status.remove_pending, marker
    )
}

pub fn set_title(out: &mut impl Write, status: Status, client_connected: bool) -> io::Result<()> {
    execute!(out, SetTitle(title(status, client_connected)))
}

pub fn saved_file(out: &mut impl Write, name: &str) -> io::Result<()> {
    writeln!(out, "done: {name}")
}

pub fn render(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Nothing => Ok(()),
        Outcome::Set { name, old, new } => info(out, format!("{name} {old} => {new}")),
        Outcome::Searched(report) => render_search(out, report),
        Outcome::Opened { tabs, removal } => {
            for tab in tabs {
                writeln!(out, "{}", tab.display_line())?;
            }
            removed(out, removal.removed)
        }
        Outcome::Removed(removal) => removed(out, removal.removed),
        Outcome::Listing { pattern, tabs } => {
            highlighted(out, pattern, tabs)?;
            info(out, format!("found {} tabs", tabs.len()))
        }
        Outcome::Files { rows, total } => {
            for row in rows {
                writeln!(out, "{:7}  {}", row.tabs, row.name)?;
            }
            writeln!(out, "{total:7}")
        }
        Outcome::Saved { files } => files.iter().try_for_each(|name| saved_file(out, name)),
        Outcome::Quit {
            removed_total,
            remove_pending,
        } => {
            info(out, format!("removed {removed_total} tabs this session"))?;
            if *remove_pending > 0 {
                info(out, format!("{remove_pending} removals were not saved"))?;
            }
            info(out, "Exiting program")
        }
        Outcome::Clear => execute!(out, Clear(ClearType::All), MoveTo(0, 0)),
    }
}

fn render_search(out: &mut impl Write, report: &SearchReport) -> io::Result<()> {
    if report.echo {
        highlighted(out, &report.pattern, &report.tabs)?;
    }
    for hit in &report.groups {
        info(
            out,
            format!(
                "found `{}` tabs in group `{}` | {} | {}",
                hit.hits, hit.group, hit.total, hit.file
            ),
        )?;
    }
    // A find that matched nothing stays silent; a filter always reports.
    if report.kind == SearchKind::Filter || !report.tabs.is_empty() {
        info(out, format!("found {} tabs", report.tabs.len()))?;
    }
    Ok(())
}

fn highlighted(out: &mut impl Write, pattern: &str, tabs: &[Tab]) -> io::Result<()> {
    for tab in tabs {
        writeln!(out, "{}", highlight_first(pattern, &tab.display_line()))?;
    }
    Ok(())
}

fn removed(out: &mut impl Write, count: usize) -> io::Result<()> {
    info(out, format!("removed {count} item/s"))
}
