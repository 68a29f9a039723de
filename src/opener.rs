// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Launching URLs in the operator's browser.

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

pub trait UrlOpener: Send + Sync {
    /// Starts opening `url` without waiting for the browser.
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands URLs to the platform's default handler (`xdg-open`, `open`, or `rundll32`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOpener {
    program: String,
    args: Vec<String>,
}

impl SystemOpener {
    pub fn new() -> Self {
        if cfg!(target_os = "windows") {
            Self::with_program("rundll32", ["url.dll,FileProtocolHandler"])
        } else if cfg!(target_os = "macos") {
            Self::with_program("open", [] as [&str; 0])
        } else {
            Self::with_program("xdg-open", [] as [&str; 0])
        }
    }

    pub fn with_program<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        reap(child).map(drop)
    }
}

/// Waits for `child` on a detached thread so it does not linger as a zombie.
fn reap(mut child: Child) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    thread::Builder::new()
        .name("stg-opener-reap".to_owned())
        .spawn(move || {
            let status = child.wait();
            if let Err(err) = &status {
                tracing::debug!(error = %err, "browser launcher was not reaped");
            }
            status
        })
}

/// Records URLs instead of launching anything (`--dry-run`, tests).
#[derive(Debug, Default)]
pub struct DryRunOpener {
    opened: Mutex<Vec<String>>,
}

impl DryRunOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        match self.opened.lock() {
            Ok(opened) => opened.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl UrlOpener for DryRunOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        tracing::info!(%url, "dry run: not opening");
        match self.opened.lock() {
            Ok(mut opened) => opened.push(url.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(url.to_owned()),
        }
        Ok(())
    }
}

impl<T: UrlOpener + ?Sized> UrlOpener for std::sync::Arc<T> {
    fn open(&self, url: &str) -> io::Result<()> {
        (**self).open(url)
    }
}
