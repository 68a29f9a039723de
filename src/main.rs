// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! stg-reader CLI entrypoint.
//!
//! Loads every `manual-stg-*.json` backup in a directory and reads commands from stdin.
//! With `--ws` the same session is also served over WebSocket at `ws://<address>/ws`, or at
//! `wss://<address>/ws` when `--cert` and `--key` are given.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use tracing::{error, info, warn};

use stg_reader::console::{render, Console};
use stg_reader::dispatch::spawn_executor;
use stg_reader::listener::{self, TlsFiles};
use stg_reader::logging::{init_subscriber, Verbosity};
use stg_reader::model::{Session, DEFAULT_OPEN_LIMIT, MAX_OPEN};
use stg_reader::opener::{DryRunOpener, SystemOpener, UrlOpener};
use stg_reader::shutdown::{Shutdown, GRACE_DELAY};
use stg_reader::store::{BackupFolder, WriteDurability};

const DEFAULT_ADDRESS: &str = "127.0.0.1:50001";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "stg-reader", version, about)]
struct CliOptions {
    /// Directory holding the backup files.
    #[arg(short = 'p', long, default_value = ".")]
    path: PathBuf,

    /// Serve remote lookups over WebSocket.
    #[arg(long)]
    ws: bool,

    /// Address the WebSocket listener binds to.
    #[arg(short = 'a', long, default_value = DEFAULT_ADDRESS)]
    address: String,

    /// PEM certificate chain for `wss://`; `~/` is expanded.
    #[arg(long, value_name = "PEM", requires_all = ["key", "ws"])]
    cert: Option<PathBuf>,

    /// PEM private key matching `--cert`.
    #[arg(long, value_name = "PEM", requires = "cert")]
    key: Option<PathBuf>,

    /// How many tabs `open` launches when no count is given.
    #[arg(short = 'l', long, default_value_t = DEFAULT_OPEN_LIMIT, value_parser = parse_limit)]
    limit: usize,

    /// Match titles with the pattern's exact case.
    #[arg(long)]
    case_sensitive: bool,

    /// Fsync saved files and their directory.
    #[arg(long)]
    durable_writes: bool,

    /// Log URLs instead of launching the browser.
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,

    #[arg(long)]
    no_color: bool,
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    let limit: usize = raw.parse().map_err(|err| format!("{err}"))?;
    if (1..=MAX_OPEN).contains(&limit) {
        Ok(limit)
    } else {
        Err(format!("must be between 1 and {MAX_OPEN}"))
    }
}

fn main() {
    let options = CliOptions::parse();

    if let Err(err) = init_subscriber(
        Verbosity::from_flags(options.verbose, options.quiet),
        options.no_color,
    ) {
        eprintln!("stg-reader: {err}");
    }
    if options.no_color {
        crossterm::style::force_color_output(false);
    }

    match run(options) {
        Ok(shutdown) if !shutdown.is_failed() => {}
        Ok(_) => std::process::exit(1),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

fn run(options: CliOptions) -> Result<Shutdown, Box<dyn Error>> {
    let folder = if options.durable_writes {
        BackupFolder::new(&options.path).with_durability(WriteDurability::Durable)
    } else {
        BackupFolder::new(&options.path)
    };

    let loaded = folder.load_index()?;
    info!(
        files = loaded.index.len(),
        path = %options.path.display(),
        "loaded {} tabs",
        loaded.total_tabs
    );

    let session = Session::new(loaded.index)
        .with_open_limit(options.limit)
        .with_case_insensitive(!options.case_sensitive);
    let opener: Arc<dyn UrlOpener> = if options.dry_run {
        Arc::new(DryRunOpener::new())
    } else {
        Arc::new(SystemOpener::new())
    };
    let (handle, _executor) = spawn_executor(session, folder, opener)?;
    let shutdown = Shutdown::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let listener = if options.ws {
            let tls = match (&options.cert, &options.key) {
                (Some(cert), Some(key)) => {
                    Some(listener::load_tls(&TlsFiles::new(cert, key)).await?)
                }
                _ => None,
            };
            let tcp = listener::bind(&options.address).await?;
            let (handle, shutdown) = (handle.clone(), shutdown.clone());
            Some(tokio::spawn(async move {
                if let Err(err) = listener::serve(tcp, tls, handle, shutdown.clone()).await {
                    error!("{err}");
                    shutdown.fail();
                }
            }))
        } else {
            None
        };

        // Blocked stdin reads never return on shutdown, so the console thread is not joined.
        let (console_handle, console_shutdown) = (handle.clone(), shutdown.clone());
        thread::Builder::new()
            .name("stg-console".to_owned())
            .spawn(move || {
                let console = Console::new(
                    io::stdin().lock(),
                    io::stdout(),
                    console_handle,
                    console_shutdown,
                );
                if let Err(err) = console.run() {
                    error!(error = %err, "console stopped");
                }
            })?;
        drop(handle);

        wait_for_shutdown(&shutdown).await;
        shutdown.request();
        if let Some(listener) = listener {
            let _ = listener.await;
        }
        tokio::time::sleep(GRACE_DELAY).await;
        Ok::<(), Box<dyn Error>>(())
    })?;

    Ok(shutdown)
}

async fn wait_for_shutdown(shutdown: &Shutdown) {
    let signal = tokio::select! {
        () = shutdown.cancelled() => return,
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };
    let _ = render::info(&mut io::stdout(), format!("Caught signal: {signal}"));
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for SIGINT");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            warn!(error = %err, "cannot listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
