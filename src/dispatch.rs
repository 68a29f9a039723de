// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The single point every session mutation passes through.
//!
//! [`spawn_executor`] moves the [`Session`] onto its own thread. Front ends talk to it through
//! cloneable [`SessionHandle`]s; each request is a batch of commands that runs to completion
//! before the next request is looked at.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::model::Session;
use crate::opener::UrlOpener;
use crate::ops::{Command, Outcome, Reply, Services, SessionError};
use crate::store::BackupFolder;

const QUEUE_DEPTH: usize = 64;

struct Request {
    commands: Vec<Command>,
    reply: oneshot::Sender<Result<Reply, SessionError>>,
}

#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
    clients: Arc<AtomicUsize>,
}

/// Starts the executor thread. It hands the session back once every handle is gone.
pub fn spawn_executor(
    mut session: Session,
    folder: BackupFolder,
    opener: Arc<dyn UrlOpener>,
) -> io::Result<(SessionHandle, JoinHandle<Session>)> {
    let (tx, mut rx) = mpsc::channel::<Request>(QUEUE_DEPTH);
    let join = thread::Builder::new()
        .name("stg-session".to_owned())
        .spawn(move || {
            while let Some(request) = rx.blocking_recv() {
                let services = Services {
                    folder: &folder,
                    opener: opener.as_ref(),
                };
                let result = session.apply_batch(request.commands, services);
                // The requester may have given up waiting; the work is done either way.
                let _ = request.reply.send(result);
            }
            debug!("session executor stopped");
            session
        })?;

    Ok((
        SessionHandle {
            tx,
            clients: Arc::new(AtomicUsize::new(0)),
        },
        join,
    ))
}

impl SessionHandle {
    pub async fn dispatch(&self, command: Command) -> Result<Reply, SessionError> {
        self.dispatch_batch(vec![command]).await
    }

    pub async fn dispatch_batch(&self, commands: Vec<Command>) -> Result<Reply, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request { commands, reply })
            .await
            .map_err(|_| SessionError::ExecutorGone)?;
        rx.await.map_err(|_| SessionError::ExecutorGone)?
    }

    /// Must not be called from inside an async context.
    pub fn blocking_dispatch(&self, command: Command) -> Result<Reply, SessionError> {
        self.blocking_dispatch_batch(vec![command])
    }

    pub fn blocking_dispatch_batch(&self, commands: Vec<Command>) -> Result<Reply, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .blocking_send(Request { commands, reply })
            .map_err(|_| SessionError::ExecutorGone)?;
        rx.blocking_recv().map_err(|_| SessionError::ExecutorGone)?
    }

    /// Marks a network client as connected until the guard is dropped.
    pub fn client_connected(&self) -> ClientGuard {
        self.clients.fetch_add(1, Ordering::SeqCst);
        ClientGuard {
            clients: Arc::clone(&self.clients),
        }
    }

    pub fn has_clients(&self) -> bool {
        self.clients.load(Ordering::SeqCst) > 0
    }
}

pub struct ClientGuard {
    clients: Arc<AtomicUsize>,
}

impl Drop for ClientGuard {
    fn drop(&mut self) {
        self.clients.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The tabs a find or filter reply matched, if it was one.
pub fn searched_tabs(outcome: &Outcome) -> Option<&[crate::model::Tab]> {
    match outcome {
        Outcome::Searched(report) => Some(&report.tabs),
        _ => None,
    }
}
