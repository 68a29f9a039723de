// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-oriented operator console.
//!
//! Reads one command per line, submits it to the session executor and prints what came
//! back. Runs on its own thread since it blocks on input.

pub mod render;

use std::io::{self, BufRead, Write};

use tracing::error;

use crate::dispatch::SessionHandle;
use crate::ops::{parse_command, Command, SessionError, Status};
use crate::shutdown::Shutdown;

const PROMPT: &str = "\n> ";

pub struct Console<R, W> {
    input: R,
    output: W,
    handle: SessionHandle,
    shutdown: Shutdown,
    status: Status,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, handle: SessionHandle, shutdown: Shutdown) -> Self {
        Self {
            input,
            output,
            handle,
            shutdown,
            status: Status::default(),
        }
    }

    /// Runs until quit, end of input, or a fatal session error. Always requests shutdown
    /// before returning.
    pub fn run(mut self) -> io::Result<W> {
        let result = self.read_eval_loop();
        if result.is_err() {
            self.shutdown.fail();
        } else {
            self.shutdown.request();
        }
        result.map(|()| self.output)
    }

    fn read_eval_loop(&mut self) -> io::Result<()> {
        let mut line = String::new();
        while !self.shutdown.is_requested() {
            render::set_title(&mut self.output, self.status, self.handle.has_clients())?;
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(self.output)?;
                    render::info(&mut self.output, "EOF")?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(err) => {
                    writeln!(self.output)?;
                    render::info(&mut self.output, err.to_string())?;
                    return Ok(());
                }
            }

            let Some(command) = parse_command(&line) else {
                continue;
            };
            let quit = command == Command::Quit;

            match self.handle.blocking_dispatch(command) {
                Ok(reply) => {
                    self.status = reply.status;
                    for outcome in &reply.outcomes {
                        render::render(&mut self.output, outcome)?;
                    }
                }
                Err(err) => {
                    self.report_failure(&err)?;
                    self.shutdown.fail();
                    return Ok(());
                }
            }

            if quit {
                return Ok(());
            }
        }
        Ok(())
    }

    fn report_failure(&mut self, err: &SessionError) -> io::Result<()> {
        if let SessionError::Save { saved, .. } = err {
            for name in saved {
                render::saved_file(&mut self.output, name)?;
            }
        }
        error!(error = %err, "command failed");
        self.output.flush()
    }
}
