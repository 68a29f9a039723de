// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

impl Session {
    pub fn status(&self) -> Status {
        Status {
            found: self.found().len(),
            remove_pending: self.remove_pending(),
        }
    }

    /// Applies commands back to back. The first error stops the batch.
    pub fn apply_batch(
        &mut self,
        commands: Vec<Command>,
        services: Services<'_>,
    ) -> Result<Reply, SessionError> {
        let mut outcomes = Vec::with_capacity(commands.len());
        for command in commands {
            outcomes.push(self.apply(command, services)?);
        }
        Ok(Reply {
            outcomes,
            status: self.status(),
        })
    }

    pub fn apply(
        &mut self,
        command: Command,
        services: Services<'_>,
    ) -> Result<Outcome, SessionError> {
        let outcome = match command {
            Command::Set(setting) => self.apply_setting(setting),
            Command::Find {
                pattern,
                url_only,
                echo,
            } => self.find(pattern, url_only, echo),
            Command::Filter { pattern } => self.filter(pattern),
            Command::Open { count } => self.open(count, services.opener),
            Command::Remove => self.force_remove(),
            Command::Show(ShowTarget::Found) => Outcome::Listing {
                pattern: self.last_pattern().to_owned(),
                tabs: self.found().to_vec(),
            },
            Command::Show(ShowTarget::Files) => self.file_rows(),
            Command::Save => return self.save(services.folder),
            Command::Quit => Outcome::Quit {
                removed_total: self.removed_total(),
                remove_pending: self.remove_pending(),
            },
            Command::Clear => Outcome::Clear,
        };
        Ok(outcome)
    }

    fn apply_setting(&mut self, setting: Setting) -> Outcome {
        match setting {
            Setting::OpenLimit(limit) => {
                let old = self.open_limit();
                if !self.set_open_limit(limit) {
                    return Outcome::Nothing;
                }
                Outcome::Set {
                    name: "OpenLimit",
                    old: old.to_string(),
                    new: limit.to_string(),
                }
            }
            Setting::CaseInsensitive(value) => {
                let old = self.case_insensitive();
                self.set_case_insensitive(value);
                Outcome::Set {
                    name: "SearchInsensitive",
                    old: old.to_string(),
                    new: value.to_string(),
                }
            }
            Setting::DebugLevel(level) => {
                let old = self.debug_level();
                self.set_debug_level(level);
                Outcome::Set {
                    name: "DebugLevel",
                    old: old.to_string(),
                    new: level.to_string(),
                }
            }
        }
    }

    fn find(&mut self, pattern: String, url_only: bool, echo: bool) -> Outcome {
        if pattern.chars().count() < MIN_PATTERN_CHARS {
            return Outcome::Nothing;
        }

        let started = Instant::now();
        let query = SearchQuery::new(pattern)
            .with_case_insensitive(self.case_insensitive())
            .with_url_only(url_only)
            .with_echo(echo);
        let collect_groups = self.debug_level() > 0;

        let mut found = Vec::new();
        let mut groups = Vec::new();
        {
            let matcher = query.matcher();
            for file in self.index().files() {
                for group in &file.payload().groups {
                    let before = found.len();
                    found.extend(group.tabs.iter().filter(|tab| matcher.matches(tab)).cloned());
                    let hits = found.len() - before;
                    if hits > 0 && collect_groups {
                        groups.push(GroupHit {
                            file: file.display_name().to_owned(),
                            group: group.title.clone(),
                            hits,
                            total: group.tabs.len(),
                        });
                    }
                }
            }
        }

        self.set_last_pattern(strip_scheme(&query.pattern));
        self.set_found(found.clone());
        debug!(
            pattern = %query.pattern,
            found = found.len(),
            elapsed = ?started.elapsed(),
            "find"
        );

        Outcome::Searched(SearchReport {
            kind: SearchKind::Find,
            pattern: query.pattern,
            tabs: found,
            echo,
            groups,
        })
    }

    /// Narrows the current found set; an empty result leaves it untouched.
    fn filter(&mut self, pattern: String) -> Outcome {
        if self.found().is_empty() {
            return Outcome::Nothing;
        }

        let started = Instant::now();
        let query = SearchQuery::new(pattern).with_case_insensitive(self.case_insensitive());
        let matches = search(self.found(), &query);
        if !matches.is_empty() {
            self.set_found(matches.clone());
        }
        debug!(
            pattern = %query.pattern,
            matched = matches.len(),
            elapsed = ?started.elapsed(),
            "filter"
        );

        Outcome::Searched(SearchReport {
            kind: SearchKind::Filter,
            pattern: query.pattern,
            tabs: matches,
            echo: query.echo,
            groups: Vec::new(),
        })
    }

    fn open(&mut self, count: Option<usize>, opener: &dyn UrlOpener) -> Outcome {
        // The ceiling applies to the count asked for, before it is capped by the found set.
        let requested = count.unwrap_or(self.open_limit());
        if requested > MAX_OPEN {
            return Outcome::Nothing;
        }
        let resolved = requested.min(self.found().len());
        if resolved == 0 {
            return Outcome::Nothing;
        }

        let tabs = self.take_found_front(resolved);
        for tab in &tabs {
            if let Err(err) = opener.open(&tab.url) {
                warn!(url = %tab.url, error = %err, "failed to launch browser");
            }
            self.stage(tab.url.clone());
        }
        self.clear_last_pattern();

        let staged = self.consumed().len();
        let removed = self.remove_consumed();
        Outcome::Opened {
            tabs,
            removal: RemovalReport { staged, removed },
        }
    }

    /// Removes the whole found set from the index without opening anything.
    fn force_remove(&mut self) -> Outcome {
        if self.found().is_empty() {
            return Outcome::Nothing;
        }

        for tab in self.take_found() {
            self.stage(tab.url);
        }
        self.clear_last_pattern();

        let staged = self.consumed().len();
        let removed = self.remove_consumed();
        Outcome::Removed(RemovalReport { staged, removed })
    }

    /// Drops every staged URL from every group of every file.
    ///
    /// The staged set is always emptied, whether or not its URLs still exist anywhere.
    pub fn remove_consumed(&mut self) -> usize {
        let consumed = self.take_consumed();
        if consumed.is_empty() {
            return 0;
        }

        let started = Instant::now();
        let removed = self.index_mut().remove_urls(&consumed);
        self.record_removed(removed);
        debug!(
            staged = consumed.len(),
            removed,
            elapsed = ?started.elapsed(),
            "removed consumed tabs"
        );
        removed
    }

    fn file_rows(&self) -> Outcome {
        let rows = self
            .index()
            .files()
            .map(|file| FileRow {
                name: file.display_name().to_owned(),
                tabs: file.tab_count(),
            })
            .collect::<Vec<_>>();
        let total = rows.iter().map(|row| row.tabs).sum();
        Outcome::Files { rows, total }
    }

    /// Writes every modified file back in place, in index order.
    ///
    /// Stops at the first failed write; files written before it are clean, the pending
    /// counter is left as is.
    pub fn save(&mut self, folder: &BackupFolder) -> Result<Outcome, SessionError> {
        let mut saved = Vec::new();
        for file in self.index_mut().files_mut() {
            if !file.is_modified() {
                continue;
            }
            if let Err(source) = folder.write_file(file) {
                return Err(SessionError::Save {
                    path: file.path().to_path_buf(),
                    saved,
                    source,
                });
            }
            file.mark_saved();
            saved.push(file.display_name().to_owned());
        }

        self.reset_remove_pending();
        Ok(Outcome::Saved { files: saved })
    }
}
