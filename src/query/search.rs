// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of stg-reader and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use memchr::memmem;

use crate::model::Tab;

/// One search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub pattern: String,
    /// Applies to titles only; URLs are always matched with the pattern's own case.
    pub case_insensitive: bool,
    /// Skip title matching entirely.
    pub url_only: bool,
    /// Whether matches should be echoed back to the operator.
    pub echo: bool,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            case_insensitive: true,
            url_only: false,
            echo: true,
        }
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_url_only(mut self, url_only: bool) -> Self {
        self.url_only = url_only;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Compiled form for matching many tabs against the same query.
    pub fn matcher(&self) -> TabMatcher<'_> {
        TabMatcher::new(self)
    }
}

/// Removes a leading `http://` or `https://`.
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Precomputed finders for one [`SearchQuery`].
pub struct TabMatcher<'q> {
    query: &'q SearchQuery,
    url_finder: memmem::Finder<'q>,
    title_pattern: String,
}

impl<'q> TabMatcher<'q> {
    fn new(query: &'q SearchQuery) -> Self {
        let title_pattern = if query.case_insensitive {
            query.pattern.to_lowercase()
        } else {
            query.pattern.clone()
        };
        Self {
            query,
            url_finder: memmem::Finder::new(query.pattern.as_bytes()),
            title_pattern,
        }
    }

    pub fn matches(&self, tab: &Tab) -> bool {
        if self
            .url_finder
            .find(strip_scheme(&tab.url).as_bytes())
            .is_some()
        {
            return true;
        }

        if self.query.url_only {
            return false;
        }

        if self.query.case_insensitive {
            memmem::find(
                tab.title.to_lowercase().as_bytes(),
                self.title_pattern.as_bytes(),
            )
            .is_some()
        } else {
            memmem::find(tab.title.as_bytes(), self.title_pattern.as_bytes()).is_some()
        }
    }
}

/// Copies every matching tab, preserving input order.
pub fn search<'a, I>(tabs: I, query: &SearchQuery) -> Vec<Tab>
where
    I: IntoIterator<Item = &'a Tab>,
{
    let matcher = query.matcher();
    tabs.into_iter()
        .filter(|tab| matcher.matches(tab))
        .cloned()
        .collect()
}
