// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

/// Case-insensitive substring predicate shared by search and project filtering.
///
/// Both must agree so that filtering projects by a ranked skill returns the
/// same projects a search for that skill does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatcher {
    needle: String,
}

impl SubstringMatcher {
    /// Returns `None` for a term that is empty after trimming.
    pub fn new(term: &str) -> Option<Self> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self { needle: trimmed.to_lowercase() })
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    pub fn matches_any<I, S>(&self, haystacks: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        haystacks.into_iter().any(|h| self.matches(h.as_ref()))
    }
}
