// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Project Listing
//!
//! Skill-filtered, offset-paginated view over a profile's projects. The skill
//! filter uses the same case-insensitive containment as search, applied to
//! project tags only.

use serde::{Deserialize, Serialize};

use crate::domain::error::ProfileError;
use crate::domain::matching::SubstringMatcher;
use crate::domain::profile::{Profile, Project};

/// A validated 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self, ProfileError> {
        if page < 1 {
            return Err(ProfileError::InvalidArgument(format!(
                "page must be at least 1, got {}",
                page
            )));
        }
        if page_size < 1 {
            return Err(ProfileError::InvalidArgument(format!(
                "page_size must be at least 1, got {}",
                page_size
            )));
        }
        let page = usize::try_from(page)
            .map_err(|_| ProfileError::InvalidArgument("page is too large".to_string()))?;
        let page_size = usize::try_from(page_size)
            .map_err(|_| ProfileError::InvalidArgument("page_size is too large".to_string()))?;
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of an ordered collection, with `total` counting the whole
/// collection rather than the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Slice `[(page-1)*page_size, page*page_size)` of `items`, clipped to its length.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let start = request.offset().min(items.len());
    let end = start.saturating_add(request.page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        total: items.len(),
        page: request.page,
        page_size: request.page_size,
    }
}

/// Projects whose tags contain `skill_filter`, paginated. A missing or blank
/// filter keeps every project.
pub fn list_projects(
    profile: &Profile,
    skill_filter: Option<&str>,
    request: PageRequest,
) -> Page<Project> {
    match skill_filter.and_then(SubstringMatcher::new) {
        Some(matcher) => {
            let filtered: Vec<Project> = profile
                .projects
                .iter()
                .filter(|p| matcher.matches_any(&p.skills))
                .cloned()
                .collect();
            paginate(&filtered, request)
        }
        None => paginate(&profile.projects, request),
    }
}
