// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Skill Ranking
//!
//! Frequency ranking over every skill occurrence in a profile: the profile's
//! own `skills` followed by each project's tags, in project order.
//!
//! Skills are keyed by their exact string. `"Go"` and `"go"` are counted
//! separately; no normalization or fuzzy de-duplication is attempted. Ties keep
//! the order in which the skill was first encountered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::ProfileError;
use crate::domain::profile::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Top `limit` skills by occurrence count, descending, stable on ties.
pub fn top_skills(profile: &Profile, limit: usize) -> Result<Vec<SkillCount>, ProfileError> {
    if limit == 0 {
        return Err(ProfileError::InvalidArgument("limit must be at least 1".to_string()));
    }

    let occurrences = profile
        .skills
        .iter()
        .chain(profile.projects.iter().flat_map(|p| p.skills.iter()));

    let mut ranked: Vec<SkillCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for skill in occurrences {
        match index.get(skill.as_str()) {
            Some(&slot) => ranked[slot].count += 1,
            None => {
                index.insert(skill.as_str(), ranked.len());
                ranked.push(SkillCount { skill: skill.clone(), count: 1 });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    Ok(ranked)
}
