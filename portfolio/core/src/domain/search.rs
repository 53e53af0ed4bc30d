// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Profile Search
//!
//! Case-insensitive substring search over three categories of a profile:
//!
//! | Category | Matched fields |
//! |----------|----------------|
//! | skills | the skill string |
//! | projects | title, description, any skill tag |
//! | work | title, company |
//!
//! Each category keeps the profile's ordering. There is no scoring: an entry
//! either matches or it does not, and it appears at most once per category
//! however many of its fields match. Containment is deliberately broad, so
//! `"go"` matches a work title such as `"Goalkeeper"`.

use serde::{Deserialize, Serialize};

use crate::domain::matching::SubstringMatcher;
use crate::domain::profile::{Profile, Project, WorkExperience};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatches {
    /// Whether the query occurs in the profile name
    #[serde(default)]
    pub name: bool,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub work: Vec<WorkExperience>,
}

impl SearchMatches {
    pub fn is_empty(&self) -> bool {
        !self.name && self.skills.is_empty() && self.projects.is_empty() && self.work.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The trimmed query that was evaluated
    pub query: String,
    pub matches: SearchMatches,
}

/// Partition the profile's skills, projects and work entries by whether they
/// contain `query`. A blank query matches nothing.
pub fn search(profile: &Profile, query: &str) -> SearchResults {
    let trimmed = query.trim().to_string();
    let Some(matcher) = SubstringMatcher::new(&trimmed) else {
        return SearchResults { query: trimmed, matches: SearchMatches::default() };
    };

    let skills = profile
        .skills
        .iter()
        .filter(|skill| matcher.matches(skill))
        .cloned()
        .collect();

    let projects = profile
        .projects
        .iter()
        .filter(|p| {
            matcher.matches(&p.title)
                || matcher.matches(&p.description)
                || matcher.matches_any(&p.skills)
        })
        .cloned()
        .collect();

    let work = profile
        .work
        .iter()
        .filter(|w| matcher.matches(&w.title) || matcher.matches(&w.company))
        .cloned()
        .collect();

    SearchResults {
        query: trimmed,
        matches: SearchMatches {
            name: matcher.matches(&profile.name),
            skills,
            projects,
            work,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Links, NewProfile};

    fn fixture() -> Profile {
        Profile::create(NewProfile {
            name: "Gopal Rao".to_string(),
            email: "gopal@example.com".to_string(),
            skills: vec!["Go".to_string(), "go".to_string(), "Rust".to_string()],
            links: Links::default(),
            education: vec![],
            work: vec![
                WorkExperience {
                    title: "Goalkeeper".to_string(),
                    company: "City FC".to_string(),
                    duration: "2019".to_string(),
                    description: None,
                },
                WorkExperience {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    duration: "2020 - 2024".to_string(),
                    description: Some("wrote go services".to_string()),
                },
            ],
            projects: vec![
                Project {
                    title: "Tracker".to_string(),
                    description: "Time tracking".to_string(),
                    skills: vec!["Go".to_string(), "Python".to_string()],
                    links: vec![],
                },
                Project {
                    title: "Parser".to_string(),
                    description: "A parser".to_string(),
                    skills: vec!["Rust".to_string()],
                    links: vec![],
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_go_matches_across_categories() {
        let results = search(&fixture(), "go");

        assert_eq!(results.matches.skills, vec!["Go".to_string(), "go".to_string()]);
        assert_eq!(results.matches.projects.len(), 1);
        assert_eq!(results.matches.projects[0].title, "Tracker");
        // "Goalkeeper" contains "go": substring matching is intentionally broad.
        assert_eq!(results.matches.work.len(), 1);
        assert_eq!(results.matches.work[0].title, "Goalkeeper");
        assert!(results.matches.name);
    }

    #[test]
    fn test_work_description_is_not_searched() {
        let results = search(&fixture(), "services");
        assert!(results.matches.work.is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        for q in ["", "   ", "\t\n"] {
            let results = search(&fixture(), q);
            assert!(results.matches.is_empty(), "query {:?} should match nothing", q);
            assert_eq!(results.query, "");
        }
    }

    #[test]
    fn test_query_is_trimmed_and_echoed() {
        let results = search(&fixture(), "  PARSER ");
        assert_eq!(results.query, "PARSER");
        assert_eq!(results.matches.projects.len(), 1);
        assert_eq!(results.matches.projects[0].title, "Parser");
    }

    #[test]
    fn test_project_returned_once_for_multiple_reasons() {
        // Both projects match on title and description; each is listed once.
        let results = search(&fixture(), "r");
        let titles: Vec<_> = results.matches.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Tracker", "Parser"]);
    }

    #[test]
    fn test_search_is_deterministic() {
        let profile = fixture();
        assert_eq!(search(&profile, "o"), search(&profile, "o"));
    }
}
