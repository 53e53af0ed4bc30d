// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Application service tests.
//!
//! Exercise the profile and query services against recording and failing
//! repositories to check that rejected writes never reach the store, store
//! failures are reported rather than swallowed, and query results are
//! deterministic for a fixed profile.

use async_trait::async_trait;
use parking_lot::Mutex;
use portfolio_core::application::{ProfileService, QueryService, StandardProfileService, StandardQueryService};
use portfolio_core::domain::auth::{Credentials, StaticCredentialGate};
use portfolio_core::domain::error::ProfileError;
use portfolio_core::domain::profile::{NewProfile, Profile, ProfilePatch, Project, WorkExperience};
use portfolio_core::domain::projects::PageRequest;
use portfolio_core::domain::repository::{ProfileRepository, RepositoryError};
use portfolio_core::infrastructure::repositories::InMemoryProfileRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory store that counts writes.
#[derive(Default)]
struct RecordingRepository {
    profile: Mutex<Option<Profile>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

#[async_trait]
impl ProfileRepository for RecordingRepository {
    async fn load(&self) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profile.lock().clone())
    }

    async fn save(&self, profile: &Profile) -> Result<(), RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.profile.lock() = Some(profile.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<bool, RepositoryError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(self.profile.lock().take().is_some())
    }
}

struct FailingRepository;

#[async_trait]
impl ProfileRepository for FailingRepository {
    async fn load(&self) -> Result<Option<Profile>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn save(&self, _profile: &Profile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn delete(&self) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }
}

fn admin() -> Credentials {
    Credentials::new("admin", "s3cret")
}

fn profile_service(repository: Arc<dyn ProfileRepository>) -> StandardProfileService {
    StandardProfileService::new(repository, Arc::new(StaticCredentialGate::new(admin())))
}

fn project(title: &str, tags: &[&str]) -> Project {
    Project {
        title: title.to_string(),
        description: format!("{} description", title),
        skills: tags.iter().map(|t| t.to_string()).collect(),
        links: vec![],
    }
}

fn new_profile() -> NewProfile {
    NewProfile {
        name: "Grace Hopper".to_string(),
        email: "grace@navy.example.com".to_string(),
        skills: vec!["COBOL".to_string(), "Go".to_string()],
        links: Default::default(),
        education: vec![],
        work: vec![WorkExperience {
            title: "Goalkeeper".to_string(),
            company: "Harbor FC".to_string(),
            duration: "1950".to_string(),
            description: Some("Python scripting on the side".to_string()),
        }],
        projects: vec![
            project("Compiler", &["COBOL", "go"]),
            project("Linker", &["Go"]),
            project("Manual", &[]),
        ],
    }
}

#[tokio::test]
async fn test_rejected_writes_never_reach_the_store() {
    let repository = Arc::new(RecordingRepository::default());
    let service = profile_service(repository.clone());
    let wrong = Credentials::new("admin", "wrong");

    assert!(matches!(
        service.create_profile(None, new_profile()).await,
        Err(ProfileError::Unauthorized)
    ));
    assert!(matches!(
        service.create_profile(Some(&wrong), new_profile()).await,
        Err(ProfileError::Unauthorized)
    ));
    assert!(matches!(
        service.update_profile(Some(&wrong), ProfilePatch::default()).await,
        Err(ProfileError::Unauthorized)
    ));
    assert!(matches!(
        service.add_project(None, project("x", &[])).await,
        Err(ProfileError::Unauthorized)
    ));
    assert!(matches!(service.delete_project(None, 0).await, Err(ProfileError::Unauthorized)));
    assert!(matches!(service.delete_profile(Some(&wrong)).await, Err(ProfileError::Unauthorized)));

    assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    assert_eq!(repository.deletes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_authorize_checks_credentials_only() {
    let repository = Arc::new(RecordingRepository::default());
    let service = profile_service(repository.clone());

    assert!(service.authorize("create_profile", Some(&admin())).is_ok());
    assert!(matches!(
        service.authorize("create_profile", None),
        Err(ProfileError::Unauthorized)
    ));
    assert!(matches!(
        service.authorize("delete_project", Some(&Credentials::new("admin", "S3cret"))),
        Err(ProfileError::Unauthorized)
    ));
    assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    assert_eq!(repository.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_patch_does_not_write() {
    let repository = Arc::new(RecordingRepository::default());
    let service = profile_service(repository.clone());

    let created = service.create_profile(Some(&admin()), new_profile()).await.unwrap();
    let unchanged = service
        .update_profile(Some(&admin()), ProfilePatch::default())
        .await
        .unwrap();

    assert_eq!(created, unchanged);
    assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_without_profile_is_not_found() {
    let service = profile_service(Arc::new(RecordingRepository::default()));
    let patch = ProfilePatch {
        name: Some("Someone".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.update_profile(Some(&admin()), patch).await,
        Err(ProfileError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_store_failures_are_reported() {
    let repository: Arc<dyn ProfileRepository> = Arc::new(FailingRepository);
    let profiles = profile_service(repository.clone());
    let queries = StandardQueryService::new(repository);

    assert!(matches!(profiles.get_profile().await, Err(ProfileError::Store(_))));
    assert!(matches!(
        profiles.create_profile(Some(&admin()), new_profile()).await,
        Err(ProfileError::Store(_))
    ));
    assert!(matches!(queries.search("go").await, Err(ProfileError::Store(_))));
    assert!(matches!(queries.top_skills(3).await, Err(ProfileError::Store(_))));
}

#[tokio::test]
async fn test_project_mutations_are_positional() {
    let repository = Arc::new(InMemoryProfileRepository::new());
    let service = profile_service(repository.clone());
    service.create_profile(Some(&admin()), new_profile()).await.unwrap();

    let updated = service
        .add_project(Some(&admin()), project("Debugger", &["Moth"]))
        .await
        .unwrap();
    assert_eq!(updated.projects.len(), 4);
    assert_eq!(updated.projects[3].title, "Debugger");

    let updated = service.delete_project(Some(&admin()), 1).await.unwrap();
    let titles: Vec<_> = updated.projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Compiler", "Manual", "Debugger"]);

    assert!(matches!(
        service.delete_project(Some(&admin()), 3).await,
        Err(ProfileError::NotFound(_))
    ));

    let stored = repository.load().await.unwrap().unwrap();
    assert_eq!(stored.projects, updated.projects);
    assert!(stored.updated_at >= stored.created_at);
}

#[tokio::test]
async fn test_blank_project_title_is_invalid() {
    let service = profile_service(Arc::new(InMemoryProfileRepository::new()));
    service.create_profile(Some(&admin()), new_profile()).await.unwrap();

    assert!(matches!(
        service.add_project(Some(&admin()), project("   ", &[])).await,
        Err(ProfileError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_queries_are_deterministic() {
    let repository = Arc::new(InMemoryProfileRepository::new());
    profile_service(repository.clone())
        .create_profile(Some(&admin()), new_profile())
        .await
        .unwrap();
    let queries = StandardQueryService::new(repository);

    let first = queries.search("go").await.unwrap();
    let second = queries.search("go").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.matches.skills, vec!["Go"]);
    assert_eq!(first.matches.projects.len(), 2);
    assert_eq!(first.matches.work.len(), 1);

    let python = queries.search("python").await.unwrap();
    assert!(python.matches.work.is_empty());

    let top = queries.top_skills(2).await.unwrap();
    assert_eq!(top[0].skill, "COBOL");
    assert_eq!(top[0].count, 2);
    assert_eq!(top[1].skill, "Go");
    assert_eq!(top[1].count, 2);
    assert_eq!(queries.top_skills(2).await.unwrap(), top);

    assert!(matches!(queries.top_skills(0).await, Err(ProfileError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_filtering_by_a_ranked_skill_matches_search() {
    let repository = Arc::new(InMemoryProfileRepository::new());
    profile_service(repository.clone())
        .create_profile(Some(&admin()), new_profile())
        .await
        .unwrap();
    let queries = StandardQueryService::new(repository);

    for ranked in queries.top_skills(10).await.unwrap() {
        let listed = queries
            .list_projects(Some(&ranked.skill), PageRequest::new(1, 100).unwrap())
            .await
            .unwrap();
        let searched = queries.search(&ranked.skill).await.unwrap();
        let tagged: Vec<_> = searched
            .matches
            .projects
            .into_iter()
            .filter(|p| p.skills.iter().any(|s| s.to_lowercase().contains(&ranked.skill.to_lowercase())))
            .collect();
        assert_eq!(listed.items, tagged, "skill {}", ranked.skill);
    }
}
