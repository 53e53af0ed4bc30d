// Copyright (c) 2026 Portfolio Playground Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Client tests against a mock HTTP server.

use mockito::Matcher;
use portfolio_sdk::{ClientError, Credentials, PortfolioClient, Project, ProjectQuery, SearchQuery};
use serde_json::json;

// base64("admin:s3cret")
const ADMIN_BASIC: &str = "Basic YWRtaW46czNjcmV0";

fn profile_body() -> String {
    json!({
        "id": "6f1c1f3e-8a4e-4f6b-9d39-0f1f0d0b6a11",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "skills": ["Rust", "Go"],
        "links": { "github": "https://github.com/ada" },
        "education": [],
        "work": [],
        "projects": [
            { "title": "Engine", "description": "Notes", "skills": ["Rust"], "links": [] }
        ],
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-02T00:00:00Z"
    })
    .to_string()
}

fn client(server: &mockito::Server) -> PortfolioClient {
    PortfolioClient::new(server.url()).with_credentials(Credentials::new("admin", "s3cret"))
}

#[tokio::test]
async fn test_reads_are_sent_without_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/profile")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(profile_body())
        .create_async()
        .await;

    let profile = client(&server).get_profile().await.unwrap();
    assert_eq!(profile.name, "Ada Lovelace");
    assert_eq!(profile.projects[0].title, "Engine");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_writes_carry_basic_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/projects")
        .match_header("authorization", ADMIN_BASIC)
        .match_body(Matcher::PartialJson(json!({ "title": "Compiler" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(profile_body())
        .create_async()
        .await;

    let project = Project {
        title: "Compiler".to_string(),
        description: "Toy compiler".to_string(),
        skills: vec!["Rust".to_string()],
        links: vec![],
    };
    client(&server).add_project(&project).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/projects/7")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"project index 7 out of range (1 projects)"}"#)
        .create_async()
        .await;

    let err = client(&server).delete_project(7).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 404);
            assert!(detail.contains("out of range"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/profile")
        .with_status(502)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = client(&server).delete_profile().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_project_query_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("skill".into(), "go".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "projects": [],
                "count": 0,
                "total": 2,
                "page": 2,
                "page_size": 10,
                "total_pages": 1,
                "has_next": false,
                "has_prev": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let query = ProjectQuery {
        skill: Some("go".to_string()),
        page: Some(2),
        page_size: None,
    };
    let page = client(&server).list_projects(&query).await.unwrap();
    assert_eq!(page.total, 2);
    assert!(page.has_prev);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_and_top_skills() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "go".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "query": "go",
                "matches": { "name": false, "skills": ["Go"], "projects": [], "work": [] },
                "total_project_matches": 0,
                "has_more_projects": false
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/skills/top")
        .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"top_skills":[{"skill":"Rust","count":3},{"skill":"Go","count":1}]}"#)
        .create_async()
        .await;

    let client = client(&server);
    let results = client.search(&SearchQuery::new("go")).await.unwrap();
    assert_eq!(results.matches.skills, vec!["Go"]);
    assert!(results.page.is_none());

    let top = client.top_skills(Some(2)).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].skill, "Rust");
    assert_eq!(top[0].count, 3);
}
