use glr::gitlab::{ApiError, CreateReleaseOptions, GitLabApi, GitLabClient, NewReleaseLink};
use glr::Config;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, GitLabClient) {
    let server = MockServer::start().await;
    let config = Config {
        web_url: server.uri(),
        api_url: format!("{}/api/v4", server.uri()),
        token: Some("secret-token".to_string()),
    };
    let client = GitLabClient::new(&config).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_get_project_encodes_path_and_sends_token() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/shiimaxx%2Fglr-demo"))
        .and(header("private-token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 18630472,
            "name": "glr-demo",
            "path_with_namespace": "shiimaxx/glr-demo"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (project, status) = client.get_project("shiimaxx/glr-demo").await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(project.id, 18630472);
    assert_eq!(project.name, "glr-demo");
}

#[tokio::test]
async fn test_get_project_not_found() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "404 Project Not Found"
        })))
        .mount(&server)
        .await;

    let err = client.get_project("owner/missing").await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_upload_file_sends_multipart() {
    let (server, client) = setup().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("glr-demo_v1.2.3_linux_amd64");
    std::fs::write(&file, b"binary-content").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/uploads"))
        .and(body_string_contains(
            "filename=\"glr-demo_v1.2.3_linux_amd64\"",
        ))
        .and(body_string_contains("binary-content"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "alt": "glr-demo_v1.2.3_linux_amd64",
            "url": "/uploads/66dbcd21ec5d24ed6ea225176098d52b/glr-demo_v1.2.3_linux_amd64",
            "markdown": "[glr-demo_v1.2.3_linux_amd64](/uploads/66dbcd21ec5d24ed6ea225176098d52b/glr-demo_v1.2.3_linux_amd64)"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = client.upload_file(7, &file).await.unwrap();

    assert_eq!(uploaded.alt, "glr-demo_v1.2.3_linux_amd64");
    assert!(uploaded.url.starts_with("/uploads/"));
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let (_server, client) = setup().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .upload_file(7, &dir.path().join("absent"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Io { .. }));
}

#[tokio::test]
async fn test_get_release_reads_links() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/releases/v1.2.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v1.2.3",
            "name": "v1.2.3",
            "description": "notes",
            "assets": {
                "count": 2,
                "sources": [],
                "links": [
                    {"id": 1, "name": "a", "url": "https://x/a", "external": true},
                    {"id": 2, "name": "b", "url": "https://x/b", "external": true}
                ]
            }
        })))
        .mount(&server)
        .await;

    let release = client.get_release(7, "v1.2.3").await.unwrap();

    let ids: Vec<u64> = release.assets.links.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_create_release_posts_all_links_at_once() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/releases"))
        .and(body_json(json!({
            "name": "Title",
            "tag_name": "v1.2.3",
            "description": "Body",
            "assets": {"links": [{"name": "bin", "url": "http://x/bin"}]}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "tag_name": "v1.2.3",
            "name": "Title",
            "description": "Body"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateReleaseOptions::new(
        "Title",
        "v1.2.3",
        "Body",
        vec![NewReleaseLink {
            name: "bin".to_string(),
            url: "http://x/bin".to_string(),
        }],
    );
    let release = client.create_release(7, &options).await.unwrap();

    assert_eq!(release.tag_name, "v1.2.3");
}

#[tokio::test]
async fn test_create_release_conflict_reports_message() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/projects/7/releases"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Release already exists"
        })))
        .mount(&server)
        .await;

    let options = CreateReleaseOptions::new("v1", "v1", "v1", Vec::new());
    let err = client.create_release(7, &options).await.unwrap_err();

    match err {
        ApiError::Status {
            status, message, ..
        } => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(message, "Release already exists");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_delete_link_and_release() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/7/releases/v1.2.3/assets/links/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "a", "url": "https://x/a"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/7/releases/v1.2.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v1.2.3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_release_link(7, "v1.2.3", 42).await.unwrap();
    client.delete_release(7, "v1.2.3").await.unwrap();
}
