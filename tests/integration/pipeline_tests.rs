use jobwatch::config::{Category, Config, OutputConfig, ProviderConfig, RunnerConfig};
use jobwatch::runner::{run_pipeline, CategoryError};
use jobwatch::{FetchError, JobwatchError};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "jobwatch-test/1.0";

/// Creates a test configuration pointed at the mock server
fn create_test_config(server: &MockServer, categories: Vec<Category>, snapshot: &Path) -> Config {
    Config {
        provider: ProviderConfig {
            base_url: format!("{}/jobs", server.uri()),
            acquire_timeout_secs: 1,
            content_wait_secs: 1,
            user_agent: TEST_USER_AGENT.to_string(),
            ..ProviderConfig::default()
        },
        runner: RunnerConfig { rate_limit_ms: 0 },
        output: OutputConfig {
            snapshot_path: snapshot.to_path_buf(),
        },
        categories,
        ..Config::default()
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, query: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", query))
        .respond_with(template)
        .mount(server)
        .await;
}

fn read_artifact(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("Snapshot should exist");
    serde_json::from_str(&content).expect("Snapshot should be valid JSON")
}

/// Category keys in the order they appear in the written file
fn category_names(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path).unwrap();
    let artifact: Value = serde_json::from_str(&content).unwrap();
    let mut names: Vec<String> = artifact["categories"]
        .as_object()
        .expect("categories should be an object")
        .keys()
        .cloned()
        .collect();
    names.sort_by_key(|name| content.find(&format!("\"{}\": {{", name)));
    names
}

#[tokio::test]
async fn test_full_run_writes_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "software engineer OR developer"))
        .and(query_param("l", "us"))
        .and(query_param("fromage", "3"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(html(r#"<div id="searchCount">Page 1 of 1,234 jobs</div>"#))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "cashier", html("<p>500 jobs</p>")).await;
    mount_page(&server, "nurse", ResponseTemplate::new(503)).await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("data").join("job_trends.json");
    let config = create_test_config(
        &server,
        vec![
            Category::new("tech", &["software engineer", "developer"]),
            Category::new("retail", &["cashier"]),
            Category::new("healthcare", &["nurse"]),
        ],
        &snapshot_path,
    );

    let snapshot = run_pipeline(&config).await.expect("Run should succeed");

    assert_eq!(snapshot.total_count, 1734);
    assert_eq!(snapshot.health_score, 0);
    assert_eq!(
        snapshot.result("healthcare").unwrap().outcome,
        Err(CategoryError::Fetch(FetchError::Status(503)))
    );

    let artifact = read_artifact(&snapshot_path);
    assert_eq!(category_names(&snapshot_path), vec!["tech", "retail", "healthcare"]);
    assert_eq!(artifact["totalJobs"], 1734);
    assert_eq!(artifact["healthScore"], 0);
    assert_eq!(
        artifact["categories"]["tech"]["keywords"],
        "software engineer OR developer"
    );
    assert_eq!(artifact["categories"]["tech"]["count"], 1234);
    assert_eq!(artifact["categories"]["retail"]["count"], 500);
    assert_eq!(artifact["categories"]["healthcare"]["count"], 0);
}

#[tokio::test]
async fn test_timed_out_category_does_not_block_others() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "alpha",
        html("<p>9,999 jobs</p>").set_delay(Duration::from_secs(5)),
    )
    .await;
    mount_page(&server, "beta", html(r#"<div id="searchCount">500 jobs</div>"#)).await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("job_trends.json");
    let config = create_test_config(
        &server,
        vec![Category::new("A", &["alpha"]), Category::new("B", &["beta"])],
        &snapshot_path,
    );

    let snapshot = run_pipeline(&config).await.expect("Run should succeed");

    assert!(matches!(
        snapshot.result("A").unwrap().outcome,
        Err(CategoryError::Fetch(FetchError::Timeout { .. }))
    ));

    let artifact = read_artifact(&snapshot_path);
    assert_eq!(artifact["categories"]["A"]["count"], 0);
    assert_eq!(artifact["categories"]["B"]["count"], 500);
    assert_eq!(artifact["totalJobs"], 500);
}

#[tokio::test]
async fn test_all_categories_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("job_trends.json");
    let config = create_test_config(
        &server,
        vec![Category::new("a", &["alpha"]), Category::new("b", &["beta"])],
        &snapshot_path,
    );

    run_pipeline(&config).await.expect("Run should succeed");

    let artifact = read_artifact(&snapshot_path);
    assert_eq!(category_names(&snapshot_path), vec!["a", "b"]);
    assert_eq!(artifact["totalJobs"], 0);
    assert_eq!(artifact["healthScore"], 50);
}

#[tokio::test]
async fn test_rerun_is_deterministic_apart_from_timestamps() {
    let server = MockServer::start().await;

    mount_page(&server, "alpha", html("<p>Page 1 of 250,000 jobs</p>")).await;
    mount_page(&server, "beta", html(r#"<span class="mat-text">250,000 jobs</span>"#)).await;
    mount_page(&server, "gamma", html("<p>Please verify you are human</p>")).await;

    let dir = tempfile::tempdir().unwrap();
    let categories = vec![
        Category::new("a", &["alpha"]),
        Category::new("b", &["beta"]),
        Category::new("c", &["gamma"]),
    ];

    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");
    run_pipeline(&create_test_config(&server, categories.clone(), &first_path))
        .await
        .unwrap();
    run_pipeline(&create_test_config(&server, categories, &second_path))
        .await
        .unwrap();

    let timestamps = Regex::new(r#""timestamp": "[^"]*""#).unwrap();
    let mask = |path: &Path| {
        let content = std::fs::read_to_string(path).unwrap();
        timestamps
            .replace_all(&content, r#""timestamp": "-""#)
            .into_owned()
    };

    let first = mask(&first_path);
    assert_eq!(first, mask(&second_path));
    assert_eq!(read_artifact(&first_path)["healthScore"], 50);
}

#[tokio::test]
async fn test_persistence_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_page(&server, "alpha", html("<p>10 jobs</p>")).await;

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let config = create_test_config(
        &server,
        vec![Category::new("a", &["alpha"])],
        &blocker.join("job_trends.json"),
    );

    let result = run_pipeline(&config).await;
    assert!(matches!(result, Err(JobwatchError::Persistence(_))));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_snapshot_path_need_not_be_utf8() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let server = MockServer::start().await;
    mount_page(&server, "alpha", html("<p>10 jobs</p>")).await;

    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir
        .path()
        .join(OsStr::from_bytes(b"trends-\xff"))
        .join("job_trends.json");
    let config = create_test_config(&server, vec![Category::new("a", &["alpha"])], &snapshot_path);

    run_pipeline(&config).await.expect("Run should succeed");

    assert_eq!(read_artifact(&snapshot_path)["totalJobs"], 10);
}
