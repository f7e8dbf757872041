//! End-to-end scans through the library API against a mocked registry.

use std::io::Write;

use license_rater::config::RegistryConfig;
use license_rater::{check_licenses, Config, Rating, ScanError};
use mockito::Matcher;

fn source_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn config_for(server: &mockito::Server) -> Config {
    Config {
        registry: RegistryConfig {
            pypi_url: format!("{}/pypi", server.url()),
            maven_search_url: format!("{}/solrsearch/select", server.url()),
            maven_repo_url: format!("{}/maven2", server.url()),
            timeout_secs: 5,
            offline: false,
        },
        ..Config::default()
    }
}

#[tokio::test]
async fn test_python_import_rated_trusted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/pypi/flask/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"info": {"license": "BSD-3-Clause", "classifiers": []}}"#)
        .create_async()
        .await;

    let file = source_file(".py", "import flask\n");
    let records = check_licenses(file.path(), &config_for(&server))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "flask");
    assert_eq!(records[0].license, "BSD-3-Clause");
    assert_eq!(records[0].rating, Rating::Trusted);
}

#[tokio::test]
async fn test_python_mixed_tiers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/pypi/gensim/json")
        .with_status(200)
        .with_body(r#"{"info": {"license": "LGPL-2.1-only"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/pypi/pyqt5/json")
        .with_status(200)
        .with_body(r#"{"info": {"license": "GPL v3"}}"#)
        .create_async()
        .await;

    let file = source_file(".py", "import gensim\nimport os\nimport pyqt5\n");
    let records = check_licenses(file.path(), &config_for(&server))
        .await
        .unwrap();

    let rating_of = |name: &str| {
        records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.rating)
            .unwrap()
    };
    assert_eq!(rating_of("gensim"), Rating::Caution);
    assert_eq!(rating_of("os"), Rating::Trusted);
    assert_eq!(rating_of("pyqt5"), Rating::Risky);
}

#[tokio::test]
async fn test_pom_unknown_artifact_is_risky() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/solrsearch/select")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response": {"numFound": 0, "docs": []}}"#)
        .create_async()
        .await;

    let pom = r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.unknown</groupId>
      <artifactId>lib</artifactId>
    </dependency>
  </dependencies>
</project>"#;
    let file = source_file(".xml", pom);
    let records = check_licenses(file.path(), &config_for(&server))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "lib");
    assert_eq!(records[0].license, "Unknown");
    assert_eq!(records[0].rating, Rating::Risky);
}

#[tokio::test]
async fn test_registry_failure_is_not_fatal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/pypi/requests/2.28.1/json")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/pypi/flask/json")
        .with_status(200)
        .with_body(r#"{"info": {"license": "BSD-3-Clause"}}"#)
        .create_async()
        .await;

    let file = tempfile::Builder::new()
        .prefix("requirements")
        .suffix(".txt")
        .tempfile()
        .unwrap();
    std::fs::write(file.path(), "requests==2.28.1\nflask\n").unwrap();

    let records = check_licenses(file.path(), &config_for(&server))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "requests");
    assert_eq!(records[0].version.as_deref(), Some("2.28.1"));
    assert_eq!(records[0].rating, Rating::Risky);
    assert_eq!(records[1].name, "flask");
    assert_eq!(records[1].rating, Rating::Trusted);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let file = source_file(".gradle", "implementation 'x:y:1'\n");
    let err = check_licenses(file.path(), &Config::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::UnsupportedFileType(_)));
    assert_eq!(err.exit_code(), 2);
}
