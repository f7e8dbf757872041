use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RegistryConfig;

/// How many `<parent>` POMs to follow when an artifact declares no license itself.
const MAX_PARENT_DEPTH: usize = 3;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
}

/// License section of a POM, plus its parent for inherited licenses.
#[derive(Debug, Default, PartialEq)]
struct PomLicense {
    license: Option<String>,
    parent: Option<(String, String, String)>,
}

/// Fetch the license for a Maven artifact from Maven Central.
///
/// Without a declared version the latest one is looked up with the search API first.
/// The artifact POM's first `<license><name>` wins; if it has none, the parent
/// POM chain is followed.
pub async fn fetch_license(
    client: &Client,
    config: &RegistryConfig,
    group_id: &str,
    artifact_id: &str,
    version: Option<&str>,
) -> Result<Option<String>> {
    let version = match version {
        Some(v) => v.to_string(),
        None => match latest_version(client, &config.maven_search_url, group_id, artifact_id).await? {
            Some(v) => v,
            None => return Ok(None),
        },
    };

    let mut coords = (group_id.to_string(), artifact_id.to_string(), version);
    for _ in 0..=MAX_PARENT_DEPTH {
        let Some(pom_xml) = fetch_pom(client, &config.maven_repo_url, &coords).await? else {
            return Ok(None);
        };
        let pom = extract_license_from_pom(&pom_xml);
        if pom.license.is_some() {
            return Ok(pom.license);
        }
        match pom.parent {
            Some(parent) => {
                debug!(
                    "{}:{} declares no license, trying parent {}:{}:{}",
                    coords.0, coords.1, parent.0, parent.1, parent.2
                );
                coords = parent;
            }
            None => return Ok(None),
        }
    }

    Ok(None)
}

/// Latest released version of `group:artifact` according to the Maven Central search API.
async fn latest_version(
    client: &Client,
    search_url: &str,
    group_id: &str,
    artifact_id: &str,
) -> Result<Option<String>> {
    let query = format!("g:\"{}\" AND a:\"{}\"", group_id, artifact_id);
    let response = client
        .get(search_url)
        .query(&[("q", query.as_str()), ("rows", "1"), ("wt", "json")])
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: SearchResponse = response.json().await?;
    Ok(data
        .response
        .docs
        .into_iter()
        .next()
        .and_then(|d| d.latest_version))
}

async fn fetch_pom(
    client: &Client,
    repo_url: &str,
    (group_id, artifact_id, version): &(String, String, String),
) -> Result<Option<String>> {
    let group_path = group_id.replace('.', "/");
    let pom_url = format!(
        "{}/{}/{}/{}/{}-{}.pom",
        repo_url, group_path, artifact_id, version, artifact_id, version
    );

    let response = client.get(&pom_url).send().await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    Ok(Some(response.text().await?))
}

/// Extract the first `<license><name>` and the `<parent>` coordinates from a POM.
fn extract_license_from_pom(xml: &str) -> PomLicense {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut result = PomLicense::default();
    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut parent = (String::new(), String::new(), String::new());

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                path.push(tag);
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().trim().to_string();
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    [_, "licenses", "license", "name"] if result.license.is_none() => {
                        result.license = Some(text);
                    }
                    [_, "parent", "groupId"] => parent.0 = text,
                    [_, "parent", "artifactId"] => parent.1 = text,
                    [_, "parent", "version"] => parent.2 = text,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    if !parent.0.is_empty() && !parent.1.is_empty() && !parent.2.is_empty() {
        result.parent = Some(parent);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::Server) -> RegistryConfig {
        RegistryConfig {
            maven_search_url: format!("{}/solrsearch/select", server.url()),
            maven_repo_url: format!("{}/maven2", server.url()),
            ..RegistryConfig::default()
        }
    }

    #[test]
    fn test_extract_license_from_pom() {
        let pom = r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <licenses>
    <license>
      <name>Apache License, Version 2.0</name>
      <url>https://www.apache.org/licenses/LICENSE-2.0</url>
    </license>
    <license>
      <name>MIT</name>
    </license>
  </licenses>
</project>"#;
        let info = extract_license_from_pom(pom);
        assert_eq!(info.license, Some("Apache License, Version 2.0".to_string()));
        assert_eq!(info.parent, None);
    }

    #[test]
    fn test_extract_parent_when_no_license() {
        let pom = r#"<project>
  <parent>
    <groupId>org.apache.commons</groupId>
    <artifactId>commons-parent</artifactId>
    <version>52</version>
  </parent>
  <name>ignored project name</name>
</project>"#;
        let info = extract_license_from_pom(pom);
        assert_eq!(info.license, None);
        assert_eq!(
            info.parent,
            Some((
                "org.apache.commons".to_string(),
                "commons-parent".to_string(),
                "52".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_fetch_with_declared_version() {
        let mut server = mockito::Server::new_async().await;
        let pom = server
            .mock("GET", "/maven2/com/google/code/gson/gson/2.10.1/gson-2.10.1.pom")
            .with_status(200)
            .with_body(
                "<project><licenses><license><name>Apache-2.0</name></license></licenses></project>",
            )
            .create_async()
            .await;

        let client = Client::new();
        let license = fetch_license(
            &client,
            &config_for(&server),
            "com.google.code.gson",
            "gson",
            Some("2.10.1"),
        )
        .await
        .unwrap();
        assert_eq!(license, Some("Apache-2.0".to_string()));
        pom.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_latest_then_parent() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::UrlEncoded(
                "q".into(),
                "g:\"org.apache.commons\" AND a:\"commons-lang3\"".into(),
            ))
            .with_status(200)
            .with_body(r#"{"response": {"numFound": 1, "docs": [{"latestVersion": "3.14.0"}]}}"#)
            .create_async()
            .await;
        let child = server
            .mock(
                "GET",
                "/maven2/org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.pom",
            )
            .with_status(200)
            .with_body(
                "<project><parent><groupId>org.apache.commons</groupId>\
                 <artifactId>commons-parent</artifactId><version>64</version></parent></project>",
            )
            .create_async()
            .await;
        let parent = server
            .mock(
                "GET",
                "/maven2/org/apache/commons/commons-parent/64/commons-parent-64.pom",
            )
            .with_status(200)
            .with_body(
                "<project><licenses><license><name>Apache License, Version 2.0</name>\
                 </license></licenses></project>",
            )
            .create_async()
            .await;

        let client = Client::new();
        let license = fetch_license(
            &client,
            &config_for(&server),
            "org.apache.commons",
            "commons-lang3",
            None,
        )
        .await
        .unwrap();
        assert_eq!(license, Some("Apache License, Version 2.0".to_string()));
        search.assert_async().await;
        child.assert_async().await;
        parent.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_artifact() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"response": {"numFound": 0, "docs": []}}"#)
            .create_async()
            .await;

        let client = Client::new();
        let license = fetch_license(&client, &config_for(&server), "org.unknown", "lib", None)
            .await
            .unwrap();
        assert_eq!(license, None);
    }
}
