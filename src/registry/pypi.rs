use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

#[derive(Debug, Deserialize)]
struct PyPiInfo {
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    license_expression: Option<String>,
    #[serde(default)]
    classifiers: Vec<String>,
}

/// Fetch the license for a Python project from the PyPI JSON API.
///
/// Priority: `license_expression`, then `license` (unless empty or `UNKNOWN`),
/// then the first `License :: ...` trove classifier.
pub async fn fetch_license(
    client: &Client,
    base_url: &str,
    project: &str,
    version: Option<&str>,
) -> Result<Option<String>> {
    let url = match version {
        Some(version) => format!("{}/{}/{}/json", base_url, project, version),
        None => format!("{}/{}/json", base_url, project),
    };

    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: PyPiResponse = response.json().await?;
    Ok(select_license(data.info))
}

fn select_license(info: PyPiInfo) -> Option<String> {
    let non_empty = |s: &String| {
        let t = s.trim();
        !t.is_empty() && !t.eq_ignore_ascii_case("UNKNOWN")
    };

    info.license_expression
        .filter(non_empty)
        .or_else(|| info.license.filter(non_empty))
        .or_else(|| {
            info.classifiers
                .iter()
                .filter(|c| c.starts_with("License :: "))
                .filter_map(|c| c.rsplit(" :: ").next())
                .find(|name| *name != "OSI Approved")
                .map(str::to_string)
        })
}
