use anyhow::Result;
use colored::Colorize;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;

const USER_AGENT: &str = "license-ledgr/0.1.0 (license compliance tool)";

/// Built-in override table for packages whose registry metadata is missing
/// or wrong. Consulted before any network call; a hit is final.
fn known_override(package_id: &str) -> Option<&'static str> {
    match package_id {
        "coverlet.collector" => Some("MIT"),
        "Datadog.Sma" => Some("Apache-2.0"),
        "Microsoft.AspNetCore.Authentication.JwtBearer" => Some("MIT"),
        "Amazon.Lambda.Core" => Some("Apache-2.0"),
        "Amazon.Lambda.SNSEvents" => Some("Apache-2.0"),
        "Amazon.Lambda.SQSEvents" => Some("Apache-2.0"),
        _ => None,
    }
}

/// Resolve the license for a NuGet package, trying in order:
///
/// 1. the built-in override table
/// 2. the flat-container nuspec
/// 3. the registration (catalog) endpoint
/// 4. the legacy v2 search endpoint
///
/// Returns the empty string when every strategy misses or the transport
/// fails; either case is reported as a stderr warning and the caller keeps
/// going with the remaining packages.
pub async fn resolve(client: &Client, package_id: &str, version: &str) -> String {
    if let Some(license) = known_override(package_id) {
        return license.to_string();
    }

    match lookup(client, package_id, version).await {
        Ok(Some(license)) => license,
        Ok(None) => {
            eprintln!(
                "  {} no license found for {} {}",
                "⚠".yellow(),
                package_id,
                version
            );
            String::new()
        }
        Err(err) => {
            eprintln!(
                "  {} could not fetch license for {}: {}",
                "⚠".yellow(),
                package_id,
                err
            );
            String::new()
        }
    }
}

async fn lookup(client: &Client, package_id: &str, version: &str) -> Result<Option<String>> {
    if let Some(license) = from_nuspec(client, package_id, version).await? {
        return Ok(Some(license));
    }
    if let Some(license) = from_registration(client, package_id, version).await? {
        return Ok(Some(license));
    }
    from_v2_search(client, package_id, version).await
}

/// Strategy 1: the package's nuspec from the v3 flat-container endpoint.
async fn from_nuspec(client: &Client, package_id: &str, version: &str) -> Result<Option<String>> {
    let id = package_id.to_lowercase();
    let url = format!(
        "https://api.nuget.org/v3-flatcontainer/{}/{}/{}.nuspec",
        id, version, id
    );

    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let xml = response.text().await?;
    Ok(extract_license_from_nuspec(&xml))
}

/// Strategy 2: the registration (catalog) endpoint, a flat JSON record.
async fn from_registration(
    client: &Client,
    package_id: &str,
    version: &str,
) -> Result<Option<String>> {
    let url = format!(
        "https://api.nuget.org/v3/registration5-semver1/{}/{}.json",
        package_id.to_lowercase(),
        version
    );

    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: serde_json::Value = response.json().await?;
    Ok(license_from_registration(&data))
}

/// Strategy 3: the legacy v2 OData search, filtered by exact id and version.
async fn from_v2_search(client: &Client, package_id: &str, version: &str) -> Result<Option<String>> {
    let url = format!(
        "https://www.nuget.org/api/v2/Packages?$filter=Id%20eq%20%27{}%27%20and%20Version%20eq%20%27{}%27&$format=json",
        package_id, version
    );

    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: serde_json::Value = response.json().await?;
    Ok(license_from_v2_search(&data))
}

/// Extract a license from nuspec XML.
///
/// Prefers a `<license type="expression">` element; falls back to
/// `<licenseUrl>` put through [`spdx_from_license_url`]. Matching on local
/// element names makes this insensitive to the nuspec schema namespace
/// revisions (2010/07 through 2013/05, and none at all).
fn extract_license_from_nuspec(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut in_expression = false;
    let mut in_license_url = false;
    let mut license_url: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                match tag.as_str() {
                    // type="file" license elements carry a path, not an id
                    "license" => {
                        in_expression = e.attributes().flatten().any(|attr| {
                            attr.key.local_name().as_ref() == b"type"
                                && attr
                                    .unescape_value()
                                    .map(|v| v == "expression")
                                    .unwrap_or(false)
                        });
                    }
                    "licenseUrl" => in_license_url = true,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_expression {
                    if let Ok(text) = e.unescape() {
                        return Some(text.to_string());
                    }
                }
                if in_license_url {
                    if let Ok(text) = e.unescape() {
                        license_url = Some(text.to_string());
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let tag =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                match tag.as_str() {
                    "license" => in_expression = false,
                    "licenseUrl" => in_license_url = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    license_url.map(|url| spdx_from_license_url(&url))
}

/// Extract a license from a registration endpoint record.
fn license_from_registration(data: &serde_json::Value) -> Option<String> {
    if let Some(expr) = data
        .get("licenseExpression")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    {
        return Some(expr.to_string());
    }

    data.get("licenseUrl")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(spdx_from_license_url)
}

/// Extract a license from a v2 search response (`d.results[0].LicenseUrl`).
fn license_from_v2_search(data: &serde_json::Value) -> Option<String> {
    data.get("d")
        .and_then(|d| d.get("results"))
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
        .and_then(|entry| entry.get("LicenseUrl"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(spdx_from_license_url)
}

/// Map a license URL to an SPDX identifier by substring, case-insensitive.
///
/// Checks run in fixed priority order; "mit" is tested before "apache", so a
/// URL containing both resolves to MIT. Unrecognized URLs pass through
/// unchanged for a human to review.
pub fn spdx_from_license_url(url: &str) -> String {
    let lower = url.to_lowercase();
    if lower.contains("mit") {
        return "MIT".to_string();
    }
    if lower.contains("apache") && lower.contains("2.0") {
        return "Apache-2.0".to_string();
    }
    if lower.contains("bsd") {
        return "BSD-3-Clause".to_string();
    }
    // Microsoft's own license pages almost always cover MIT-licensed packages
    if lower.contains("mslicense") || lower.contains("microsoft") {
        return "MIT".to_string();
    }
    url.to_string()
}
