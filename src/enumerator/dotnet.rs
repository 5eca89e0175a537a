use std::collections::HashSet;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};

use crate::models::{PackageRecord, PackageSource};

/// Enumerator for .NET workspaces, backed by `dotnet list package`.
///
/// Only top-level (explicitly declared) packages are listed. Auto-referenced
/// packages are platform injections outside the scope of a manual license
/// audit and are dropped. Packages are deduplicated by `(id, resolvedVersion)`
/// across every project and target framework; first occurrence wins.
pub struct DotNetEnumerator;

impl DotNetEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl super::Enumerator for DotNetEnumerator {
    fn enumerate(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        let output = Command::new("dotnet")
            .args(["list", "package", "--format", "json"])
            .current_dir(path)
            .output()
            .with_context(|| format!("failed to run dotnet list package in {}", path.display()))?;

        if !output.status.success() {
            bail!(
                "dotnet list package failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let listing: ListPackagesOutput = serde_json::from_str(&stdout)
            .context("could not parse dotnet list package output")?;

        Ok(collect_packages(listing))
    }
}

fn collect_packages(listing: ListPackagesOutput) -> Vec<PackageRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for project in listing.projects {
        for framework in project.frameworks {
            for package in framework.top_level_packages {
                if package.auto_referenced {
                    continue;
                }
                let key = format!("{}:{}", package.id, package.resolved_version);
                if seen.insert(key) {
                    records.push(PackageRecord {
                        name: package.id,
                        version: package.resolved_version,
                        source: PackageSource::NuGet,
                        license_raw: None,
                    });
                }
            }
        }
    }

    records
}

#[derive(Debug, Deserialize)]
struct ListPackagesOutput {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct Project {
    #[serde(default)]
    frameworks: Vec<Framework>,
}

#[derive(Debug, Deserialize)]
struct Framework {
    #[serde(rename = "topLevelPackages", default)]
    top_level_packages: Vec<TopLevelPackage>,
}

#[derive(Debug, Deserialize)]
struct TopLevelPackage {
    id: String,
    #[serde(rename = "resolvedVersion", default)]
    resolved_version: String,
    #[serde(rename = "autoReferenced", default, deserialize_with = "de_flag")]
    auto_referenced: bool,
}

/// `autoReferenced` has been emitted as both a JSON bool and the string
/// `"true"` across SDK versions; accept either.
fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Str(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Str(s) => s.eq_ignore_ascii_case("true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<PackageRecord> {
        collect_packages(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_dedup_across_frameworks_and_auto_referenced_filter() {
        // Two target frameworks, each declaring PackageA explicitly and
        // PackageB auto-referenced: exactly one PackageA record survives.
        let json = r#"{
  "version": 1,
  "projects": [
    {
      "path": "src/App/App.csproj",
      "frameworks": [
        {
          "framework": "net6.0",
          "topLevelPackages": [
            { "id": "PackageA", "requestedVersion": "1.0.0", "resolvedVersion": "1.0.0" },
            { "id": "PackageB", "resolvedVersion": "2.0.0", "autoReferenced": true }
          ]
        },
        {
          "framework": "net7.0",
          "topLevelPackages": [
            { "id": "PackageA", "requestedVersion": "1.0.0", "resolvedVersion": "1.0.0" },
            { "id": "PackageB", "resolvedVersion": "2.0.0", "autoReferenced": true }
          ]
        }
      ]
    }
  ]
}"#;
        let records = parse(json);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "PackageA");
        assert_eq!(records[0].version, "1.0.0");
        assert_eq!(records[0].origin(), "nuget:PackageA:1.0.0");
    }

    #[test]
    fn test_dedup_across_projects_first_wins() {
        let json = r#"{
  "projects": [
    { "frameworks": [ { "topLevelPackages": [
        { "id": "Shared.Lib", "resolvedVersion": "3.1.0" } ] } ] },
    { "frameworks": [ { "topLevelPackages": [
        { "id": "Shared.Lib", "resolvedVersion": "3.1.0" },
        { "id": "Shared.Lib", "resolvedVersion": "4.0.0" } ] } ] }
  ]
}"#;
        let records = parse(json);
        // Same id at a different resolved version is a distinct package
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].version, "3.1.0");
        assert_eq!(records[1].version, "4.0.0");
    }

    #[test]
    fn test_auto_referenced_as_string() {
        let json = r#"{
  "projects": [ { "frameworks": [ { "topLevelPackages": [
    { "id": "Microsoft.NETCore.App", "resolvedVersion": "2.2.8", "autoReferenced": "true" },
    { "id": "Serilog", "resolvedVersion": "2.12.0", "autoReferenced": "false" }
  ] } ] } ]
}"#;
        let records = parse(json);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Serilog");
    }

    #[test]
    fn test_projects_without_packages() {
        let records = parse(r#"{ "version": 1, "projects": [ { "path": "a.csproj" } ] }"#);
        assert!(records.is_empty());
    }
}
