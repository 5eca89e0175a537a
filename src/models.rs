use serde::{Deserialize, Serialize};

/// A dependency discovered by an enumerator, before license resolution.
///
/// `name` is the NuGet package id, or `group:artifact` for Maven coordinates.
/// `license_raw` is populated when the enumerator's input already carries a
/// license name (the Maven report does); `None` means the registry resolver
/// has to look it up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub source: PackageSource,
    pub license_raw: Option<String>,
}

impl PackageRecord {
    /// Ecosystem-prefixed origin descriptor as recorded in the ledger.
    pub fn origin(&self) -> String {
        match self.source {
            PackageSource::NuGet => format!("nuget:{}:{}", self.name, self.version),
            PackageSource::Maven => format!("maven:{}:jar:{}", self.name, self.version),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PackageSource {
    NuGet,
    Maven,
}

impl std::fmt::Display for PackageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageSource::NuGet => write!(f, "nuget"),
            PackageSource::Maven => write!(f, "maven"),
        }
    }
}

/// One row of the `LICENSE-3rdparty.csv` ledger. Immutable once built.
///
/// `copyright` is carried for column compatibility and is always empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub component: String,
    pub origin: String,
    pub license: String,
    pub copyright: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nuget_origin() {
        let record = PackageRecord {
            name: "Newtonsoft.Json".to_string(),
            version: "13.0.1".to_string(),
            source: PackageSource::NuGet,
            license_raw: None,
        };
        assert_eq!(record.origin(), "nuget:Newtonsoft.Json:13.0.1");
    }

    #[test]
    fn test_maven_origin_keeps_jar_packaging() {
        let record = PackageRecord {
            name: "org.apache.commons:commons-lang3".to_string(),
            version: "3.12.0".to_string(),
            source: PackageSource::Maven,
            license_raw: Some("Apache License, Version 2.0".to_string()),
        };
        assert_eq!(
            record.origin(),
            "maven:org.apache.commons:commons-lang3:jar:3.12.0"
        );
    }
}
