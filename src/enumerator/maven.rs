use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::{PackageRecord, PackageSource};

/// Relative path the maven-license-plugin writes its report to.
const REPORT_RELATIVE_PATH: &str = "target/generated-sources/license/licenses.xml";

/// Enumerator for Maven projects, backed by a generated `licenses.xml` report.
///
/// The report already carries license names, so these records skip registry
/// resolution. Dependencies are deduplicated by `(group:artifact, version)`,
/// first occurrence wins. Entries missing any coordinate are skipped.
pub struct MavenEnumerator {
    report: Option<PathBuf>,
}

impl MavenEnumerator {
    /// `report` overrides the fixed relative report path when given.
    pub fn new(report: Option<PathBuf>) -> Self {
        Self { report }
    }
}

impl super::Enumerator for MavenEnumerator {
    fn enumerate(&self, path: &Path) -> Result<Vec<PackageRecord>> {
        let report_path = self
            .report
            .clone()
            .unwrap_or_else(|| path.join(REPORT_RELATIVE_PATH));

        let content = std::fs::read_to_string(&report_path).with_context(|| {
            format!("could not read license report {}", report_path.display())
        })?;

        let mut records = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for record in parse_license_report(&content)? {
            let key = format!("{}:{}", record.name, record.version);
            if seen.insert(key) {
                records.push(record);
            }
        }

        Ok(records)
    }
}

/// Parse a maven-license-plugin report: `<dependency>` elements carrying
/// `groupId` / `artifactId` / `version` and `licenses/license/name`.
/// Only the first license name of a dependency is kept.
fn parse_license_report(xml: &str) -> Result<Vec<PackageRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();

    let mut in_dependency = false;
    let mut in_licenses = false;
    let mut current_tag = String::new();
    let mut group_id = String::new();
    let mut artifact_id = String::new();
    let mut version = String::new();
    let mut license_name = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                current_tag = tag.clone();

                match tag.as_str() {
                    "dependency" => {
                        in_dependency = true;
                        group_id.clear();
                        artifact_id.clear();
                        version.clear();
                        license_name.clear();
                    }
                    "licenses" if in_dependency => in_licenses = true,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) if in_dependency => {
                let text = e.unescape().unwrap_or_default();
                match current_tag.as_str() {
                    "groupId" if !in_licenses => group_id = text.to_string(),
                    "artifactId" if !in_licenses => artifact_id = text.to_string(),
                    "version" if !in_licenses => version = text.to_string(),
                    "name" if in_licenses && license_name.is_empty() => {
                        license_name = text.to_string();
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let tag =
                    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                match tag.as_str() {
                    "dependency" if in_dependency => {
                        if !group_id.is_empty() && !artifact_id.is_empty() && !version.is_empty() {
                            records.push(PackageRecord {
                                name: format!("{}:{}", group_id, artifact_id),
                                version: version.clone(),
                                source: PackageSource::Maven,
                                license_raw: Some(license_name.clone()),
                            });
                        }
                        in_dependency = false;
                    }
                    "licenses" => in_licenses = false,
                    _ => {}
                }
                current_tag.clear();
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("malformed license report XML"),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::super::Enumerator;
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<licenseSummary>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>3.12.0</version>
      <licenses>
        <license>
          <name>Apache License, Version 2.0</name>
          <url>https://www.apache.org/licenses/LICENSE-2.0.txt</url>
        </license>
      </licenses>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <licenses>
        <license>
          <name>Eclipse Public License 1.0</name>
        </license>
        <license>
          <name>Common Public License Version 1.0</name>
        </license>
      </licenses>
    </dependency>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>no-license</artifactId>
      <version>0.1.0</version>
      <licenses/>
    </dependency>
  </dependencies>
</licenseSummary>"#;

    #[test]
    fn test_parse_license_report() {
        let records = parse_license_report(REPORT).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, "org.apache.commons:commons-lang3");
        assert_eq!(records[0].version, "3.12.0");
        assert_eq!(
            records[0].license_raw.as_deref(),
            Some("Apache License, Version 2.0")
        );

        // Only the first of several license names is kept
        assert_eq!(
            records[1].license_raw.as_deref(),
            Some("Eclipse Public License 1.0")
        );

        // A dependency without licenses still yields a record, license empty
        assert_eq!(records[2].license_raw.as_deref(), Some(""));
    }

    #[test]
    fn test_incomplete_coordinates_skipped() {
        let xml = r#"<licenseSummary><dependencies>
  <dependency>
    <groupId>com.example</groupId>
    <artifactId>versionless</artifactId>
  </dependency>
</dependencies></licenseSummary>"#;
        let records = parse_license_report(xml).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_enumerate_report_override_and_dedup() {
        let xml = r#"<licenseSummary><dependencies>
  <dependency>
    <groupId>g</groupId><artifactId>a</artifactId><version>1.0</version>
    <licenses><license><name>MIT License</name></license></licenses>
  </dependency>
  <dependency>
    <groupId>g</groupId><artifactId>a</artifactId><version>1.0</version>
    <licenses><license><name>MIT License</name></license></licenses>
  </dependency>
</dependencies></licenseSummary>"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", xml).unwrap();

        let enumerator = MavenEnumerator::new(Some(f.path().to_path_buf()));
        let records = enumerator.enumerate(Path::new(".")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin(), "maven:g:a:jar:1.0");
    }

    #[test]
    fn test_missing_report_is_fatal() {
        let enumerator = MavenEnumerator::new(None);
        assert!(enumerator.enumerate(Path::new("/nonexistent")).is_err());
    }
}
