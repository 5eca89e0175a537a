use std::path::Path;

use anyhow::Result;

use crate::models::PackageRecord;

pub mod dotnet;
pub mod maven;

/// Produces the deduplicated package list for a workspace.
///
/// Enumeration failures are fatal to the run: a workspace that cannot be
/// listed must not contribute partial ledger rows.
pub trait Enumerator {
    fn enumerate(&self, path: &Path) -> Result<Vec<PackageRecord>>;
}
