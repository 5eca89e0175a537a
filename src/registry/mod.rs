//! License resolution against upstream package registries.
//!
//! [`nuget`] exposes `resolve(client, package_id, version)` returning the
//! resolved license string, or the empty string when every lookup strategy
//! misses. Resolution failures are warnings, never errors: one package with
//! missing metadata must not abort a run.

pub mod nuget;
