//! Type definitions for update checks

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PackageError;

/// One package as reported by a package listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name
    pub name: String,
    /// Upstream version
    pub version: String,
    /// Distribution release
    pub release: String,
    /// Package architecture
    pub arch: String,
}

impl PackageRecord {
    /// Create a new package record
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            release: release.into(),
            arch: arch.into(),
        }
    }

    /// Identity used to match installed and available entries (`name.arch`)
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.name, self.arch)
    }
}

/// Parses a `name|version|release|arch` line.
///
/// Fields past the fourth are ignored.
impl FromStr for PackageRecord {
    type Err = PackageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split('|');
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(version), Some(release), Some(arch)) => {
                Ok(Self::new(name, version, release, arch))
            }
            _ => Err(PackageError::MalformedEntry(line.to_string())),
        }
    }
}

/// Requested package names not yet found in the installed listing
///
/// Keeps the caller's order. Each match removes a single occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutstandingSet {
    names: Vec<String>,
}

impl OutstandingSet {
    /// Create from the requested names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Remove the first occurrence of `name`, returning whether it was outstanding
    pub fn take(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.names.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Remaining names in their residual order
    #[must_use]
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Installed packages keyed by `name.arch`, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
    records: Vec<PackageRecord>,
}

impl InstalledPackages {
    /// Add a record, replacing any earlier record with the same key in place
    pub fn insert(&mut self, record: PackageRecord) {
        let key = record.key();
        match self.records.iter_mut().find(|r| r.key() == key) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PackageRecord> {
        self.records.iter().find(|r| r.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.records.iter()
    }

    /// Keys in listing order
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(PackageRecord::key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Packages offered by the repositories, keyed by `name.arch`
pub type AvailablePackages = HashMap<String, PackageRecord>;

/// Current and newer version of one installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Package key (`name.arch`)
    pub name: String,
    /// Installed version
    pub current_version: String,
    /// Installed release
    pub current_release: String,
    /// Version offered by the repositories, if any
    pub new_version: Option<String>,
    /// Release offered by the repositories, if any
    pub new_release: Option<String>,
}

impl UpdateResult {
    /// Whether the repositories offer a version for this package
    #[must_use]
    pub fn has_update(&self) -> bool {
        self.new_version.is_some()
    }
}

/// Outcome of a successful check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Always false; a check never modifies the host
    pub changed: bool,
    /// One entry per requested installed package
    pub outdated_pkgs: Vec<UpdateResult>,
}

impl CheckReport {
    pub fn new(outdated_pkgs: Vec<UpdateResult>) -> Self {
        Self {
            changed: false,
            outdated_pkgs,
        }
    }

    /// Entries that have a newer version available
    pub fn updates(&self) -> impl Iterator<Item = &UpdateResult> {
        self.outdated_pkgs.iter().filter(|r| r.has_update())
    }
}
