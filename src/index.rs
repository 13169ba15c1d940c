use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::compare::sort_newest_first;
use crate::types::VersionRecord;

/// Package files grouped by package name.
///
/// Within a group a path appears at most once: the first record inserted for a path is
/// kept and later ones are dropped.
#[derive(Debug, Default)]
pub struct PackageIndex {
    groups: BTreeMap<String, Vec<VersionRecord>>,
}

/// The outcome for one package name that has more than one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObsoleteGroup {
    pub key: String,
    pub newest: PathBuf,
    /// Superseded files, newest to oldest.
    pub obsolete: Vec<PathBuf>,
}

impl PackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under `key`. Returns `false` if a record with the same path is already
    /// in that group.
    pub fn insert(&mut self, key: String, record: VersionRecord) -> bool {
        let group = self.groups.entry(key).or_default();
        if group.iter().any(|r| r.path == record.path) {
            tracing::debug!("Ignoring duplicate entry {}", record.path.display());
            return false;
        }
        group.push(record);
        true
    }

    pub fn get(&self, key: &str) -> Option<&[VersionRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Package names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of package names.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Pick the newest file of every package and report the rest, ordered by package name.
    pub fn obsolete(self) -> Vec<ObsoleteGroup> {
        self.groups
            .into_iter()
            .filter(|(_, records)| records.len() > 1)
            .map(|(key, mut records)| {
                sort_newest_first(&mut records);
                let mut paths = records.into_iter().map(|r| r.path);
                let newest = paths.next().unwrap_or_default();
                ObsoleteGroup {
                    key,
                    newest,
                    obsolete: paths.collect(),
                }
            })
            .collect()
    }
}

impl Extend<(String, VersionRecord)> for PackageIndex {
    fn extend<I: IntoIterator<Item = (String, VersionRecord)>>(&mut self, iter: I) {
        for (key, record) in iter {
            self.insert(key, record);
        }
    }
}

impl FromIterator<(String, VersionRecord)> for PackageIndex {
    fn from_iter<I: IntoIterator<Item = (String, VersionRecord)>>(iter: I) -> Self {
        let mut index = PackageIndex::new();
        index.extend(iter);
        index
    }
}
