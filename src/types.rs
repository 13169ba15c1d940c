use std::fmt;
use std::path::PathBuf;

/// The version part of a port package filename: `1.2.3_4,5` is segments `["1", "2", "3"]`,
/// `PORTREVISION` 4 and `PORTEPOCH` 5.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortVersion {
    /// Dot-delimited version components. Never empty for a parsed version.
    pub segments: Vec<String>,
    pub revision: u64,
    pub epoch: u64,
}

impl fmt::Display for PortVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))?;
        if self.revision > 0 {
            write!(f, "_{}", self.revision)?;
        }
        if self.epoch > 0 {
            write!(f, ",{}", self.epoch)?;
        }
        Ok(())
    }
}

/// One package file on disk together with its parsed version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionRecord {
    /// Cleaned path of the file, unique within a package group.
    pub path: PathBuf,
    pub version: PortVersion,
}

/// Outcome of splitting a filename into package name and version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decomposition {
    Decomposed { key: String, record: VersionRecord },
    NotAVersion,
}

impl Decomposition {
    pub fn into_parts(self) -> Option<(String, VersionRecord)> {
        match self {
            Decomposition::Decomposed { key, record } => Some((key, record)),
            Decomposition::NotAVersion => None,
        }
    }
}
