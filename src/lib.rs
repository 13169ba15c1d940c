//! Find superseded package files in a FreeBSD package repository.
//!
//! Package filenames carry the port version (`name-1.2.3_4,5.pkg`). Files are grouped by
//! package name and, within each group, everything but the newest version is obsolete.

pub mod cleanup;
pub mod compare;
pub mod discover;
pub mod index;
pub mod parsing;
pub mod scan;
pub mod types;

pub use compare::{compare_records_desc, compare_versions_desc, sort_newest_first};
pub use index::{ObsoleteGroup, PackageIndex};
pub use parsing::decompose;
pub use types::{Decomposition, PortVersion, VersionRecord};
