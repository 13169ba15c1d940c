use std::cmp::Ordering;

use crate::types::{PortVersion, VersionRecord};

/// How one pair of version segments gets compared.
#[derive(Debug, PartialEq, Eq)]
enum SegmentPair<'a> {
    BothNumeric(i64, i64),
    Otherwise(&'a str, &'a str),
}

impl<'a> SegmentPair<'a> {
    fn new(a: &'a str, b: &'a str) -> Self {
        match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(a), Ok(b)) => SegmentPair::BothNumeric(a, b),
            _ => SegmentPair::Otherwise(a, b),
        }
    }
}

/// Compare two versions so that the newer one sorts first.
///
/// `Ordering::Less` means `a` is newer than `b`. Epoch wins outright, then segments are
/// compared position by position (a missing segment counts as an empty string), then
/// the revision breaks the tie. Two segments are compared as integers when both parse
/// as one, byte-wise otherwise.
pub fn compare_versions_desc(a: &PortVersion, b: &PortVersion) -> Ordering {
    if a.epoch != b.epoch {
        return b.epoch.cmp(&a.epoch);
    }

    let len = a.segments.len().max(b.segments.len());
    for i in 0..len {
        let sa = a.segments.get(i).map_or("", String::as_str);
        let sb = b.segments.get(i).map_or("", String::as_str);
        if sa == sb {
            continue;
        }

        match SegmentPair::new(sa, sb) {
            // "01" and "1" are the same number
            SegmentPair::BothNumeric(na, nb) if na == nb => continue,
            SegmentPair::BothNumeric(na, nb) => return nb.cmp(&na),
            SegmentPair::Otherwise(sa, sb) => return sb.cmp(sa),
        }
    }

    b.revision.cmp(&a.revision)
}

/// [`compare_versions_desc`] on the versions of two records. Paths play no part.
pub fn compare_records_desc(a: &VersionRecord, b: &VersionRecord) -> Ordering {
    compare_versions_desc(&a.version, &b.version)
}

/// Stable sort of records, newest first.
///
/// Mixing numeric and non-numeric segments can make the ordering cyclic
/// (`10 > 9`, `9 > 10a`, `10a > 10`), which the standard library sorts are allowed to
/// panic on. An insertion sort only ever compares neighbours and always terminates.
pub fn sort_newest_first(records: &mut [VersionRecord]) {
    for i in 1..records.len() {
        let mut j = i;
        while j > 0 && compare_records_desc(&records[j - 1], &records[j]) == Ordering::Greater {
            records.swap(j - 1, j);
            j -= 1;
        }
    }
}
