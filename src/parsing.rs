use std::path::{Component, Path, PathBuf};

use crate::types::{Decomposition, PortVersion, VersionRecord};

/// Split a package file path into its package name and parsed version.
///
/// Only the filename is looked at. The format is the one produced by the ports tree:
/// `{PKGNAMEPREFIX}{PORTNAME}-{PORTVERSION}[_{PORTREVISION}][,{PORTEPOCH}][.{ext}]`,
/// e.g. `/usr/ports/packages/All/pkg-name-1.2.3_4,5.pkg` gives the key `pkg-name`,
/// segments `["1", "2", "3"]`, revision 4 and epoch 5.
///
/// The package name is everything before the last dash, so names containing dashes
/// are fine as long as the version itself has none. A filename without a dash, with an
/// empty name or without any version text is `NotAVersion`.
pub fn decompose(path: impl AsRef<Path>) -> Decomposition {
    let path = path.as_ref();
    let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
        return Decomposition::NotAVersion;
    };

    let body = strip_extension(filename);
    let Some((key, version)) = body.rsplit_once('-') else {
        return Decomposition::NotAVersion;
    };
    if key.is_empty() {
        return Decomposition::NotAVersion;
    }

    let (epoch, version) = int_suffix(version, ',');
    let (revision, version) = int_suffix(version, '_');
    if version.is_empty() {
        return Decomposition::NotAVersion;
    }

    Decomposition::Decomposed {
        key: key.to_string(),
        record: VersionRecord {
            path: clean_path(path),
            version: PortVersion {
                segments: version.split('.').map(str::to_string).collect(),
                revision,
                epoch,
            },
        },
    }
}

/// Extract the integer following the last `sep` in `s`.
///
/// Returns the value (0 when the suffix is missing, not a number or not positive) and `s`
/// truncated before the separator. Without a separator `s` is returned untouched.
///
/// `int_suffix("pkg-1.2.3_4,5", ',')` is `(5, "pkg-1.2.3_4")`.
pub fn int_suffix(s: &str, sep: char) -> (u64, &str) {
    match s.rsplit_once(sep) {
        Some((head, tail)) => {
            let value = tail
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0);
            (value, head)
        }
        None => (0, s),
    }
}

/// Drop a trailing `.ext` from a filename.
///
/// The scan from the end stops at `,` or `_`, which belong to the epoch or revision.
/// A dotted trailer made only of digits is a version component, not an extension, and is
/// kept: `pkg-1.2.3.123` is returned as is.
pub fn strip_extension(name: &str) -> &str {
    for (i, b) in name.bytes().enumerate().rev() {
        match b {
            b',' | b'_' => break,
            b'.' => {
                if name[i + 1..].bytes().all(|c| c.is_ascii_digit()) {
                    break;
                }
                return &name[..i];
            }
            _ => {}
        }
    }
    name
}

/// Lexically normalize a path: `.` is dropped, `dir/..` collapses, `..` right after the
/// root is dropped and redundant separators disappear. The filesystem is never consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parsed(path: &str) -> (String, VersionRecord) {
        decompose(path)
            .into_parts()
            .unwrap_or_else(|| panic!("`{}` should decompose", path))
    }

    #[rstest]
    #[case("pkg-1.2.3_4,5", ',', 5, "pkg-1.2.3_4")]
    #[case("pkg-1.2.3_4", '_', 4, "pkg-1.2.3")]
    #[case("pkg-1.2.3", ',', 0, "pkg-1.2.3")]
    #[case("pkg-1.2.3_,", ',', 0, "pkg-1.2.3_")] // nothing after the separator
    #[case("pkg-1.2.3_abc", '_', 0, "pkg-1.2.3")] // not a number
    #[case("pkg-1.2.3_4_5", '_', 5, "pkg-1.2.3_4")] // only the last one counts
    #[case("_5", '_', 5, "")]
    #[case("", ',', 0, "")]
    #[case(",", ',', 0, "")]
    #[case("pkg-1.2.3_-5", '_', 0, "pkg-1.2.3")] // negative
    #[case("pkg-1.2.3_0", '_', 0, "pkg-1.2.3")]
    #[case("pkg-1_99999999999999999999", '_', 0, "pkg-1")] // overflow
    fn test_int_suffix(
        #[case] input: &str,
        #[case] sep: char,
        #[case] value: u64,
        #[case] rest: &str,
    ) {
        assert_eq!(int_suffix(input, sep), (value, rest));
    }

    #[rstest]
    #[case("pkg-1.2.3.pkg", "pkg-1.2.3")]
    #[case("pkg-1.2.3_4,5.txz", "pkg-1.2.3_4,5")]
    #[case("pkg-1.2.3_4,5", "pkg-1.2.3_4,5")]
    #[case("pkg-1.2.3.123", "pkg-1.2.3.123")]
    #[case("pkg-1.2.", "pkg-1.2.")]
    #[case("pkg-1.2_3.tar.gz", "pkg-1.2_3.tar")]
    #[case("noext", "noext")]
    #[case("", "")]
    fn test_strip_extension(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_extension(input), expected);
    }

    #[rstest]
    #[case("/usr/ports/pkg-name-1.2.3_4,5.pkg", "pkg-name", &["1", "2", "3"], 4, 5)]
    #[case("pkg-1.2.3_,7.txz", "pkg", &["1", "2", "3"], 0, 7)]
    #[case("pkg-1.2.3_4,.txz", "pkg", &["1", "2", "3"], 4, 0)]
    #[case("pkg-1.2.3.txz", "pkg", &["1", "2", "3"], 0, 0)]
    #[case("pkg-10.20.30.40_99,88.pkg", "pkg", &["10", "20", "30", "40"], 99, 88)]
    #[case("pkg-1_1,1.pkg", "pkg", &["1"], 1, 1)]
    #[case("pkg-1.2a.3_4,5.pkg", "pkg", &["1", "2a", "3"], 4, 5)]
    #[case("pkg-1.2.3_4,5", "pkg", &["1", "2", "3"], 4, 5)]
    #[case("pkg-1.2.3.123", "pkg", &["1", "2", "3", "123"], 0, 0)]
    #[case("pkg-1..2.pkg", "pkg", &["1", "", "2"], 0, 0)]
    #[case("py311-foo_bar-2.0_1.pkg", "py311-foo_bar", &["2", "0"], 1, 0)]
    fn test_decompose(
        #[case] input: &str,
        #[case] key: &str,
        #[case] segments: &[&str],
        #[case] revision: u64,
        #[case] epoch: u64,
    ) {
        let (got_key, record) = parsed(input);
        assert_eq!(got_key, key);
        assert_eq!(record.path, PathBuf::from(input));
        assert_eq!(record.version.segments, segments);
        assert_eq!(record.version.revision, revision);
        assert_eq!(record.version.epoch, epoch);
    }

    #[rstest]
    #[case("1.2.3_4,5.pkg")] // no dash
    #[case("")]
    #[case("-1.2.3_4,5.pkg")] // empty name
    #[case("pkg-.pkg")]
    #[case("pkg-_1,2.pkg")]
    #[case("/usr/ports/packages/All/")]
    fn test_decompose_not_a_version(#[case] input: &str) {
        assert_eq!(decompose(input), Decomposition::NotAVersion);
    }

    #[test]
    fn test_decompose_cleans_path() {
        let (key, record) = parsed("/usr/../usr/ports/pkg-1.2.3_4,5.pkg");
        assert_eq!(key, "pkg");
        assert_eq!(record.path, PathBuf::from("/usr/ports/pkg-1.2.3_4,5.pkg"));
        assert_eq!(record.version.to_string(), "1.2.3_4,5");
    }

    #[test]
    fn test_decompose_is_deterministic() {
        let path = "/repo/All/curl-8.12.1_1.pkg";
        assert_eq!(decompose(path), decompose(path));
    }

    #[rstest]
    #[case("/usr/../usr/ports/a", "/usr/ports/a")]
    #[case("/../a", "/a")]
    #[case("a//b/./c/", "a/b/c")]
    #[case("./a", "a")]
    #[case("../a/../../b", "../../b")]
    #[case("a/..", ".")]
    #[case("", ".")]
    fn test_clean_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_path(Path::new(input)), PathBuf::from(expected));
    }
}
