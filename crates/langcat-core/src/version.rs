//! Version Comparator
//!
//! Versions are compared as dotted sequences of non-negative integers,
//! most significant segment first. The shorter sequence is padded with
//! zeros, so `1.2` and `1.2.0` are equal and `1.3` is newer than `1.2.9`.
//! Segments are kept as digit strings, so arbitrarily large numbers still
//! order correctly. A segment that is not all ASCII digits counts as `0`
//! and is reported with a `warn` event; comparison never fails.
use crate::data_model::CatalogEntry;
use std::cmp::{Ordering, Reverse};
use std::fmt;

const ZERO: &str = "0";

/// Integer segments of a dotted version string, as canonical digit
/// strings (no leading zeros, zero is `"0"`).
#[derive(Debug, Clone, Default)]
pub struct ParsedVersion {
    segments: Vec<String>,
}

impl ParsedVersion {
    pub fn parse(version: &str) -> Self {
        let segments = version
            .split('.')
            .enumerate()
            .map(|(index, segment)| {
                if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                    let digits = segment.trim_start_matches('0');
                    let canonical = if digits.is_empty() { ZERO } else { digits };
                    canonical.to_string()
                } else {
                    tracing::warn!(
                        version,
                        segment,
                        index,
                        "malformed version segment, comparing as 0"
                    );
                    ZERO.to_string()
                }
            })
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    /// Segment at `index`, zero past the end.
    fn segment(&self, index: usize) -> &str {
        self.segments.get(index).map_or(ZERO, String::as_str)
    }
}

/// Numeric order of two canonical digit strings.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl From<&str> for ParsedVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.segments.len().max(other.segments.len());
        (0..width)
            .map(|i| cmp_digits(self.segment(i), other.segment(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the padded ordering, not the raw segment vectors.
impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Compare two version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    ParsedVersion::parse(a).cmp(&ParsedVersion::parse(b))
}

/// Sort entries newest first. Entries with equal versions keep their
/// input order.
pub fn sort_descending(entries: &mut [CatalogEntry]) {
    entries.sort_by_cached_key(|entry| Reverse(ParsedVersion::parse(&entry.version)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink shared with the test body.
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || CapturedLog(sink.clone()))
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn entry(version: &str, url: &str) -> CatalogEntry {
        CatalogEntry::new("node", version, "linux", "x64", url)
    }

    fn versions(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.version.as_str()).collect()
    }

    #[test]
    fn test_zero_padding_equality() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.0.0"), Ordering::Equal);
        assert_eq!(ParsedVersion::parse("3.0"), ParsedVersion::parse("3"));
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.3", "1.2.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.9", "1.3"), Ordering::Less);
        assert_eq!(compare_versions("2", "1.99.99"), Ordering::Greater);
    }

    #[test]
    fn test_segments_wider_than_u64() {
        assert_eq!(compare_versions("1.99999999999999999999", "1.1"), Ordering::Greater);
        assert_eq!(
            compare_versions("1.99999999999999999999", "1.100000000000000000000"),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.000123", "1.123"), Ordering::Equal);
        assert_eq!(compare_versions("00.0", "0"), Ordering::Equal);
    }

    #[test]
    fn test_signed_segments_are_malformed() {
        assert_eq!(compare_versions("1.+5", "1.0"), Ordering::Equal);
        assert_eq!(ParsedVersion::parse("1.+5").segments(), vec!["1", "0"]);
        assert_eq!(compare_versions("1. 5", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_malformed_segment_is_logged() {
        assert!(capture_logs(|| {
            ParsedVersion::parse("1.2.3");
        })
        .is_empty());

        let logged = capture_logs(|| {
            ParsedVersion::parse("1.x.0");
        });
        assert!(logged.contains("WARN"));
        assert!(logged.contains("malformed version segment"));
        assert!(logged.contains("1.x.0"));
    }

    #[test]
    fn test_malformed_segment_is_zero() {
        assert_eq!(compare_versions("1.x.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1..2", "1.0.2"), Ordering::Equal);
        assert_eq!(compare_versions("-1.0", "0.0"), Ordering::Equal);
        assert_eq!(ParsedVersion::parse("1.x.0").segments(), vec!["1", "0", "0"]);
    }

    #[test]
    fn test_transitive_over_mixed_widths() {
        let a = ParsedVersion::parse("1.2");
        let b = ParsedVersion::parse("1.2.1");
        let c = ParsedVersion::parse("1.3");
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_sort_descending() {
        let mut entries = vec![
            entry("1.2.0", "a"),
            entry("1.10.0", "b"),
            entry("1.2.9", "c"),
            entry("2.0.0", "d"),
        ];
        sort_descending(&mut entries);
        assert_eq!(versions(&entries), vec!["2.0.0", "1.10.0", "1.2.9", "1.2.0"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_versions() {
        let mut entries = vec![
            entry("1.2", "first"),
            entry("3.0", "top"),
            entry("1.2.0", "second"),
            entry("1.2", "third"),
        ];
        sort_descending(&mut entries);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut entries = vec![
            entry("0.9", "a"),
            entry("0.10", "b"),
            entry("0.9.0", "c"),
            entry("1", "d"),
        ];
        sort_descending(&mut entries);
        let once = entries.clone();
        sort_descending(&mut entries);
        assert_eq!(entries, once);
    }

    #[test]
    fn test_display() {
        assert_eq!(ParsedVersion::parse("1.x.3").to_string(), "1.0.3");
    }
}
