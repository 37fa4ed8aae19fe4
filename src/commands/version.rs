use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Sentinel stored when no version could be read from the tool output.
pub const UNKNOWN_VERSION: &str = "unknown";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("static version pattern is valid"));

/// A Drush version string as reported by `drush version`.
///
/// Comparison is segment-wise numeric with missing segments read as zero. Any
/// string that is not dotted-numeric (including the `unknown` sentinel) sorts
/// below every real version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrushVersion(String);

impl DrushVersion {
    #[must_use]
    pub fn unknown() -> Self {
        DrushVersion(UNKNOWN_VERSION.to_string())
    }

    /// Pull the first dotted-numeric run out of free-form tool output.
    #[must_use]
    pub fn from_output(output: &str) -> Self {
        VERSION_PATTERN
            .find(output)
            .map_or_else(Self::unknown, |m| DrushVersion(m.as_str().to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.segments().is_none()
    }

    /// Digit runs of each segment with leading zeros stripped, or `None` when
    /// the string is not dotted-numeric or holds no digit at all.
    ///
    /// Segments stay textual so arbitrarily long numbers still compare by value.
    fn segments(&self) -> Option<Vec<&str>> {
        if !self.0.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0
            .split('.')
            .map(|s| {
                s.bytes()
                    .all(|b| b.is_ascii_digit())
                    .then(|| s.trim_start_matches('0'))
            })
            .collect()
    }

    #[must_use]
    pub fn is_older_than(&self, other: &str) -> bool {
        compare_versions(&self.0, other) == Ordering::Less
    }
}

impl From<&str> for DrushVersion {
    fn from(version: &str) -> Self {
        DrushVersion(version.to_string())
    }
}

impl fmt::Display for DrushVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compare two dotted version strings.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left_version = DrushVersion::from(left);
    let right_version = DrushVersion::from(right);
    let left = left_version.segments();
    let right = right_version.segments();
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => {
            let len = l.len().max(r.len());
            (0..len)
                .map(|i| {
                    let a = l.get(i).copied().unwrap_or("");
                    let b = r.get(i).copied().unwrap_or("");
                    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }
    }
}
