//! Version comparison used by the console's "new version available" banner.
//!
//! Versions are compared leniently: a leading `v`/`V` is ignored, the part
//! before the first `-` is a dot-separated list of integers (anything that does
//! not parse counts as 0), and the part after it is a pre-release suffix that
//! sorts below the plain release and is otherwise compared as a string.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A leniently parsed version string.
///
/// Equality follows [`Version::compare`], so `1.0` equals `1.0.0`.
#[derive(Debug, Clone)]
pub struct Version {
    main: Vec<u64>,
    prerelease: Option<String>,
}

/// Numeric value of one dot segment. All-digit segments too large for `u64`
/// saturate at `u64::MAX`; anything non-numeric counts as 0.
fn segment_value(segment: &str) -> u64 {
    match segment.parse::<u64>() {
        Ok(n) => n,
        Err(_) if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
        Err(_) => 0,
    }
}

impl Version {
    /// Parse a version string. Never fails; malformed segments become 0.
    pub fn parse(input: &str) -> Self {
        let trimmed = input
            .strip_prefix('v')
            .or_else(|| input.strip_prefix('V'))
            .unwrap_or(input);

        let (main, prerelease) = match trimmed.split_once('-') {
            Some((main, pre)) => (main, Some(pre.to_string())),
            None => (trimmed, None),
        };

        let main = main
            .split('.')
            .map(segment_value)
            .collect();

        Self { main, prerelease }
    }

    pub fn main(&self) -> &[u64] {
        &self.main
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    /// Total order used by [`is_newer`]. Shorter main parts are padded with zeros,
    /// so `1.0` and `1.0.0` compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        let len = self.main.len().max(other.main.len());
        for i in 0..len {
            let a = self.main.get(i).copied().unwrap_or(0);
            let b = other.main.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main: Vec<String> = self.main.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", main.join("."))?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

/// Returns `true` when `a` is strictly newer than `b`.
///
/// Empty input on either side yields `false`.
pub fn is_newer(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    Version::parse(a).compare(&Version::parse(b)) == Ordering::Greater
}

/// Outcome of comparing the running console against the latest published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub current: String,
    pub latest: String,
    pub update_available: bool,
}

impl UpdateCheck {
    pub fn new(current: &str, latest: &str) -> Self {
        Self {
            current: current.to_string(),
            latest: latest.to_string(),
            update_available: is_newer(latest, current),
        }
    }

    /// Compare the version this binary was built as against `latest`.
    pub fn for_current_build(latest: &str) -> Self {
        Self::new(env!("CARGO_PKG_VERSION"), latest)
    }
}
