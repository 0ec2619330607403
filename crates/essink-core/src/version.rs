//! Dotted version comparison for the compatibility gates
//!
//! Versions are compared segment by segment over their common prefix. A
//! segment's pre-release or build suffix (everything from the first `-`) is
//! ignored. When the common prefix is equal the version with fewer segments
//! sorts first, so `1.2 < 1.2.0`. Trailing dots are dropped before
//! splitting, so `1.2.` reads as `1.2`.

use std::cmp::Ordering;
use thiserror::Error;

/// Oldest server version that supports data streams
pub const DATA_STREAM_MIN_VERSION: &str = "1.2.0";

/// Oldest server version this connector can write to at all
pub const CONNECTOR_MIN_VERSION: &str = "1.2.0";

/// Version of this connector build, quoted in compatibility messages
pub const CONNECTOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version segment '{segment}' in '{version}'")]
    InvalidSegment { version: String, segment: String },
}

fn segment_value(version: &str, segment: &str) -> Result<u64, VersionError> {
    let numeric = match segment.find('-') {
        Some(pos) => &segment[..pos],
        None => segment,
    };
    numeric.parse().map_err(|_| VersionError::InvalidSegment {
        version: version.to_string(),
        segment: segment.to_string(),
    })
}

/// Compare two dotted version strings
///
/// Only the overlapping segments are parsed, so trailing garbage in the
/// longer version never causes an error.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let left: Vec<&str> = a.trim_end_matches('.').split('.').collect();
    let right: Vec<&str> = b.trim_end_matches('.').split('.').collect();

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = segment_value(a, l)?.cmp(&segment_value(b, r)?);
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }

    Ok(left.len().cmp(&right.len()))
}

/// True when `version` sorts strictly before `minimum`
pub fn is_older_than(version: &str, minimum: &str) -> Result<bool, VersionError> {
    Ok(compare(version, minimum)? == Ordering::Less)
}
