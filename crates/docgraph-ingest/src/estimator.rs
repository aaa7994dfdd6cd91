//! Page-count estimation from filename and file size.

use crate::profile;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

/// Page count used when the caller does not report a size.
pub const DEFAULT_PAGE_COUNT: u32 = 10;

/// Size thresholds (exclusive upper bound) and the page count below each.
const SIZE_STEPS: &[(u64, u32)] = &[
    (100 * KIB, 5),
    (500 * KIB, 10),
    (MIB, 15),
    (5 * MIB, 25),
    (20 * MIB, 40),
];

const LARGEST_PAGE_COUNT: u32 = 60;

/// Estimate how many pages a document has.
///
/// A known report pins its page count regardless of size. The result is
/// always at least 1.
pub fn estimate_pages(file_name: &str, file_size: Option<u64>) -> u32 {
    if let Some(pinned) = profile::resolve(file_name).pinned_pages {
        return pinned.max(1);
    }
    let Some(size) = file_size else {
        return DEFAULT_PAGE_COUNT;
    };
    SIZE_STEPS
        .iter()
        .find(|(limit, _)| size < *limit)
        .map(|(_, pages)| *pages)
        .unwrap_or(LARGEST_PAGE_COUNT)
}
