use crate::error::PuzzleError;
use crate::lenient::number_or_zero;
use itertools::Itertools;
use std::fmt::{Display, Write};
use std::ops::RangeInclusive;
use std::path::Path;
use uint::construct_uint;

construct_uint! {
    /// Accumulator for ID sums, wide enough that no puzzle input overflows it.
    pub struct U256(4);
}

/// Ranges from the puzzle statement for part 1.
pub const EXAMPLE_EXACT_DOUBLE: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,446443-446449,38593856-38593862";

/// Ranges from the puzzle statement for part 2.
pub const EXAMPLE_ANY_REPEAT: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,1698522-1698528,446443-446449,38593856-38593862,565653-565659,824824821-824824827,2121212118-2121212124";

/// Published answer for [`EXAMPLE_EXACT_DOUBLE`].
pub const EXAMPLE_EXACT_DOUBLE_SUM: u64 = 1_227_775_554;

/// Published answer for [`EXAMPLE_ANY_REPEAT`].
pub const EXAMPLE_ANY_REPEAT_SUM: u64 = 4_174_379_265;

/// Reports list every qualifying ID only up to this many.
pub const MAX_LISTED_IDS: usize = 20;

/// An inclusive range of product IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange {
    /// First ID in the range.
    pub start: u64,
    /// Last ID in the range, inclusive.
    pub end: u64,
}

impl IdRange {
    /// Creates a range. `start > end` gives an empty range.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Parses a `start-end` token.
    ///
    /// Each bound takes its numeric prefix; a missing or non-numeric bound
    /// reads as zero.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let mut bounds = token.split('-');
        let start = number_or_zero(bounds.next().unwrap_or_default(), "range start");
        let end = number_or_zero(bounds.next().unwrap_or_default(), "range end");
        Self::new(start, end)
    }

    /// The IDs covered by this range.
    #[must_use]
    pub const fn ids(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }

    /// Number of IDs in the range.
    #[must_use]
    pub const fn len(&self) -> u64 {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Whether the range covers no IDs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Display for IdRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parses a comma-separated list of ranges, skipping empty tokens.
#[must_use]
pub fn parse_ranges(input: &str) -> Vec<IdRange> {
    input
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(IdRange::parse)
        .collect_vec()
}

/// Reads and parses a range file.
///
/// # Errors
///
/// Returns [`PuzzleError::Io`] if the file cannot be read.
pub fn parse_file(path: &Path) -> Result<Vec<IdRange>, PuzzleError> {
    let input = std::fs::read_to_string(path).map_err(|e| PuzzleError::io(path, e))?;
    Ok(parse_ranges(&input))
}

/// Which digit patterns make an ID invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatMode {
    /// A block repeated exactly twice, e.g. `6464`.
    #[default]
    ExactDouble,
    /// A block repeated two or more times, e.g. `123123123`.
    AnyRepeat,
}

impl RepeatMode {
    /// Tests a decimal digit string against this mode.
    #[must_use]
    pub fn matches(self, digits: &str) -> bool {
        match self {
            Self::ExactDouble => is_exact_double(digits),
            Self::AnyRepeat => is_any_repeat(digits),
        }
    }
}

/// Whether `digits` is some block written exactly twice.
///
/// Strings with a leading zero never qualify.
#[must_use]
pub fn is_exact_double(digits: &str) -> bool {
    if digits.is_empty() || digits.starts_with('0') || digits.len() % 2 != 0 {
        return false;
    }

    let (left, right) = digits.split_at(digits.len() / 2);
    left == right
}

/// Whether `digits` is some block written two or more times.
///
/// Strings with a leading zero never qualify.
#[must_use]
pub fn is_any_repeat(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    if bytes.first().is_none_or(|&first| first == b'0') {
        return false;
    }

    let len = bytes.len();
    (1..=len / 2)
        .filter(|block| len % block == 0)
        .any(|block| {
            let pattern = &bytes[..block];
            bytes.chunks_exact(block).all(|chunk| chunk == pattern)
        })
}

/// Whether the decimal form of `id` qualifies under `mode`.
#[must_use]
pub fn qualifies(id: u64, mode: RepeatMode) -> bool {
    mode.matches(&id.to_string())
}

/// The IDs in `range` that qualify under `mode`, in ascending order.
#[must_use]
pub fn qualifying_ids(range: IdRange, mode: RepeatMode) -> Vec<u64> {
    let mut digits = String::with_capacity(20);
    range
        .ids()
        .filter(|&id| {
            digits.clear();
            // Writing into a String cannot fail.
            let _ = write!(digits, "{id}");
            mode.matches(&digits)
        })
        .collect_vec()
}

/// Sums `ids` into a [`U256`].
#[must_use]
pub fn sum_ids(ids: &[u64]) -> U256 {
    ids.iter()
        .fold(U256::zero(), |total, &id| total + U256::from(id))
}

/// Qualifying IDs found in one range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeReport {
    /// The range that was scanned.
    pub range: IdRange,
    /// Qualifying IDs, ascending.
    pub ids: Vec<u64>,
}

impl RangeReport {
    /// Sum of the qualifying IDs in this range.
    #[must_use]
    pub fn sum(&self) -> U256 {
        sum_ids(&self.ids)
    }
}

/// The result of scanning a list of ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// One report per input range, in input order.
    pub ranges: Vec<RangeReport>,
    /// Sum of every qualifying ID. Overlapping ranges count an ID once per range.
    pub total: U256,
    /// Number of IDs examined.
    pub candidates: u64,
}

impl ScanReport {
    /// Number of qualifying IDs across all ranges.
    #[must_use]
    pub fn count(&self) -> usize {
        self.ranges.iter().map(|report| report.ids.len()).sum()
    }

    /// Every qualifying ID, in range order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ranges.iter().flat_map(|report| report.ids.iter().copied())
    }
}

/// Scans every range and collects the qualifying IDs.
///
/// Ranges with hits, the full ID list when it is short, and the total count
/// are reported at `debug` level.
#[must_use]
pub fn scan(ranges: &[IdRange], mode: RepeatMode) -> ScanReport {
    let mut reports = Vec::with_capacity(ranges.len());
    let mut total = U256::zero();
    let mut candidates = 0;

    for &range in ranges {
        let ids = qualifying_ids(range, mode);
        if !ids.is_empty() {
            tracing::debug!("Range {range}: {}", ids.iter().join(", "));
        }

        candidates += range.len();
        total += sum_ids(&ids);
        reports.push(RangeReport { range, ids });
    }

    let report = ScanReport {
        ranges: reports,
        total,
        candidates,
    };

    if report.count() <= MAX_LISTED_IDS {
        tracing::debug!("All invalid IDs: {}", report.ids().join(", "));
    }
    tracing::debug!("Total count: {}", report.count());

    report
}

/// Sums every qualifying ID across `ranges`.
#[must_use]
pub fn solve(ranges: &[IdRange], mode: RepeatMode) -> U256 {
    scan(ranges, mode).total
}
