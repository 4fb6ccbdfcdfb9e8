//! Summary formatting.
//!
//! Pure functions that turn run metadata and test lists into the text
//! blocks published to the pipeline. No I/O, no hidden state: identical
//! input yields an identical string.

use crate::client::{RunMetadata, STATUS_FAILED, STATUS_PASSED, TestRecord};

/// Sentinel printed when a run has no counted tests
pub const PERCENTAGE_UNAVAILABLE: &str = "N/A";

/// Percentage of passed tests among all counted tests, rounded to the
/// nearest whole percent with halves rounding up. `None` when the run has
/// no counted tests at all.
pub fn pass_percentage(run: &RunMetadata) -> Option<u32> {
    let total = run.total();
    if total == 0 {
        return None;
    }
    Some((run.passed_count as f64 / total as f64 * 100.0).round() as u32)
}

/// Format the whole-run summary block
pub fn run_summary(run: &RunMetadata) -> String {
    let percentage = match pass_percentage(run) {
        Some(value) => format!("{}%", value),
        None => PERCENTAGE_UNAVAILABLE.to_string(),
    };
    format!(
        "TestRail Run Summary:\n  {} of All Tests Passed | {} passed ✅ - {} failed ❌\n  🔗 -> {}",
        percentage, run.passed_count, run.failed_count, run.url
    )
}

/// Reduce a branch ref to the segment used for matching: lower-cased, last
/// non-empty `/`-separated component (`feature/my-branch` -> `my-branch`).
pub fn normalize_branch(branch: &str) -> String {
    let normalized = branch.trim().to_lowercase();
    normalized
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(&normalized)
        .to_string()
}

/// Pass/fail counts among the branch-related tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedCounts {
    /// Related tests regardless of status
    pub total: u64,

    /// Related tests with a passed result
    pub passed: u64,

    /// Related tests with a failed result
    pub failed: u64,
}

/// Count the tests whose `refs` mentions the branch segment.
///
/// Matching is a case-insensitive substring test; records without `refs`
/// are never counted. Statuses other than passed/failed contribute to the
/// total only.
pub fn count_related(tests: &[TestRecord], segment: &str) -> RelatedCounts {
    let mut counts = RelatedCounts::default();
    for test in tests {
        let Some(refs) = &test.refs else {
            continue;
        };
        if !refs.to_lowercase().contains(segment) {
            continue;
        }
        counts.total += 1;
        if test.status_id == STATUS_PASSED {
            counts.passed += 1;
        } else if test.status_id == STATUS_FAILED {
            counts.failed += 1;
        }
    }
    counts
}

/// Format the branch-related summary block
pub fn related_summary(tests: &[TestRecord], branch: &str) -> String {
    let segment = normalize_branch(branch);
    let counts = count_related(tests, &segment);
    format!(
        "Related Tests for [{}]:\n  {} tests in total | {} passed ✅ - {} failed ❌",
        segment, counts.total, counts.passed, counts.failed
    )
}
