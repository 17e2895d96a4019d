//! Tests for exit code policies (--fail-on flag)

use reach_check::{FailOn, ResultSummary};

fn summary(total: usize, inaccessible: usize) -> ResultSummary {
    ResultSummary {
        total,
        accessible: total - inaccessible,
        inaccessible,
        ..Default::default()
    }
}

#[test]
fn test_fail_on_never_always_returns_zero() {
    assert_eq!(FailOn::Never.exit_code(10, &summary(10, 10)), 0);
    assert_eq!(FailOn::Never.exit_code(0, &summary(10, 5)), 0);
}

#[test]
fn test_fail_on_any_failure() {
    assert_eq!(FailOn::AnyFailure.exit_code(10, &summary(10, 1)), 2);
    assert_eq!(FailOn::AnyFailure.exit_code(10, &summary(10, 0)), 0);
}

#[test]
fn test_fail_on_pct_threshold_is_exclusive() {
    // 10% inaccessible does not exceed a 10% threshold
    assert_eq!(FailOn::PctGreaterThan.exit_code(10, &summary(10, 1)), 0);
    assert_eq!(FailOn::PctGreaterThan.exit_code(10, &summary(10, 2)), 2);
    assert_eq!(FailOn::PctGreaterThan.exit_code(100, &summary(10, 10)), 0);
    assert_eq!(FailOn::PctGreaterThan.exit_code(0, &summary(10, 1)), 2);
}

#[test]
fn test_fail_on_pct_with_no_results() {
    assert_eq!(FailOn::PctGreaterThan.exit_code(0, &summary(0, 0)), 0);
}
