//! Aggregator
//!
//! Worst case wins: red if any check is red, else yellow if any is yellow,
//! else green. No weighting, no averaging, order and count do not matter.

use crate::models::types::{AggregatedRiskResult, RiskCheckResult, RiskLevel};

/// Overall level of a set of check outcomes (green when empty)
pub fn overall_level(checks: &[RiskCheckResult]) -> RiskLevel {
    checks
        .iter()
        .map(|check| check.level)
        .max()
        .unwrap_or(RiskLevel::Green)
}

/// Take ownership of the outcomes and build the final verdict
pub fn aggregate(checks: Vec<RiskCheckResult>) -> AggregatedRiskResult {
    AggregatedRiskResult {
        overall: overall_level(&checks),
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(level: RiskLevel) -> RiskCheckResult {
        RiskCheckResult::new("test", "Test", level, "details")
    }

    #[test]
    fn test_exhaustive_three_checks() {
        for a in RiskLevel::ALL {
            for b in RiskLevel::ALL {
                for c in RiskLevel::ALL {
                    let levels = [a, b, c];
                    let result = aggregate(levels.iter().map(|&l| check(l)).collect());

                    let expected = if levels.contains(&RiskLevel::Red) {
                        RiskLevel::Red
                    } else if levels.contains(&RiskLevel::Yellow) {
                        RiskLevel::Yellow
                    } else {
                        RiskLevel::Green
                    };
                    assert_eq!(result.overall, expected, "{:?}", levels);
                    assert_eq!(result.checks.len(), 3);
                }
            }
        }
    }

    #[test]
    fn test_order_and_count_do_not_matter() {
        let one_red = vec![check(RiskLevel::Red)];
        let many = vec![
            check(RiskLevel::Green),
            check(RiskLevel::Green),
            check(RiskLevel::Green),
            check(RiskLevel::Red),
            check(RiskLevel::Green),
        ];
        assert_eq!(aggregate(one_red).overall, aggregate(many).overall);
    }

    #[test]
    fn test_empty_is_green() {
        assert_eq!(overall_level(&[]), RiskLevel::Green);
    }

    #[test]
    fn test_checks_keep_their_order() {
        let result = aggregate(vec![
            RiskCheckResult::yellow("b", "B", "x"),
            RiskCheckResult::green("a", "A", "y"),
        ]);
        assert_eq!(result.checks[0].id, "b");
        assert_eq!(result.checks[1].id, "a");
    }
}
