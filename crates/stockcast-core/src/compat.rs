//! Period/interval compatibility matrix.
//!
//! Fixed configuration data, not derived: each history span admits only the
//! sampling granularities the upstream feed actually serves for it. Callers
//! must reject an incompatible pair before any acquisition is attempted.

use crate::{Interval, Period};

/// Sampling granularities that are legal for the given history span.
///
/// Total over the closed [`Period`] domain; every period maps to a non-empty
/// set. Textual input outside the domain is already rejected by
/// `Period::from_str`.
pub const fn valid_intervals(period: Period) -> &'static [Interval] {
    match period {
        Period::FiveDays => &[
            Interval::FiveMinutes,
            Interval::FifteenMinutes,
            Interval::ThirtyMinutes,
            Interval::OneHour,
        ],
        Period::OneMonth | Period::ThreeMonths | Period::SixMonths => {
            &[Interval::OneHour, Interval::OneDay, Interval::OneWeek]
        }
        Period::OneYear => &[
            Interval::OneHour,
            Interval::OneDay,
            Interval::OneWeek,
            Interval::OneMonth,
        ],
        Period::TwoYears | Period::FiveYears => &[
            Interval::OneDay,
            Interval::OneWeek,
            Interval::OneMonth,
            Interval::ThreeMonths,
        ],
    }
}

/// Membership test over [`valid_intervals`].
pub fn is_compatible(period: Period, interval: Interval) -> bool {
    valid_intervals(period).contains(&interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_matches_fixed_table() {
        let expected: [(Period, &[Interval]); 7] = [
            (
                Period::FiveDays,
                &[
                    Interval::FiveMinutes,
                    Interval::FifteenMinutes,
                    Interval::ThirtyMinutes,
                    Interval::OneHour,
                ],
            ),
            (
                Period::OneMonth,
                &[Interval::OneHour, Interval::OneDay, Interval::OneWeek],
            ),
            (
                Period::ThreeMonths,
                &[Interval::OneHour, Interval::OneDay, Interval::OneWeek],
            ),
            (
                Period::SixMonths,
                &[Interval::OneHour, Interval::OneDay, Interval::OneWeek],
            ),
            (
                Period::OneYear,
                &[
                    Interval::OneHour,
                    Interval::OneDay,
                    Interval::OneWeek,
                    Interval::OneMonth,
                ],
            ),
            (
                Period::TwoYears,
                &[
                    Interval::OneDay,
                    Interval::OneWeek,
                    Interval::OneMonth,
                    Interval::ThreeMonths,
                ],
            ),
            (
                Period::FiveYears,
                &[
                    Interval::OneDay,
                    Interval::OneWeek,
                    Interval::OneMonth,
                    Interval::ThreeMonths,
                ],
            ),
        ];

        for (period, intervals) in expected {
            assert_eq!(valid_intervals(period), intervals, "period {period}");
        }
    }

    #[test]
    fn every_period_has_intervals() {
        for period in Period::ALL {
            assert!(!valid_intervals(period).is_empty());
        }
    }

    #[test]
    fn membership_checks() {
        assert!(is_compatible(Period::OneYear, Interval::OneDay));
        assert!(!is_compatible(Period::FiveDays, Interval::OneDay));
        assert!(!is_compatible(Period::TwoYears, Interval::OneHour));
    }
}
