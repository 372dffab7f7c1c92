//! Annualized hour cost of a single goal or task.

use crate::{
    Costed,
    commitment::CostInput,
    util::{parse_calendar_date, positive},
};

/// Active days assumed when a daily commitment carries no frequency.
pub const DEFAULT_WEEKLY_FREQUENCY: f64 = 7.0;

const DAYS_PER_WEEK: f64 = 7.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Total hours `item` asks for over its whole date range.
///
/// The range is inclusive of both endpoints, so a single-day range counts one
/// day. Missing or unparseable dates, and ranges ending before they start,
/// cost `0.0`. The result is not rounded; rounding is left to presentation.
///
/// # Examples
///
/// ```rust
/// use engine::{CostInput, calculate_cost};
///
/// let two_weeks = CostInput {
///     start_date: Some("2026-01-01"),
///     end_date: Some("2026-01-14"),
///     daily_minutes: Some(60.0),
///     weekly_frequency: Some(5.0),
///     ..CostInput::default()
/// };
/// assert_eq!(calculate_cost(&two_weeks), 10.0);
/// ```
pub fn calculate_cost(item: &impl Costed) -> f64 {
    let input = item.cost_input();
    let Some(day_count) = inclusive_day_count(input.start_date, input.end_date) else {
        return 0.0;
    };
    let week_count = day_count as f64 / DAYS_PER_WEEK;
    weekly_cost(&input) * week_count
}

/// Number of calendar days in `[start, end]`, or `None` when the range is
/// missing, malformed or empty.
pub fn inclusive_day_count(start: Option<&str>, end: Option<&str>) -> Option<i64> {
    let start = parse_calendar_date(start?)?;
    let end = parse_calendar_date(end?)?;
    let days = (end - start).num_days() + 1;
    (days > 0).then_some(days)
}

/// Hours per week requested by `input`.
///
/// Weekly hours win over daily minutes. Zero, negative and non-finite values
/// are treated as absent.
pub fn weekly_cost(input: &CostInput<'_>) -> f64 {
    if let Some(hours) = positive(input.weekly_hours) {
        return hours;
    }
    if let Some(minutes) = positive(input.daily_minutes) {
        let frequency = positive(input.weekly_frequency).unwrap_or(DEFAULT_WEEKLY_FREQUENCY);
        return minutes * frequency / MINUTES_PER_HOUR;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranged<'a>(start: &'a str, end: &'a str) -> CostInput<'a> {
        CostInput {
            start_date: Some(start),
            end_date: Some(end),
            ..CostInput::default()
        }
    }

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn single_day_counts_one_day() {
        assert_eq!(inclusive_day_count(Some("2026-05-05"), Some("2026-05-05")), Some(1));

        let item = CostInput {
            weekly_hours: Some(7.0),
            ..ranged("2026-05-05", "2026-05-05")
        };
        approx(calculate_cost(&item), 1.0);
    }

    #[test]
    fn reversed_range_costs_nothing() {
        let item = CostInput {
            weekly_hours: Some(10.0),
            ..ranged("2026-02-01", "2026-01-01")
        };
        assert_eq!(calculate_cost(&item), 0.0);
    }

    #[test]
    fn weekly_hours_over_one_week() {
        let item = CostInput {
            weekly_hours: Some(10.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        approx(calculate_cost(&item), 10.0);
    }

    #[test]
    fn daily_minutes_with_frequency() {
        let item = CostInput {
            daily_minutes: Some(60.0),
            weekly_frequency: Some(5.0),
            ..ranged("2026-01-01", "2026-01-14")
        };
        approx(calculate_cost(&item), 10.0);
    }

    #[test]
    fn daily_minutes_default_to_every_day() {
        let item = CostInput {
            daily_minutes: Some(60.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        approx(calculate_cost(&item), 7.0);
    }

    #[test]
    fn zero_frequency_falls_back_to_every_day() {
        let item = CostInput {
            daily_minutes: Some(30.0),
            weekly_frequency: Some(0.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        approx(calculate_cost(&item), 3.5);
    }

    #[test]
    fn weekly_hours_take_precedence() {
        let item = CostInput {
            weekly_hours: Some(2.0),
            daily_minutes: Some(600.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        approx(calculate_cost(&item), 2.0);
    }

    #[test]
    fn non_positive_amounts_are_ignored() {
        let negative = CostInput {
            weekly_hours: Some(-3.0),
            daily_minutes: Some(-30.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        assert_eq!(calculate_cost(&negative), 0.0);

        let zero_hours_with_minutes = CostInput {
            weekly_hours: Some(0.0),
            daily_minutes: Some(60.0),
            ..ranged("2026-01-01", "2026-01-07")
        };
        approx(calculate_cost(&zero_hours_with_minutes), 7.0);
    }

    #[test]
    fn missing_or_malformed_dates_cost_nothing() {
        let no_end = CostInput {
            start_date: Some("2026-01-01"),
            weekly_hours: Some(5.0),
            ..CostInput::default()
        };
        assert_eq!(calculate_cost(&no_end), 0.0);

        let garbage = CostInput {
            weekly_hours: Some(5.0),
            ..ranged("soon", "2026-12-31")
        };
        assert_eq!(calculate_cost(&garbage), 0.0);
    }

    #[test]
    fn no_commitment_costs_nothing() {
        assert_eq!(calculate_cost(&ranged("2026-01-01", "2026-12-31")), 0.0);
    }

    #[test]
    fn full_year_at_five_hours_a_week() {
        let item = CostInput {
            weekly_hours: Some(5.0),
            ..ranged("2026-01-01", "2026-12-31")
        };
        approx(calculate_cost(&item), 5.0 * 365.0 / 7.0);
    }

    #[test]
    fn leap_year_counts_extra_day() {
        assert_eq!(
            inclusive_day_count(Some("2028-01-01"), Some("2028-12-31")),
            Some(366)
        );
    }
}
