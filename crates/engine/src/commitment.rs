//! Recurring time commitments and the read-only view the cost engine consumes.

use serde::{Deserialize, Serialize};

/// How much recurring time an item asks for.
///
/// The two modes are mutually exclusive: an item is either costed in minutes
/// per active day (optionally on a subset of the week) or in hours per week.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Commitment {
    /// `minutes` on each active day, `days_per_week` active days (7 when
    /// absent).
    Daily {
        minutes: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        days_per_week: Option<f64>,
    },
    /// A flat number of hours every week.
    Weekly { hours: f64 },
}

impl Commitment {
    /// Every day of the week for `minutes`.
    #[must_use]
    pub const fn daily(minutes: f64) -> Self {
        Self::Daily {
            minutes,
            days_per_week: None,
        }
    }

    /// `minutes` on `days_per_week` days.
    #[must_use]
    pub const fn daily_on(minutes: f64, days_per_week: f64) -> Self {
        Self::Daily {
            minutes,
            days_per_week: Some(days_per_week),
        }
    }

    #[must_use]
    pub const fn weekly(hours: f64) -> Self {
        Self::Weekly { hours }
    }

    /// Drops the weekly frequency, leaving the implicit every-day cadence.
    ///
    /// Goals are never scheduled on a subset of the week.
    #[must_use]
    pub const fn without_frequency(self) -> Self {
        match self {
            Self::Daily { minutes, .. } => Self::daily(minutes),
            weekly @ Self::Weekly { .. } => weekly,
        }
    }
}

/// Optional scheduling fields shared by goals and tasks.
///
/// Dates are kept as the raw calendar strings the caller submitted; they are
/// parsed only when costing, so an unparseable date costs nothing instead of
/// failing the whole computation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CostInput<'a> {
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
    pub weekly_hours: Option<f64>,
    pub daily_minutes: Option<f64>,
    pub weekly_frequency: Option<f64>,
}

impl<'a> CostInput<'a> {
    pub fn new(
        start_date: Option<&'a str>,
        end_date: Option<&'a str>,
        commitment: Option<&Commitment>,
    ) -> Self {
        let mut input = Self {
            start_date,
            end_date,
            ..Self::default()
        };
        match commitment {
            Some(Commitment::Daily {
                minutes,
                days_per_week,
            }) => {
                input.daily_minutes = Some(*minutes);
                input.weekly_frequency = *days_per_week;
            }
            Some(Commitment::Weekly { hours }) => input.weekly_hours = Some(*hours),
            None => {}
        }
        input
    }
}

/// Anything the cost engine can price.
pub trait Costed {
    fn cost_input(&self) -> CostInput<'_>;
}

impl Costed for CostInput<'_> {
    fn cost_input(&self) -> CostInput<'_> {
        *self
    }
}

impl<T: Costed + ?Sized> Costed for &T {
    fn cost_input(&self) -> CostInput<'_> {
        (**self).cost_input()
    }
}
