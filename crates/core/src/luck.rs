//! Luck-cycle (daewoon) ages and timelines.
//!
//! A timeline is derived from a birth instant: the year-stem polarity and
//! gender fix the traversal direction, the distance to the adjacent
//! sectional term fixes the starting age, and the birth month pillar is
//! stepped through the 60-cycle one position per ten-year period. The
//! sequence is materialized once per request and never mutated.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ganji::{self, Pillar};
use crate::solar;

/// Biological sex as used by the direction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
}

/// Traversal direction of the luck cycle through the month pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Direction {
    Forward,
    Backward,
}

/// Number of ten-year periods a timeline materializes.
pub const PERIOD_COUNT: usize = 10;

/// Years covered by one luck period.
pub const PERIOD_YEARS: i32 = 10;

/// Direction rule: yang-year (even stem index) males and yin-year females
/// run forward; the other two pairings run backward.
pub fn direction(year_index: usize, gender: Gender) -> Direction {
    let yang = year_index % 2 == 0;
    match (yang, gender) {
        (true, Gender::Male) | (false, Gender::Female) => Direction::Forward,
        _ => Direction::Backward,
    }
}

/// Completed calendar years from `birth` to `on`.
///
/// Plain year subtraction with a borrow when the month/day anniversary has
/// not yet occurred in `on`'s year.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Starting age of the first luck period.
///
/// One year per three days between birth and the adjacent sectional term
/// (the next term when running forward, the previous when backward),
/// rounded to the nearest whole year and floored at 1.
pub fn start_age(birth: DateTime<FixedOffset>, direction: Direction) -> i32 {
    let utc = birth.to_utc();
    let days = match direction {
        Direction::Forward => {
            let (_, at) = solar::next_sectional_term(utc);
            (at - utc).num_seconds() as f64 / 86_400.0
        }
        Direction::Backward => {
            let (_, at) = solar::sectional_term_at(utc);
            (utc - at).num_seconds() as f64 / 86_400.0
        }
    };
    ((days / 3.0).round() as i32).max(1)
}

/// One luck-cycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LuckEvent {
    /// Instant the period begins.
    pub at: DateTime<Utc>,
    /// Age (completed years) at which the period begins.
    pub age: i32,
    /// Month pillar governing the period.
    pub pillar: Pillar,
}

/// A materialized luck-cycle timeline.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct LuckTimeline {
    pub direction: Direction,
    pub start_age: i32,
    pub events: Vec<LuckEvent>,
}

/// Build the timeline for a birth instant.
///
/// Events sit at fixed calendar-year increments from birth (start age plus
/// ten-year steps); each carries the birth month pillar stepped through the
/// cycle in `direction`.
pub fn timeline(birth: DateTime<FixedOffset>, gender: Gender) -> LuckTimeline {
    let dir = direction(ganji::year_index(birth), gender);
    let start = start_age(birth, dir);
    let month = Pillar::new(ganji::month_index(birth) as i64);
    let step: i64 = match dir {
        Direction::Forward => 1,
        Direction::Backward => -1,
    };

    let events = (0..PERIOD_COUNT)
        .map(|k| {
            let age = start + PERIOD_YEARS * k as i32;
            LuckEvent {
                at: add_years(birth.to_utc(), age),
                age,
                pillar: month.shifted(step * (k as i64 + 1)),
            }
        })
        .collect();

    LuckTimeline {
        direction: dir,
        start_age: start,
        events,
    }
}

/// Index of the period active at `at`.
///
/// Strict lower-bound convention: `None` before the first event, otherwise
/// the last event whose instant is `<= at` (the final period is
/// open-ended).
pub fn active_index(events: &[LuckEvent], at: DateTime<Utc>) -> Option<usize> {
    events.iter().rposition(|e| e.at <= at)
}

/// Calendar-anchored year addition; Feb 29 clamps to Feb 28 on common
/// years.
fn add_years(t: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let target = t.year() + years;
    t.with_year(target)
        .or_else(|| (t - Duration::days(1)).with_year(target))
        .unwrap_or(t)
}
