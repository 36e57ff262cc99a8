//! Sexagenary (ganji) cycle resolution.
//!
//! Pure functions mapping a civil timestamp (with its UTC offset) plus a
//! reference longitude to the year/month/day/hour indices of the 60-term
//! cycle, resolved against the fixed stem/branch label tables. The
//! longitude feeds the local-mean-time correction (`UTC + longitude / 15`
//! hours); year and month boundaries compare against absolute solar-term
//! instants. Every boundary comparison is half-open: an instant exactly at
//! a transition belongs to the later interval.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::solar;

// ---------------------------------------------------------------------------
// Label tables
// ---------------------------------------------------------------------------

/// The 10 heavenly stems as `(hangul, hanja)`, index 0 = 갑/甲.
pub const STEMS: [(&str, &str); 10] = [
    ("갑", "甲"),
    ("을", "乙"),
    ("병", "丙"),
    ("정", "丁"),
    ("무", "戊"),
    ("기", "己"),
    ("경", "庚"),
    ("신", "辛"),
    ("임", "壬"),
    ("계", "癸"),
];

/// The 12 earthly branches as `(hangul, hanja)`, index 0 = 자/子.
pub const BRANCHES: [(&str, &str); 12] = [
    ("자", "子"),
    ("축", "丑"),
    ("인", "寅"),
    ("묘", "卯"),
    ("진", "辰"),
    ("사", "巳"),
    ("오", "午"),
    ("미", "未"),
    ("신", "申"),
    ("유", "酉"),
    ("술", "戌"),
    ("해", "亥"),
];

/// One stem/branch pair, identified by its index in the 60-term cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pillar {
    /// Index in `[0, 60)`; 0 = 갑자/甲子.
    pub index: u8,
}

impl Pillar {
    /// Pillar for any integer, reduced into `[0, 60)`.
    pub fn new(index: i64) -> Self {
        Self {
            index: index.rem_euclid(60) as u8,
        }
    }

    /// Index of the stem in [`STEMS`].
    pub fn stem_index(self) -> usize {
        (self.index % 10) as usize
    }

    /// Index of the branch in [`BRANCHES`].
    pub fn branch_index(self) -> usize {
        (self.index % 12) as usize
    }

    /// Two-syllable hangul label, e.g. `"갑자"`.
    pub fn hangul(self) -> String {
        format!(
            "{}{}",
            STEMS[self.stem_index()].0,
            BRANCHES[self.branch_index()].0
        )
    }

    /// Two-character hanja label, e.g. `"甲子"`.
    pub fn hanja(self) -> String {
        format!(
            "{}{}",
            STEMS[self.stem_index()].1,
            BRANCHES[self.branch_index()].1
        )
    }

    /// The pillar `steps` positions away in the cycle (negative steps walk
    /// backwards), wrapping mod 60.
    pub fn shifted(self, steps: i64) -> Self {
        Self::new(self.index as i64 + steps)
    }
}

/// The unique cycle index in `[0, 60)` with the given stem and branch.
///
/// Only combinations of matching parity occur in the cycle; the callers in
/// this module construct stems from branches, so parity always matches.
fn cycle_index(stem: usize, branch: usize) -> usize {
    (0..5)
        .map(|k| (branch + 12 * k) % 60)
        .find(|&i| i % 10 == stem)
        .unwrap_or(branch)
}

// ---------------------------------------------------------------------------
// Time frames
// ---------------------------------------------------------------------------

/// Convention selecting when the day-cycle index increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DayBoundary {
    /// Civil midnight on the timestamp's own clock (its UTC offset); no
    /// longitude correction.
    #[default]
    Midnight,
    /// The day begins at 23:00 local mean time, with the rat hour (classic
    /// 자시 convention).
    RatStart,
    /// The rat hour is split: 23:00--24:00 stays with the earlier day and
    /// the day begins at local-mean-time midnight (야자시 convention).
    SplitRat,
}

/// Local mean time for the reference longitude: `UTC + longitude / 15` h.
///
/// For Seoul (126.98°E) this runs 32 minutes behind the KST clock.
fn local_mean_time(t: DateTime<Utc>, longitude_deg: f64) -> NaiveDateTime {
    let seconds = (longitude_deg * 240.0).round() as i64;
    (t + Duration::seconds(seconds)).naive_utc()
}

/// Julian day number of a Gregorian calendar date.
fn julian_day_number(date: NaiveDate) -> i64 {
    let (y, m, d) = (date.year() as i64, date.month() as i64, date.day() as i64);
    let a = (14 - m) / 12;
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    d + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

// ---------------------------------------------------------------------------
// Index resolution
// ---------------------------------------------------------------------------

/// The Gregorian year labelling the cycle year (ipchun to ipchun) that
/// contains `t`.
fn cycle_year(t: DateTime<Utc>) -> i32 {
    let y = t.year();
    if t < solar::term_instant(y, solar::SolarTerm::Ipchun) {
        y - 1
    } else {
        y
    }
}

/// Year-cycle index in `[0, 60)`.
///
/// Rolls over at the ipchun instant rather than the civil new year; an
/// instant exactly at ipchun belongs to the new year.
pub fn year_index(t: DateTime<FixedOffset>) -> usize {
    (cycle_year(t.to_utc()) as i64 - 4).rem_euclid(60) as usize
}

/// Month-cycle index in `[0, 60)`.
///
/// The branch follows the sectional term in effect at `t` (ipchun opens
/// the 인/寅 month); the stem follows the five-tigers rule from the year
/// stem (갑/기 years open on 병인/丙寅).
pub fn month_index(t: DateTime<FixedOffset>) -> usize {
    let utc = t.to_utc();
    let (term, _) = solar::sectional_term_at(utc);
    let ordinal = term.month_ordinal();
    let year_stem = (cycle_year(utc) as i64 - 4).rem_euclid(10) as usize;
    let stem = ((year_stem % 5) * 2 + 2 + ordinal) % 10;
    let branch = (2 + ordinal) % 12;
    cycle_index(stem, branch)
}

/// Day-cycle index in `[0, 60)`.
///
/// The cycle runs continuously with no intercalation; the anchor is pinned
/// by the 1949-10-01 갑자 fixture. `boundary` selects the instant at which
/// the index increments; each day is the half-open interval from one
/// boundary to the next.
pub fn day_index(t: DateTime<FixedOffset>, longitude_deg: f64, boundary: DayBoundary) -> usize {
    let local = match boundary {
        DayBoundary::Midnight => t.naive_local(),
        DayBoundary::SplitRat => local_mean_time(t.to_utc(), longitude_deg),
        // Shifting forward one hour folds the 23:00 boundary onto the next
        // calendar date.
        DayBoundary::RatStart => local_mean_time(t.to_utc(), longitude_deg) + Duration::hours(1),
    };
    (julian_day_number(local.date()) + 49).rem_euclid(60) as usize
}

/// Hour-cycle index in `[0, 60)`.
///
/// Two-hour blocks anchored at 23:00 local mean time; the stem follows the
/// five-rats rule from the day stem (갑/기 days open on 갑자/甲子). The rat
/// block starting at 23:00 takes the stem of the day it opens, so the day
/// stem is resolved under the [`DayBoundary::RatStart`] rule.
pub fn hour_index(t: DateTime<FixedOffset>, longitude_deg: f64) -> usize {
    let lmt = local_mean_time(t.to_utc(), longitude_deg);
    let branch = (((lmt.hour() + 1) / 2) % 12) as usize;
    let day_stem = day_index(t, longitude_deg, DayBoundary::RatStart) % 10;
    let stem = ((day_stem % 5) * 2 + branch) % 10;
    cycle_index(stem, branch)
}

/// The four pillars (year, month, day, hour) for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

/// Resolve all four pillars at once.
pub fn four_pillars(
    t: DateTime<FixedOffset>,
    longitude_deg: f64,
    boundary: DayBoundary,
) -> FourPillars {
    FourPillars {
        year: Pillar::new(year_index(t) as i64),
        month: Pillar::new(month_index(t) as i64),
        day: Pillar::new(day_index(t, longitude_deg, boundary) as i64),
        hour: Pillar::new(hour_index(t, longitude_deg) as i64),
    }
}
