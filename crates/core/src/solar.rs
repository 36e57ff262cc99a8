//! Solar-term ephemeris.
//!
//! Locates the UTC instants at which the apparent solar ecliptic longitude
//! crosses the 12 sectional terms (節) that open the sexagenary months.
//! The longitude series is the low-precision formula from the Astronomical
//! Almanac (mean longitude plus two equation-of-center terms), which keeps
//! term instants within a few minutes of ephemeris truth. Everything here
//! is deterministic and side-effect free.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days (fractional) since the J2000.0 epoch (2000-01-01T12:00:00Z).
fn days_since_j2000(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 86_400_000.0 - 10_957.5
}

/// Normalize an angle in degrees to `[0, 360)`.
fn norm_deg(d: f64) -> f64 {
    d.rem_euclid(360.0)
}

/// Wrap an angular difference in degrees to `(-180, 180]`.
fn wrap_half(d: f64) -> f64 {
    let x = d.rem_euclid(360.0);
    if x > 180.0 {
        x - 360.0
    } else {
        x
    }
}

/// Apparent solar ecliptic longitude at `t`, degrees in `[0, 360)`.
pub fn sun_longitude(t: DateTime<Utc>) -> f64 {
    let n = days_since_j2000(t);
    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();
    norm_deg(mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin())
}

// ---------------------------------------------------------------------------
// Sectional terms
// ---------------------------------------------------------------------------

/// The 12 sectional terms, in month order starting from ipchun (立春).
///
/// Only the month-opening terms are listed; the mid-month terms (中氣) play
/// no role in pillar resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    /// 입춘 (315°) -- opens the 寅 month and the sexagenary year.
    Ipchun,
    /// 경칩 (345°)
    Gyeongchip,
    /// 청명 (15°)
    Cheongmyeong,
    /// 입하 (45°)
    Ipha,
    /// 망종 (75°)
    Mangjong,
    /// 소서 (105°)
    Soseo,
    /// 입추 (135°)
    Ipchu,
    /// 백로 (165°)
    Baekro,
    /// 한로 (195°)
    Hanro,
    /// 입동 (225°)
    Ipdong,
    /// 대설 (255°)
    Daeseol,
    /// 소한 (285°) -- falls in January, closing out the cycle year.
    Sohan,
}

impl SolarTerm {
    /// All 12 terms in month order.
    pub const ALL: [SolarTerm; 12] = [
        SolarTerm::Ipchun,
        SolarTerm::Gyeongchip,
        SolarTerm::Cheongmyeong,
        SolarTerm::Ipha,
        SolarTerm::Mangjong,
        SolarTerm::Soseo,
        SolarTerm::Ipchu,
        SolarTerm::Baekro,
        SolarTerm::Hanro,
        SolarTerm::Ipdong,
        SolarTerm::Daeseol,
        SolarTerm::Sohan,
    ];

    /// Apparent solar longitude at which the term begins, degrees.
    pub fn degree(self) -> f64 {
        match self {
            SolarTerm::Ipchun => 315.0,
            SolarTerm::Gyeongchip => 345.0,
            SolarTerm::Cheongmyeong => 15.0,
            SolarTerm::Ipha => 45.0,
            SolarTerm::Mangjong => 75.0,
            SolarTerm::Soseo => 105.0,
            SolarTerm::Ipchu => 135.0,
            SolarTerm::Baekro => 165.0,
            SolarTerm::Hanro => 195.0,
            SolarTerm::Ipdong => 225.0,
            SolarTerm::Daeseol => 255.0,
            SolarTerm::Sohan => 285.0,
        }
    }

    /// 0-based ordinal of the sexagenary month the term opens (ipchun = 0).
    pub fn month_ordinal(self) -> usize {
        match self {
            SolarTerm::Ipchun => 0,
            SolarTerm::Gyeongchip => 1,
            SolarTerm::Cheongmyeong => 2,
            SolarTerm::Ipha => 3,
            SolarTerm::Mangjong => 4,
            SolarTerm::Soseo => 5,
            SolarTerm::Ipchu => 6,
            SolarTerm::Baekro => 7,
            SolarTerm::Hanro => 8,
            SolarTerm::Ipdong => 9,
            SolarTerm::Daeseol => 10,
            SolarTerm::Sohan => 11,
        }
    }

    /// Korean name of the term.
    pub fn hangul(self) -> &'static str {
        match self {
            SolarTerm::Ipchun => "입춘",
            SolarTerm::Gyeongchip => "경칩",
            SolarTerm::Cheongmyeong => "청명",
            SolarTerm::Ipha => "입하",
            SolarTerm::Mangjong => "망종",
            SolarTerm::Soseo => "소서",
            SolarTerm::Ipchu => "입추",
            SolarTerm::Baekro => "백로",
            SolarTerm::Hanro => "한로",
            SolarTerm::Ipdong => "입동",
            SolarTerm::Daeseol => "대설",
            SolarTerm::Sohan => "소한",
        }
    }

    /// Nominal Gregorian `(month, day)` around which the instant is searched.
    ///
    /// Each term drifts at most two days around its nominal date, well
    /// inside the bisection window used by [`term_instant`].
    fn nominal(self) -> (u32, u32) {
        match self {
            SolarTerm::Ipchun => (2, 4),
            SolarTerm::Gyeongchip => (3, 6),
            SolarTerm::Cheongmyeong => (4, 5),
            SolarTerm::Ipha => (5, 6),
            SolarTerm::Mangjong => (6, 6),
            SolarTerm::Soseo => (7, 7),
            SolarTerm::Ipchu => (8, 8),
            SolarTerm::Baekro => (9, 8),
            SolarTerm::Hanro => (10, 8),
            SolarTerm::Ipdong => (11, 7),
            SolarTerm::Daeseol => (12, 7),
            SolarTerm::Sohan => (1, 6),
        }
    }
}

/// Half-width of the bisection window around a term's nominal date.
const SEARCH_WINDOW_DAYS: i64 = 8;

/// UTC instant at which the sun reaches `term` in the given civil year.
///
/// Bisects the angular offset over a window around the nominal date; the
/// offset rises through zero at roughly one degree per day, so the window
/// brackets exactly one crossing. The returned instant is the first one at
/// which the longitude is at or past the term degree (sub-second
/// resolution), so comparing `t >= instant` gives half-open interval
/// membership: an event exactly at the crossing belongs to the new term.
pub fn term_instant(year: i32, term: SolarTerm) -> DateTime<Utc> {
    let (month, day) = term.nominal();
    let nominal = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("nominal term dates are valid for every year")
        .and_utc();

    let offset = |t: DateTime<Utc>| wrap_half(sun_longitude(t) - term.degree());

    let mut lo = nominal - Duration::days(SEARCH_WINDOW_DAYS);
    let mut hi = nominal + Duration::days(SEARCH_WINDOW_DAYS);
    while hi - lo > Duration::seconds(1) {
        let mid = lo + (hi - lo) / 2;
        if offset(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// The sectional term in effect at `t` (latest instant `<= t`), with its
/// instant.
pub fn sectional_term_at(t: DateTime<Utc>) -> (SolarTerm, DateTime<Utc>) {
    let year = t.year();
    let mut best: Option<(SolarTerm, DateTime<Utc>)> = None;
    for y in [year - 1, year, year + 1] {
        for term in SolarTerm::ALL {
            let at = term_instant(y, term);
            if at <= t && best.is_none_or(|(_, b)| at > b) {
                best = Some((term, at));
            }
        }
    }
    // The scan covers the adjacent civil years, so a preceding term
    // always exists.
    best.unwrap_or((SolarTerm::Ipchun, term_instant(year, SolarTerm::Ipchun)))
}

/// The first sectional term strictly after `t`, with its instant.
pub fn next_sectional_term(t: DateTime<Utc>) -> (SolarTerm, DateTime<Utc>) {
    let year = t.year();
    let mut best: Option<(SolarTerm, DateTime<Utc>)> = None;
    for y in [year - 1, year, year + 1] {
        for term in SolarTerm::ALL {
            let at = term_instant(y, term);
            if at > t && best.is_none_or(|(_, b)| at < b) {
                best = Some((term, at));
            }
        }
    }
    best.unwrap_or((SolarTerm::Ipchun, term_instant(year + 1, SolarTerm::Ipchun)))
}
