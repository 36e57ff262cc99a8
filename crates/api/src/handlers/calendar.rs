//! Handlers for computed calendar annotations (pillars, luck timelines).
//!
//! These endpoints are pure computation over the request body -- no
//! database access and no authentication. The client composes them with
//! stored records as it sees fit.

use axum::Json;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use manse_core::ganji::{self, DayBoundary, Pillar};
use manse_core::luck::{self, Gender};

use crate::error::AppResult;
use crate::response::DataResponse;

/// Reference longitude used when a request does not supply one (Seoul).
pub const DEFAULT_LONGITUDE_DEG: f64 = 126.98;

/// A pillar with its index and both label renderings.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PillarView {
    pub index: u8,
    pub hangul: String,
    pub hanja: String,
}

impl From<Pillar> for PillarView {
    fn from(pillar: Pillar) -> Self {
        Self {
            index: pillar.index,
            hangul: pillar.hangul(),
            hanja: pillar.hanja(),
        }
    }
}

// ---------------------------------------------------------------------------
// Four pillars
// ---------------------------------------------------------------------------

/// Request body for `POST /calendar/pillars`.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct PillarsRequest {
    /// The instant to resolve, with its civil UTC offset (RFC 3339).
    pub at: DateTime<FixedOffset>,
    /// Reference longitude in degrees east; Seoul when omitted.
    pub longitude: Option<f64>,
    /// Day-boundary convention; civil midnight when omitted.
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

/// Response body for `POST /calendar/pillars`.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct PillarsResponse {
    pub year: PillarView,
    pub month: PillarView,
    pub day: PillarView,
    pub hour: PillarView,
}

/// POST /api/v1/calendar/pillars
///
/// Resolve the four pillars for an instant.
pub async fn pillars(
    Json(input): Json<PillarsRequest>,
) -> AppResult<Json<DataResponse<PillarsResponse>>> {
    let longitude = input.longitude.unwrap_or(DEFAULT_LONGITUDE_DEG);
    let four = ganji::four_pillars(input.at, longitude, input.day_boundary);

    Ok(Json(DataResponse {
        data: PillarsResponse {
            year: four.year.into(),
            month: four.month.into(),
            day: four.day.into(),
            hour: four.hour.into(),
        },
    }))
}

// ---------------------------------------------------------------------------
// Luck timeline
// ---------------------------------------------------------------------------

/// Request body for `POST /calendar/luck`.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct LuckRequest {
    /// Birth instant with its civil UTC offset (RFC 3339).
    pub birth: DateTime<FixedOffset>,
    pub gender: Gender,
    /// Reference instant for the age and active period; now when omitted.
    pub at: Option<DateTime<Utc>>,
}

/// One luck period in the response.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LuckEventView {
    pub at: DateTime<Utc>,
    pub age: i32,
    pub pillar: PillarView,
}

/// Response body for `POST /calendar/luck`.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct LuckResponse {
    pub direction: luck::Direction,
    pub start_age: i32,
    /// Completed years at the reference instant.
    pub current_age: i32,
    /// Index into `events` of the period active at the reference instant;
    /// absent before the first period begins.
    pub active_index: Option<usize>,
    pub events: Vec<LuckEventView>,
}

/// POST /api/v1/calendar/luck
///
/// Build the materialized luck timeline for a birth instant.
pub async fn luck(Json(input): Json<LuckRequest>) -> AppResult<Json<DataResponse<LuckResponse>>> {
    let at = input.at.unwrap_or_else(Utc::now);
    let timeline = luck::timeline(input.birth, input.gender);
    let active_index = luck::active_index(&timeline.events, at);
    let current_age = luck::age_on(input.birth.date_naive(), at.date_naive());

    let events = timeline
        .events
        .iter()
        .map(|event| LuckEventView {
            at: event.at,
            age: event.age,
            pillar: event.pillar.into(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: LuckResponse {
            direction: timeline.direction,
            start_age: timeline.start_age,
            current_age,
            active_index,
            events,
        },
    }))
}
