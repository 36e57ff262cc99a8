//! Myeongsik entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use manse_core::error::CoreError;
use manse_core::types::{DbId, OwnerId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Accepted `calendar` values.
pub const VALID_CALENDARS: &[&str] = &["solar", "lunar"];

/// Accepted `gender` values.
pub const VALID_GENDERS: &[&str] = &["male", "female"];

/// Maximum length of a record name.
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length of a memo.
pub const MAX_MEMO_LEN: usize = 2000;

/// Full myeongsik row from the `myeongsik` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct MyeongSik {
    pub id: DbId,
    /// IdP subject of the owning user.
    pub owner_id: OwnerId,
    pub name: String,
    pub birth_day: NaiveDate,
    /// `None` when the birth time is unknown.
    pub birth_time: Option<NaiveTime>,
    /// `"solar"` or `"lunar"`.
    pub calendar: String,
    /// `"male"` or `"female"`.
    pub gender: String,
    pub folder: Option<String>,
    pub memo: Option<String>,
    /// Opaque client payload carried verbatim.
    pub raw: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new myeongsik record.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateMyeongSik {
    pub name: String,
    pub birth_day: NaiveDate,
    pub birth_time: Option<NaiveTime>,
    pub calendar: String,
    pub gender: String,
    pub folder: Option<String>,
    pub memo: Option<String>,
    pub raw: Option<serde_json::Value>,
}

impl CreateMyeongSik {
    /// Validate field shapes before insert.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() || self.name.len() > MAX_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "name must be 1..={MAX_NAME_LEN} bytes and not blank"
            )));
        }
        if !VALID_CALENDARS.contains(&self.calendar.as_str()) {
            return Err(CoreError::Validation(format!(
                "Invalid calendar '{}'. Must be one of: {VALID_CALENDARS:?}",
                self.calendar
            )));
        }
        if !VALID_GENDERS.contains(&self.gender.as_str()) {
            return Err(CoreError::Validation(format!(
                "Invalid gender '{}'. Must be one of: {VALID_GENDERS:?}",
                self.gender
            )));
        }
        if let Some(memo) = &self.memo {
            if memo.len() > MAX_MEMO_LEN {
                return Err(CoreError::Validation(format!(
                    "memo must be at most {MAX_MEMO_LEN} bytes"
                )));
            }
        }
        Ok(())
    }
}

/// DTO for updating an existing record. All fields are optional.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct UpdateMyeongSik {
    pub name: Option<String>,
    pub folder: Option<String>,
    pub memo: Option<String>,
}
