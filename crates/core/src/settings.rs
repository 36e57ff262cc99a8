//! Typed user settings, entitlements, and login-nudge state.
//!
//! The original client kept these as loose key-value bags; here every bag
//! is an explicit struct with documented defaults, and derived state is a
//! pure projection over snapshots rather than a cached value.

use serde::{Deserialize, Serialize};

use crate::ganji::DayBoundary;

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User display and computation preferences.
///
/// The whole struct round-trips through the preference store as one JSON
/// value; unknown or missing fields fall back to the field default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show hanja beside the hangul pillar labels.
    pub show_hanja: bool,
    /// Day-boundary convention used for pillar computation.
    pub day_boundary: DayBoundary,
    /// Apply the local-mean-time correction from the birth longitude.
    pub longitude_correction: bool,
    /// Color theme.
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hanja: true,
            day_boundary: DayBoundary::Midnight,
            longitude_correction: true,
            theme: Theme::Light,
        }
    }
}

/// Subscription tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Supporter,
}

/// Capability grants derived from the user's plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entitlements {
    pub plan: Plan,
}

/// Stored-record limit for the free tier.
pub const FREE_RECORD_LIMIT: usize = 10;

/// Reasons the client surfaces a login prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeReason {
    /// Saving a record requires an account.
    SaveRecord,
    /// Folder sync requires an account.
    FolderSync,
    /// The free-tier record limit is reached.
    RecordLimit,
}

/// Pure projections over state snapshots. Derived state is computed on
/// demand, never cached.
pub mod projections {
    use super::*;

    /// Remaining record slots; `None` means unlimited.
    pub fn remaining_slots(entitlements: &Entitlements, stored: usize) -> Option<usize> {
        match entitlements.plan {
            Plan::Supporter => None,
            Plan::Free => Some(FREE_RECORD_LIMIT.saturating_sub(stored)),
        }
    }

    /// Whether one more record may be saved.
    pub fn can_save(entitlements: &Entitlements, stored: usize) -> bool {
        remaining_slots(entitlements, stored).is_none_or(|slots| slots > 0)
    }

    /// The nudge to show when the user tries to save, if any.
    pub fn save_nudge(
        authenticated: bool,
        entitlements: &Entitlements,
        stored: usize,
    ) -> Option<NudgeReason> {
        if !authenticated {
            Some(NudgeReason::SaveRecord)
        } else if !can_save(entitlements, stored) {
            Some(NudgeReason::RecordLimit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::projections::*;
    use super::*;

    #[test]
    fn settings_defaults_are_documented_values() {
        let s = Settings::default();
        assert!(s.show_hanja);
        assert_eq!(s.day_boundary, DayBoundary::Midnight);
        assert!(s.longitude_correction);
        assert_eq!(s.theme, Theme::Light);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let mut s = Settings::default();
        s.theme = Theme::Dark;
        s.day_boundary = DayBoundary::RatStart;
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<Settings>(&json).unwrap(), s);
    }

    #[test]
    fn partial_settings_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert!(s.show_hanja);
    }

    #[test]
    fn free_plan_slots_run_out() {
        let free = Entitlements { plan: Plan::Free };
        assert_eq!(remaining_slots(&free, 0), Some(FREE_RECORD_LIMIT));
        assert_eq!(remaining_slots(&free, FREE_RECORD_LIMIT), Some(0));
        assert!(can_save(&free, FREE_RECORD_LIMIT - 1));
        assert!(!can_save(&free, FREE_RECORD_LIMIT));
    }

    #[test]
    fn supporter_plan_is_unlimited() {
        let supporter = Entitlements {
            plan: Plan::Supporter,
        };
        assert_eq!(remaining_slots(&supporter, 10_000), None);
        assert!(can_save(&supporter, 10_000));
    }

    #[test]
    fn save_nudge_prefers_login_over_limit() {
        let free = Entitlements { plan: Plan::Free };
        assert_eq!(
            save_nudge(false, &free, FREE_RECORD_LIMIT),
            Some(NudgeReason::SaveRecord)
        );
        assert_eq!(
            save_nudge(true, &free, FREE_RECORD_LIMIT),
            Some(NudgeReason::RecordLimit)
        );
        assert_eq!(save_nudge(true, &free, 0), None);
    }
}
