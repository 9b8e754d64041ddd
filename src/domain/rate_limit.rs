// src/domain/rate_limit.rs

use crate::domain::DAY_SECS;
use crate::errors::RateLimitKind;

/// Submission limits for reports. Fixed for compatibility,
/// `Default` is the only configuration in use.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Max reports per identity inside `window_secs`.
    pub daily_cap: i64,
    /// Look-back window for the cap and the per-building dedup.
    pub window_secs: i64,
    /// Minimum gap between two reports from one identity.
    pub cooldown_secs: i64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            daily_cap: 3,
            window_secs: DAY_SECS,
            cooldown_secs: 60,
        }
    }
}

/// What the store knows about an identity at the time of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionHistory {
    /// Reports by this identity with `created_at >= now - window`.
    pub reports_in_window: i64,
    /// A report for the same (building, identity) inside the window exists.
    pub building_report_in_window: bool,
    /// Newest report by this identity, any building, any age.
    pub last_report_at: Option<i64>,
}

impl RateLimitPolicy {
    /// Inclusive lower bound for "within the window".
    pub fn window_start(&self, now: i64) -> i64 {
        now - self.window_secs
    }

    /// Read-only decision. An empty history always passes.
    pub fn check(&self, history: &SubmissionHistory, now: i64) -> Result<(), RateLimitKind> {
        if history.reports_in_window >= self.daily_cap {
            return Err(RateLimitKind::DailyCap);
        }
        if history.building_report_in_window {
            return Err(RateLimitKind::BuildingDedup);
        }
        if let Some(last) = history.last_report_at {
            if now - last < self.cooldown_secs {
                return Err(RateLimitKind::Cooldown);
            }
        }
        Ok(())
    }
}
