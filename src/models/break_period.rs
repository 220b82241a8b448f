use crate::core::calculator::breaks::{nominal_break_minutes, sanitize_break_periods};
use crate::errors::{AppError, AppResult};
use crate::utils::time::{is_valid_time_token, token_to_minutes};
use serde::{Deserialize, Serialize};

/// A single `{start, end}` break interval as received from callers.
/// Tokens may be malformed until the list goes through the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BreakPeriod {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl BreakPeriod {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn start_minutes(&self) -> Option<i64> {
        token_to_minutes(&self.start)
    }

    pub fn end_minutes(&self) -> Option<i64> {
        token_to_minutes(&self.end)
    }

    /// Strict parse of `HH:MM-HH:MM`, used on user input before it reaches the engine.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| AppError::InvalidBreakPeriod(format!("'{s}' is not HH:MM-HH:MM")))?;
        let (start, end) = (start.trim(), end.trim());

        if !is_valid_time_token(start) {
            return Err(AppError::InvalidTime(start.to_string()));
        }
        if !is_valid_time_token(end) {
            return Err(AppError::InvalidTime(end.to_string()));
        }

        let p = BreakPeriod::new(start, end);
        if p.end_minutes() <= p.start_minutes() {
            return Err(AppError::InvalidBreakPeriod(format!(
                "end {end} must be later than start {start}"
            )));
        }
        Ok(p)
    }

    /// Comma separated list: `12:00-13:00,15:00-15:15`. Blank input is an empty list.
    pub fn parse_list(s: &str) -> AppResult<Vec<Self>> {
        s.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(BreakPeriod::parse)
            .collect()
    }
}

/// A normalized break schedule: valid tokens, `end > start`, sorted by
/// start, at most `MAX_BREAK_SLOTS` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Vec<BreakPeriod>", into = "Vec<BreakPeriod>")]
pub struct BreakSchedule(Vec<BreakPeriod>);

impl BreakSchedule {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn normalize(raw: &[BreakPeriod]) -> Self {
        Self(sanitize_break_periods(raw))
    }

    pub fn periods(&self) -> &[BreakPeriod] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flat length of the schedule, ignoring any clock span.
    pub fn nominal_minutes(&self) -> i64 {
        nominal_break_minutes(&self.0)
    }

    pub fn label(&self) -> String {
        if self.0.is_empty() {
            return "-".to_string();
        }
        self.0
            .iter()
            .map(|p| format!("{}-{}", p.start, p.end))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<Vec<BreakPeriod>> for BreakSchedule {
    fn from(raw: Vec<BreakPeriod>) -> Self {
        BreakSchedule::normalize(&raw)
    }
}

impl From<BreakSchedule> for Vec<BreakPeriod> {
    fn from(s: BreakSchedule) -> Self {
        s.0
    }
}
