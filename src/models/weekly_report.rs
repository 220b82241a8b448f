use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Body offered when a report is started without any content.
pub const REPORT_TEMPLATE: &str =
    "[Work done]\n\n[Issues and solutions]\n\n[Learnings]\n\n[Reports and questions]\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
}

impl ReportStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ReportStatus::Draft),
            "submitted" => Some(ReportStatus::Submitted),
            _ => None,
        }
    }
}

/// Free-text report of one user for one week, keyed by `start_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub user_id: String,
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// ISO week number of `start`.
    pub week: u32,
    pub content: String,
    pub status: ReportStatus,
    pub submitted_at: Option<String>,
    pub updated_at: String,
}

impl WeeklyReport {
    pub fn report_id(start: NaiveDate, end: NaiveDate) -> String {
        format!("{}_{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    }

    pub fn week_of(start: NaiveDate) -> u32 {
        start.iso_week().week()
    }
}
