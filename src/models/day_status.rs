use serde::{Deserialize, Serialize};

/// Lifecycle of a work day: pending → working → completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    #[default]
    Pending,
    Working,
    Completed,
}

impl DayStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayStatus::Pending => "pending",
            DayStatus::Working => "working",
            DayStatus::Completed => "completed",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DayStatus::Pending),
            "working" => Some(DayStatus::Working),
            "completed" => Some(DayStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Pending => "not started",
            DayStatus::Working => "working",
            DayStatus::Completed => "completed",
        }
    }
}
