use serde::{Deserialize, Serialize};

/// Month-level totals for one user. Always re-derived from the day records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub user_id: String,
    pub year_month: String,
    pub total_minutes: i64,
    pub overtime_minutes: i64,
    pub updated_at: String,
}
