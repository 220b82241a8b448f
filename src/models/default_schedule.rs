use super::break_period::BreakSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-user break template applied to days on or after `effective_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DefaultBreakSchedule {
    pub periods: BreakSchedule,
    pub effective_from: Option<NaiveDate>,
}

impl DefaultBreakSchedule {
    /// Periods that apply to `work_date`; empty before `effective_from`.
    pub fn periods_for(&self, work_date: NaiveDate) -> BreakSchedule {
        match self.effective_from {
            Some(from) if from > work_date => BreakSchedule::empty(),
            _ => self.periods.clone(),
        }
    }
}
