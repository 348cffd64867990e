use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpState {
    Unscheduled,
    Overdue,
    Today,
    Soon,
    Scheduled,
}

/// Buckets a lead's follow-up date for the outreach worklist. Follow-ups
/// are day-granular, so the comparison is plain date arithmetic.
pub fn compute_follow_up_state(
    today: NaiveDate,
    next_action_date: Option<NaiveDate>,
    soon_days: i64,
) -> FollowUpState {
    let next = match next_action_date {
        Some(value) => value,
        None => return FollowUpState::Unscheduled,
    };

    if next < today {
        return FollowUpState::Overdue;
    }
    if next == today {
        return FollowUpState::Today;
    }
    if next <= today + Duration::days(soon_days) {
        return FollowUpState::Soon;
    }

    FollowUpState::Scheduled
}
