use crate::domain::{InteractionKind, LeadStatus, LeadTemperature};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An event that can touch a lead. Self-serve events come from the public
/// intake paths; `ActivityLogged` comes from the staff side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadEvent {
    BrochureRequested,
    QuerySubmitted,
    ActivityLogged {
        kind: InteractionKind,
        follow_up: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTransition {
    pub status: LeadStatus,
    pub temperature: LeadTemperature,
    pub next_action_date: Option<NaiveDate>,
}

/// The shared decision table for lead state. Total over every
/// (status, event) pair; no event is ever rejected.
///
/// Status only ever advances from `New`: a brochure request signals concrete
/// interest, a bare query leaves it alone, staff contact moves it to
/// `Contacted` (or `SiteVisitScheduled` for a site visit). Any status past
/// `New` is staff-owned and never changed by an event. Temperature only
/// escalates. `next_action_date` is replaced only when the event carries a
/// follow-up date.
pub fn next_state(
    status: LeadStatus,
    temperature: LeadTemperature,
    next_action_date: Option<NaiveDate>,
    event: &LeadEvent,
) -> LeadTransition {
    let temperature = match event {
        LeadEvent::BrochureRequested => temperature.escalate(LeadTemperature::Hot),
        LeadEvent::QuerySubmitted => temperature.escalate(LeadTemperature::Warm),
        LeadEvent::ActivityLogged { .. } => temperature,
    };

    let status = if status == LeadStatus::New {
        match event {
            LeadEvent::BrochureRequested => LeadStatus::Interested,
            LeadEvent::QuerySubmitted => LeadStatus::New,
            LeadEvent::ActivityLogged { kind, .. } if kind.is_site_visit() => {
                LeadStatus::SiteVisitScheduled
            }
            LeadEvent::ActivityLogged { .. } => LeadStatus::Contacted,
        }
    } else {
        status
    };

    let next_action_date = match event {
        LeadEvent::ActivityLogged {
            follow_up: Some(date),
            ..
        } => Some(*date),
        _ => next_action_date,
    };

    LeadTransition {
        status,
        temperature,
        next_action_date,
    }
}

#[cfg(test)]
mod tests {
    use super::{next_state, LeadEvent};
    use crate::domain::{InteractionKind, LeadStatus, LeadTemperature};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn brochure_advances_new_to_interested_and_hot() {
        let next = next_state(
            LeadStatus::New,
            LeadTemperature::Cold,
            None,
            &LeadEvent::BrochureRequested,
        );
        assert_eq!(next.status, LeadStatus::Interested);
        assert_eq!(next.temperature, LeadTemperature::Hot);
        assert_eq!(next.next_action_date, None);
    }

    #[test]
    fn query_keeps_new_status_and_warms_cold_lead() {
        let next = next_state(
            LeadStatus::New,
            LeadTemperature::Cold,
            None,
            &LeadEvent::QuerySubmitted,
        );
        assert_eq!(next.status, LeadStatus::New);
        assert_eq!(next.temperature, LeadTemperature::Warm);
    }

    #[test]
    fn query_never_cools_a_hot_lead() {
        let next = next_state(
            LeadStatus::New,
            LeadTemperature::Hot,
            None,
            &LeadEvent::QuerySubmitted,
        );
        assert_eq!(next.temperature, LeadTemperature::Hot);
    }

    #[test]
    fn site_visit_schedules_new_lead() {
        let next = next_state(
            LeadStatus::New,
            LeadTemperature::Warm,
            None,
            &LeadEvent::ActivityLogged {
                kind: InteractionKind::SiteVisit,
                follow_up: Some(date(2024, 6, 1)),
            },
        );
        assert_eq!(next.status, LeadStatus::SiteVisitScheduled);
        assert_eq!(next.temperature, LeadTemperature::Warm);
        assert_eq!(next.next_action_date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn other_activity_moves_new_lead_to_contacted() {
        let next = next_state(
            LeadStatus::New,
            LeadTemperature::Warm,
            None,
            &LeadEvent::ActivityLogged {
                kind: InteractionKind::Call,
                follow_up: None,
            },
        );
        assert_eq!(next.status, LeadStatus::Contacted);
    }

    #[test]
    fn status_past_new_is_never_changed_by_any_event() {
        let events = [
            LeadEvent::BrochureRequested,
            LeadEvent::QuerySubmitted,
            LeadEvent::ActivityLogged {
                kind: InteractionKind::SiteVisit,
                follow_up: None,
            },
            LeadEvent::ActivityLogged {
                kind: InteractionKind::Call,
                follow_up: None,
            },
        ];
        for status in LeadStatus::all() {
            if *status == LeadStatus::New {
                continue;
            }
            for event in &events {
                let next = next_state(*status, LeadTemperature::Warm, None, event);
                assert_eq!(next.status, *status, "event {event:?} moved {status:?}");
            }
        }
    }

    #[test]
    fn temperature_never_downgrades_for_any_status_event_pair() {
        let events = [
            LeadEvent::BrochureRequested,
            LeadEvent::QuerySubmitted,
            LeadEvent::ActivityLogged {
                kind: InteractionKind::Call,
                follow_up: None,
            },
        ];
        for status in LeadStatus::all() {
            for event in &events {
                let next = next_state(*status, LeadTemperature::Hot, None, event);
                assert_eq!(next.temperature, LeadTemperature::Hot);
            }
        }
    }

    #[test]
    fn follow_up_date_replaces_existing_next_action() {
        let existing = Some(date(2024, 5, 1));
        let next = next_state(
            LeadStatus::Contacted,
            LeadTemperature::Warm,
            existing,
            &LeadEvent::ActivityLogged {
                kind: InteractionKind::Call,
                follow_up: Some(date(2024, 7, 15)),
            },
        );
        assert_eq!(next.next_action_date, Some(date(2024, 7, 15)));
    }

    #[test]
    fn events_without_follow_up_leave_next_action_untouched() {
        let existing = Some(date(2024, 5, 1));
        for event in [
            LeadEvent::BrochureRequested,
            LeadEvent::QuerySubmitted,
            LeadEvent::ActivityLogged {
                kind: InteractionKind::Call,
                follow_up: None,
            },
        ] {
            let next = next_state(LeadStatus::Interested, LeadTemperature::Warm, existing, &event);
            assert_eq!(next.next_action_date, existing);
        }
    }
}
