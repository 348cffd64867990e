use chrono::NaiveDate;
use leadline_core::domain::{InteractionKind, LeadStatus, LeadTemperature};
use leadline_core::time::utc_date;
use leadline_store::error::StoreErrorKind;
use leadline_store::repo::{ActivityNew, QueryNew, ReconcileRequest, StaffNew};
use leadline_store::Store;

const NOW: i64 = 1_700_000_000;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn query_request(phone: &str, source: &str) -> ReconcileRequest {
    ReconcileRequest {
        phone: phone.to_string(),
        name: "Arun Mehta".to_string(),
        email: None,
        source: source.to_string(),
        brochure_request: false,
    }
}

fn team_member(store: &Store, username: &str) -> leadline_core::domain::Staff {
    store
        .staff()
        .create(
            NOW,
            StaffNew {
                username: username.to_string(),
                full_name: "Kiran Rao".to_string(),
                phone: None,
                role: leadline_core::domain::StaffRole::Team,
            },
        )
        .expect("create staff")
}

fn lead_with_follow_up(store: &Store, phone: &str, staff: &leadline_core::domain::Staff, follow_up: NaiveDate) {
    store
        .intake()
        .submit_query(NOW, QueryNew {
            name: "Arun Mehta".to_string(),
            phone: phone.to_string(),
            email: None,
            source: "Website".to_string(),
            listing_id: None,
            message: None,
        })
        .expect("query");
    store
        .activity()
        .log(
            NOW + 10,
            staff.id,
            ActivityNew {
                phone: phone.to_string(),
                kind: InteractionKind::Call,
                notes: "spoke briefly".to_string(),
                next_action: None,
                next_follow_up_date: Some(follow_up),
                site_visit_status: None,
            },
        )
        .expect("log activity");
}

#[test]
fn reconcile_is_idempotent_per_phone() {
    let store = store();
    let first = store
        .leads()
        .reconcile(NOW, query_request("9123456780", "Website"))
        .expect("first reconcile");
    let second = store
        .leads()
        .reconcile(NOW + 5, query_request("9123456780", "Website"))
        .expect("second reconcile");

    assert_eq!(first.id, second.id);
    let leads = store.leads().list(None, 100, 0).expect("list");
    assert_eq!(leads.len(), 1);
}

#[test]
fn reconcile_rejects_unnormalized_phone() {
    let store = store();
    for raw in ["+919123456780", "91234-56780", "12345", "not a phone"] {
        let err = store
            .leads()
            .reconcile(NOW, query_request(raw, "Website"))
            .expect_err("phone must be pre-normalized");
        assert_eq!(err.kind(), StoreErrorKind::Core, "accepted {raw:?}");
    }
}

#[test]
fn lead_source_is_first_touch_only() {
    let store = store();
    let first = store
        .leads()
        .reconcile(NOW, query_request("9123456780", "Website"))
        .expect("first reconcile");

    let mut brochure = query_request("9123456780", "Brochure Download");
    brochure.brochure_request = true;
    let second = store
        .leads()
        .reconcile(NOW + 5, brochure)
        .expect("brochure reconcile");

    assert_eq!(second.id, first.id);
    assert_eq!(second.lead_source, "Website");
}

#[test]
fn temperature_only_escalates() {
    let store = store();
    let mut brochure = query_request("9123456780", "Website");
    brochure.brochure_request = true;
    let hot = store.leads().reconcile(NOW, brochure).expect("brochure");
    assert_eq!(hot.temperature, LeadTemperature::Hot);

    let after_query = store
        .leads()
        .reconcile(NOW + 5, query_request("9123456780", "Website"))
        .expect("query");
    assert_eq!(after_query.temperature, LeadTemperature::Hot);
}

#[test]
fn list_orders_follow_ups_before_unscheduled_leads() {
    let store = store();
    let staff = team_member(&store, "kiran");

    store
        .leads()
        .reconcile(NOW, query_request("9000000001", "Website"))
        .expect("unscheduled lead");
    lead_with_follow_up(&store, "9000000002", &staff, date(2024, 3, 1));
    lead_with_follow_up(&store, "9000000003", &staff, date(2024, 2, 1));

    let leads = store.leads().list(None, 50, 0).expect("list");
    assert_eq!(leads.len(), 3);
    assert_eq!(leads[0].phone, "9000000003");
    assert_eq!(leads[1].phone, "9000000002");
    assert_eq!(leads[2].phone, "9000000001");
}

#[test]
fn list_filters_by_status() {
    let store = store();
    let lead = store
        .leads()
        .reconcile(NOW, query_request("9000000001", "Website"))
        .expect("lead");
    store
        .leads()
        .reconcile(NOW, query_request("9000000002", "Website"))
        .expect("lead");
    store
        .leads()
        .set_status(NOW + 5, lead.id, LeadStatus::Converted)
        .expect("set status");

    let converted = store
        .leads()
        .list(Some(LeadStatus::Converted), 50, 0)
        .expect("list converted");
    assert_eq!(converted.len(), 1);
    assert_eq!(converted[0].id, lead.id);

    let new = store.leads().list(Some(LeadStatus::New), 50, 0).expect("list new");
    assert_eq!(new.len(), 1);
}

#[test]
fn list_validates_pagination() {
    let store = store();
    assert_eq!(
        store.leads().list(None, 0, 0).expect_err("zero limit").kind(),
        StoreErrorKind::Core
    );
    assert_eq!(
        store.leads().list(None, 101, 0).expect_err("oversized limit").kind(),
        StoreErrorKind::Core
    );
    assert_eq!(
        store.leads().list(None, 10, -1).expect_err("negative offset").kind(),
        StoreErrorKind::Core
    );
}

#[test]
fn set_notes_validates_and_persists() {
    let store = store();
    let lead = store
        .leads()
        .reconcile(NOW, query_request("9123456780", "Website"))
        .expect("lead");

    let updated = store
        .leads()
        .set_notes(NOW + 5, lead.id, "prefers weekend calls")
        .expect("set notes");
    assert_eq!(updated.notes.as_deref(), Some("prefers weekend calls"));

    let too_long = "x".repeat(2001);
    assert_eq!(
        store
            .leads()
            .set_notes(NOW + 6, lead.id, &too_long)
            .expect_err("note too long")
            .kind(),
        StoreErrorKind::Core
    );
}

#[test]
fn operations_on_missing_lead_are_not_found() {
    let store = store();
    let missing = leadline_core::domain::LeadId::new();
    assert_eq!(
        store
            .leads()
            .set_status(NOW, missing, LeadStatus::Lost)
            .expect_err("missing lead")
            .kind(),
        StoreErrorKind::NotFound
    );
    assert_eq!(
        store.leads().delete(missing).expect_err("missing lead").kind(),
        StoreErrorKind::NotFound
    );
}

#[test]
fn deleting_a_lead_keeps_its_history() {
    let store = store();
    let outcome = store
        .intake()
        .submit_query(
            NOW,
            QueryNew {
                name: "Arun Mehta".to_string(),
                phone: "9123456780".to_string(),
                email: None,
                source: "Website".to_string(),
                listing_id: None,
                message: None,
            },
        )
        .expect("query");

    store.leads().delete(outcome.lead.id).expect("delete lead");

    assert_eq!(store.interactions().count().expect("count"), 1);
    let orphaned: i64 = store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM interactions WHERE lead_id IS NULL;",
            [],
            |row| row.get(0),
        )
        .expect("count orphaned");
    assert_eq!(orphaned, 1);
}

#[test]
fn worklist_returns_due_leads_in_date_order() {
    let store = store();
    let staff = team_member(&store, "kiran");
    let today = utc_date(NOW + 10);

    lead_with_follow_up(&store, "9000000001", &staff, today - chrono::Duration::days(3));
    lead_with_follow_up(&store, "9000000002", &staff, today);
    lead_with_follow_up(&store, "9000000003", &staff, today + chrono::Duration::days(5));
    // Outside the soon window, must not appear.
    lead_with_follow_up(&store, "9000000004", &staff, today + chrono::Duration::days(30));

    let due = store.leads().worklist(today, 7).expect("worklist");
    let phones: Vec<&str> = due.iter().map(|lead| lead.phone.as_str()).collect();
    assert_eq!(phones, vec!["9000000001", "9000000002", "9000000003"]);
}

#[test]
fn worklist_validates_soon_days() {
    let store = store();
    assert_eq!(
        store
            .leads()
            .worklist(utc_date(NOW), 0)
            .expect_err("zero soon days")
            .kind(),
        StoreErrorKind::Core
    );
}
