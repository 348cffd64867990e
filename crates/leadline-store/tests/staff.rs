use leadline_core::domain::StaffRole;
use leadline_store::error::StoreErrorKind;
use leadline_store::repo::StaffNew;
use leadline_store::Store;

const NOW: i64 = 1_700_000_000;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn member(username: &str, role: StaffRole) -> StaffNew {
    StaffNew {
        username: username.to_string(),
        full_name: "Kiran Rao".to_string(),
        phone: Some("98200 12345".to_string()),
        role,
    }
}

#[test]
fn create_find_and_authenticate() {
    let store = store();
    let created = store
        .staff()
        .create(NOW, member("Kiran", StaffRole::Team))
        .expect("create staff");
    assert_eq!(created.username, "kiran");
    assert_eq!(created.phone.as_deref(), Some("9820012345"));
    assert!(created.is_active);

    let found = store
        .staff()
        .find_by_username("KIRAN")
        .expect("find")
        .expect("exists");
    assert_eq!(found.id, created.id);

    let authed = store.staff().authenticate("kiran").expect("authenticate");
    assert_eq!(authed.id, created.id);
}

#[test]
fn duplicate_usernames_conflict() {
    let store = store();
    store
        .staff()
        .create(NOW, member("kiran", StaffRole::Team))
        .expect("create staff");

    let err = store
        .staff()
        .create(NOW + 1, member("Kiran", StaffRole::Admin))
        .expect_err("duplicate username");
    assert_eq!(err.kind(), StoreErrorKind::Conflict);
}

#[test]
fn deactivated_staff_cannot_authenticate() {
    let store = store();
    let created = store
        .staff()
        .create(NOW, member("kiran", StaffRole::Team))
        .expect("create staff");

    store.staff().deactivate(created.id).expect("deactivate");

    let err = store
        .staff()
        .authenticate("kiran")
        .expect_err("deactivated account");
    assert_eq!(err.kind(), StoreErrorKind::Unauthorized);
}

#[test]
fn unknown_staff_is_unauthorized() {
    let store = store();
    let err = store
        .staff()
        .authenticate("nobody")
        .expect_err("unknown account");
    assert_eq!(err.kind(), StoreErrorKind::Unauthorized);
}

#[test]
fn list_orders_by_username() {
    let store = store();
    store
        .staff()
        .create(NOW, member("ravi", StaffRole::Admin))
        .expect("create staff");
    store
        .staff()
        .create(NOW + 1, member("anita", StaffRole::Team))
        .expect("create staff");

    let all = store.staff().list().expect("list staff");
    let usernames: Vec<&str> = all.iter().map(|member| member.username.as_str()).collect();
    assert_eq!(usernames, vec!["anita", "ravi"]);
}
