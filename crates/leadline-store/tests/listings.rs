use leadline_core::domain::{ListingStatus, PropertyType};
use leadline_store::error::StoreErrorKind;
use leadline_store::repo::{ListingNew, QueryNew};
use leadline_store::Store;

const NOW: i64 = 1_700_000_000;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn listing(title: &str, property_type: PropertyType) -> ListingNew {
    ListingNew {
        title: title.to_string(),
        description: None,
        price: None,
        location: None,
        size: None,
        property_type,
        listing_category: None,
        brochure_url: None,
    }
}

#[test]
fn create_get_and_filter_by_type() {
    let store = store();
    let residential = store
        .listings()
        .create(NOW, listing("Sea View Residency", PropertyType::Residential))
        .expect("create residential");
    store
        .listings()
        .create(NOW + 1, listing("Tech Park Offices", PropertyType::Commercial))
        .expect("create commercial");

    let fetched = store
        .listings()
        .get(residential.id)
        .expect("get listing")
        .expect("listing exists");
    assert_eq!(fetched.title, "Sea View Residency");
    assert_eq!(fetched.listing_category, "Standard");
    assert_eq!(fetched.status, ListingStatus::Active);

    let all = store.listings().list(None).expect("list all");
    assert_eq!(all.len(), 2);

    let commercial = store
        .listings()
        .list(Some(PropertyType::Commercial))
        .expect("list commercial");
    assert_eq!(commercial.len(), 1);
    assert_eq!(commercial[0].title, "Tech Park Offices");
}

#[test]
fn inactive_listings_drop_out_of_the_catalog() {
    let store = store();
    let created = store
        .listings()
        .create(NOW, listing("Sea View Residency", PropertyType::Residential))
        .expect("create listing");

    store
        .listings()
        .set_status(NOW + 5, created.id, ListingStatus::Sold)
        .expect("mark sold");

    assert!(store.listings().list(None).expect("list").is_empty());
    // Direct lookup still works for history display.
    assert!(store.listings().get(created.id).expect("get").is_some());
}

#[test]
fn deleting_a_listing_keeps_interaction_snapshots() {
    let store = store();
    let created = store
        .listings()
        .create(NOW, listing("Sea View Residency", PropertyType::Residential))
        .expect("create listing");

    let outcome = store
        .intake()
        .submit_query(
            NOW + 10,
            QueryNew {
                name: "Arun Mehta".to_string(),
                phone: "9123456780".to_string(),
                email: None,
                source: "Website".to_string(),
                listing_id: Some(created.id),
                message: None,
            },
        )
        .expect("query against listing");
    assert_eq!(outcome.interaction.property_name, "Sea View Residency");

    store.listings().delete(created.id).expect("delete listing");

    let history = store
        .interactions()
        .list_for_lead(outcome.lead.id, 10, 0)
        .expect("history");
    assert_eq!(history.len(), 1);
    assert!(history[0].listing_id.is_none());
    assert_eq!(history[0].property_name, "Sea View Residency");
}

#[test]
fn missing_listing_operations_are_not_found() {
    let store = store();
    let missing = leadline_core::domain::ListingId::new();
    assert_eq!(
        store
            .listings()
            .set_status(NOW, missing, ListingStatus::Inactive)
            .expect_err("missing listing")
            .kind(),
        StoreErrorKind::NotFound
    );
    assert_eq!(
        store.listings().delete(missing).expect_err("missing listing").kind(),
        StoreErrorKind::NotFound
    );
}
