use leadline_core::domain::PropertyType;
use leadline_store::error::StoreErrorKind;
use leadline_store::repo::ListingNew;
use leadline_store::Store;
use tempfile::TempDir;

const NOW: i64 = 1_700_000_000;

#[test]
fn backup_copies_the_database() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("leadline.sqlite3");
    let backup_path = temp.path().join("backup.sqlite3");

    let store = Store::open(&db_path).expect("open store");
    store.migrate().expect("migrate");
    store
        .listings()
        .create(
            NOW,
            ListingNew {
                title: "Sea View Residency".to_string(),
                description: None,
                price: None,
                location: None,
                size: None,
                property_type: PropertyType::Residential,
                listing_category: None,
                brochure_url: None,
            },
        )
        .expect("create listing");

    store.backup_to(&backup_path).expect("backup");

    let restored = Store::open(&backup_path).expect("open backup");
    let listings = restored.listings().list(None).expect("list listings");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Sea View Residency");
}

#[test]
fn backup_refuses_the_live_database_path() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("leadline.sqlite3");

    let store = Store::open(&db_path).expect("open store");
    store.migrate().expect("migrate");

    let err = store.backup_to(&db_path).expect_err("live db path");
    assert_eq!(err.kind(), StoreErrorKind::InvalidBackupPath);
}
