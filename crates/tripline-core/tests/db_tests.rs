use tempfile::NamedTempFile;
use tripline_core::params::{AddPackingItem, CreateActivity, CreateTrip, UpdatePackingItem};
use tripline_core::validate::{
    validate_add_packing_item, validate_create_activity, validate_create_trip,
    ValidUpdateActivity, ValidUpdateTrip,
};
use tripline_core::{Database, TripError};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn create_trip(db: &mut Database, name: &str, start: &str, end: &str) -> tripline_core::Trip {
    let valid = validate_create_trip(&CreateTrip {
        name: name.to_string(),
        destination: "Honolulu".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        description: None,
    })
    .expect("Trip params should validate");
    db.create_trip(&valid).expect("Failed to create trip")
}

fn create_activity(
    db: &mut Database,
    trip: &tripline_core::Trip,
    name: &str,
    date: &str,
    time: Option<&str>,
) -> tripline_core::Activity {
    let valid = validate_create_activity(
        &CreateActivity {
            trip_id: trip.id,
            name: name.to_string(),
            date: date.to_string(),
            time: time.map(String::from),
            location: None,
            notes: None,
        },
        &trip.date_range(),
    )
    .expect("Activity params should validate");
    db.create_activity(&valid).expect("Failed to create activity")
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());
}

#[test]
fn test_create_trip() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");

    assert!(trip.id > 0);
    assert_eq!(trip.name, "Hawaii Vacation");
    assert_eq!(trip.destination, "Honolulu");
    assert!(trip.activities.is_empty());
}

#[test]
fn test_get_trip() {
    let (_temp_file, mut db) = create_test_db();

    let created = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");

    let retrieved = db
        .get_trip(created.id)
        .expect("Failed to get trip")
        .expect("Trip should exist");

    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.name, "Hawaii Vacation");
    assert_eq!(retrieved.start_date, "2024-06-15");

    assert!(db.get_trip(9999).expect("Query should succeed").is_none());
}

#[test]
fn test_list_trips_sorted_by_start_date() {
    let (_temp_file, mut db) = create_test_db();

    create_trip(&mut db, "Later Trip", "2024-09-01", "2024-09-05");
    create_trip(&mut db, "Earlier Trip", "2024-03-01", "2024-03-10");

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].name, "Earlier Trip");
    assert_eq!(trips[1].name, "Later Trip");
}

#[test]
fn test_list_trips_filters_ended_trips() {
    let (_temp_file, mut db) = create_test_db();

    create_trip(&mut db, "Past Trip", "2024-03-01", "2024-03-10");
    create_trip(&mut db, "Current Trip", "2024-06-10", "2024-06-20");
    create_trip(&mut db, "Future Trip", "2024-09-01", "2024-09-05");

    let trips = db
        .list_trips(Some("2024-06-15"))
        .expect("Failed to list trips");
    let names: Vec<&str> = trips.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Current Trip", "Future Trip"]);
}

#[test]
fn test_list_trips_includes_counters() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", Some("09:30"));
    create_activity(&mut db, &trip, "Luau", "2024-06-18", Some("18:00"));

    let list = db
        .create_packing_list(trip.id, "Beach Gear")
        .expect("Failed to create packing list");
    let item = validate_add_packing_item(&AddPackingItem {
        packing_list_id: list.id,
        name: "Towel".to_string(),
        quantity: 2,
    })
    .unwrap();
    let item = db.add_packing_item(&item).expect("Failed to add item");
    db.toggle_packed(item.id).expect("Failed to toggle item");

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips[0].activity_count, 2);
    assert_eq!(trips[0].total_items, 1);
    assert_eq!(trips[0].packed_items, 1);
}

#[test]
fn test_update_trip_partial() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");

    let updated = db
        .update_trip(
            trip.id,
            &ValidUpdateTrip {
                destination: Some("Maui".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update trip");

    assert_eq!(updated.destination, "Maui");
    // Untouched fields keep their values.
    assert_eq!(updated.name, "Hawaii Vacation");
    assert_eq!(updated.start_date, "2024-06-15");
    assert!(updated.updated_at >= trip.updated_at);
}

#[test]
fn test_update_trip_not_found() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .update_trip(42, &ValidUpdateTrip::default())
        .expect_err("Update of missing trip should fail");
    assert!(matches!(err, TripError::TripNotFound { id: 42 }));
}

#[test]
fn test_delete_trip_cascades() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let activity = create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", None);
    let list = db
        .create_packing_list(trip.id, "Beach Gear")
        .expect("Failed to create packing list");

    db.delete_trip(trip.id).expect("Failed to delete trip");

    assert!(db.get_trip(trip.id).unwrap().is_none());
    assert!(db.get_activity(activity.id).unwrap().is_none());
    assert!(db.get_packing_list(list.id).unwrap().is_none());
}

#[test]
fn test_delete_trip_not_found() {
    let (_temp_file, mut db) = create_test_db();
    let err = db.delete_trip(7).expect_err("Delete should fail");
    assert!(matches!(err, TripError::TripNotFound { id: 7 }));
}

#[test]
fn test_activities_ordered_untimed_first() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    create_activity(&mut db, &trip, "Luau", "2024-06-17", Some("18:00"));
    create_activity(&mut db, &trip, "Beach day", "2024-06-17", None);
    create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", Some("09:30"));
    create_activity(&mut db, &trip, "Arrival", "2024-06-15", Some("13:00"));

    let activities = db.list_activities(trip.id).expect("Failed to list");
    let names: Vec<&str> = activities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Arrival", "Beach day", "Snorkeling", "Luau"]);
}

#[test]
fn test_create_activity_touches_trip() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", None);

    let reloaded = db.get_trip(trip.id).unwrap().unwrap();
    assert!(reloaded.updated_at >= trip.updated_at);
}

#[test]
fn test_update_activity_clearing_time() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let activity = create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", Some("09:30"));

    let updated = db
        .update_activity(
            activity.id,
            &ValidUpdateActivity {
                time: Some(None),
                ..Default::default()
            },
        )
        .expect("Failed to update activity");

    assert_eq!(updated.time, None);
    assert_eq!(updated.name, "Snorkeling");
}

#[test]
fn test_delete_activity() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let activity = create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", None);

    db.delete_activity(activity.id).expect("Failed to delete");
    assert!(db.get_activity(activity.id).unwrap().is_none());

    let err = db.delete_activity(activity.id).expect_err("Already gone");
    assert!(matches!(err, TripError::ActivityNotFound { .. }));
}

#[test]
fn test_packing_list_round_trip() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let list = db
        .create_packing_list(trip.id, "Beach Gear")
        .expect("Failed to create packing list");

    let item = validate_add_packing_item(&AddPackingItem {
        packing_list_id: list.id,
        name: "Towel".to_string(),
        quantity: 2,
    })
    .unwrap();
    let item = db.add_packing_item(&item).expect("Failed to add item");
    assert!(!item.packed);
    assert_eq!(item.quantity, 2);

    let loaded = db
        .get_packing_list(list.id)
        .expect("Failed to get list")
        .expect("List should exist");
    assert_eq!(loaded.items.len(), 1);
    assert_eq!(loaded.items[0].name, "Towel");
    assert_eq!(loaded.progress().total, 1);
    assert_eq!(loaded.progress().packed, 0);
}

#[test]
fn test_packing_list_requires_existing_trip() {
    let (_temp_file, mut db) = create_test_db();

    let err = db
        .create_packing_list(99, "Orphan List")
        .expect_err("Should fail without trip");
    assert!(matches!(err, TripError::TripNotFound { id: 99 }));
}

#[test]
fn test_toggle_packed() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let list = db.create_packing_list(trip.id, "Beach Gear").unwrap();
    let item = validate_add_packing_item(&AddPackingItem {
        packing_list_id: list.id,
        name: "Sunscreen".to_string(),
        quantity: 1,
    })
    .unwrap();
    let item = db.add_packing_item(&item).unwrap();

    let toggled = db.toggle_packed(item.id).expect("Failed to toggle");
    assert!(toggled.packed);
    let toggled = db.toggle_packed(item.id).expect("Failed to toggle back");
    assert!(!toggled.packed);
}

#[test]
fn test_update_packing_item() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let list = db.create_packing_list(trip.id, "Beach Gear").unwrap();
    let item = validate_add_packing_item(&AddPackingItem {
        packing_list_id: list.id,
        name: "Towel".to_string(),
        quantity: 1,
    })
    .unwrap();
    let item = db.add_packing_item(&item).unwrap();

    let updated = db
        .update_packing_item(&UpdatePackingItem {
            id: item.id,
            quantity: Some(3),
            packed: Some(true),
            ..Default::default()
        })
        .expect("Failed to update item");

    assert_eq!(updated.quantity, 3);
    assert!(updated.packed);
    assert_eq!(updated.name, "Towel");
}

#[test]
fn test_delete_packing_list_refuses_non_empty() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    let list = db.create_packing_list(trip.id, "Beach Gear").unwrap();
    let item = validate_add_packing_item(&AddPackingItem {
        packing_list_id: list.id,
        name: "Towel".to_string(),
        quantity: 1,
    })
    .unwrap();
    db.add_packing_item(&item).unwrap();

    let err = db
        .delete_packing_list(list.id, false)
        .expect_err("Non-empty list should not delete");
    assert!(matches!(
        err,
        TripError::PackingListNotEmpty { count: 1, .. }
    ));

    // Force deletion removes the list and its items.
    db.delete_packing_list(list.id, true)
        .expect("Forced delete should succeed");
    assert!(db.get_packing_list(list.id).unwrap().is_none());
}

#[test]
fn test_get_trip_with_activities() {
    let (_temp_file, mut db) = create_test_db();

    let trip = create_trip(&mut db, "Hawaii Vacation", "2024-06-15", "2024-06-22");
    create_activity(&mut db, &trip, "Snorkeling", "2024-06-17", Some("09:30"));

    let loaded = db
        .get_trip_with_activities(trip.id)
        .expect("Failed to load trip")
        .expect("Trip should exist");
    assert_eq!(loaded.activities.len(), 1);
    assert_eq!(loaded.activities[0].name, "Snorkeling");
}
