//! Database operations for trips, activities, and packing lists.
//!
//! All writes run inside transactions. Mutating operations on child rows
//! also touch the parent trip's `updated_at` so trip listings reflect the
//! latest change. The schema is embedded and applied idempotently on open.
//!
//! This layer stores validated values only; validation of user input
//! happens in [`crate::validate`] before anything reaches a connection.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, TripError},
    models::{Activity, PackingItem, PackingList, Trip, TripSummary},
    params::UpdatePackingItem,
    validate::{ValidAddPackingItem, ValidCreateActivity, ValidCreateTrip, ValidUpdateActivity,
        ValidUpdateTrip},
};

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?.parse::<Timestamp>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn trip_from_row(row: &Row<'_>) -> rusqlite::Result<Trip> {
    Ok(Trip {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        destination: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        description: row.get(5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
        activities: Vec::new(),
    })
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get::<_, i64>(0)? as u64,
        trip_id: row.get::<_, i64>(1)? as u64,
        name: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        location: row.get(5)?,
        notes: row.get(6)?,
        created_at: timestamp_column(row, 7)?,
        updated_at: timestamp_column(row, 8)?,
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<PackingItem> {
    Ok(PackingItem {
        id: row.get::<_, i64>(0)? as u64,
        packing_list_id: row.get::<_, i64>(1)? as u64,
        name: row.get(2)?,
        quantity: row.get::<_, i64>(3)? as u32,
        packed: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
    })
}

const TRIP_COLUMNS: &str =
    "id, name, destination, start_date, end_date, description, created_at, updated_at";
const ACTIVITY_COLUMNS: &str =
    "id, trip_id, name, date, time, location, notes, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, packing_list_id, name, quantity, packed, created_at";

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initializes the database schema using the embedded SQL file.
    fn initialize_schema(&self) -> Result<()> {
        // Foreign keys are per-connection in SQLite.
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(())
    }

    /// Creates a new trip from validated input.
    pub fn create_trip(&mut self, trip: &ValidCreateTrip) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            "INSERT INTO trips (name, destination, start_date, end_date, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &trip.name,
                &trip.destination,
                &trip.start_date,
                &trip.end_date,
                trip.description.as_deref(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert trip")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Trip {
            id,
            name: trip.name.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date.clone(),
            end_date: trip.end_date.clone(),
            description: trip.description.clone(),
            created_at: now,
            updated_at: now,
            activities: Vec::new(),
        })
    }

    /// Retrieves a trip by its ID, without activities.
    pub fn get_trip(&self, id: u64) -> Result<Option<Trip>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?1"))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], trip_from_row)
            .optional()
            .db_context("Failed to query trip")
    }

    /// Retrieves a trip with its activities loaded in itinerary order.
    pub fn get_trip_with_activities(&self, id: u64) -> Result<Option<Trip>> {
        let Some(mut trip) = self.get_trip(id)? else {
            return Ok(None);
        };
        trip.activities = self.list_activities(id)?;
        Ok(Some(trip))
    }

    /// Lists trip summaries, soonest start date first.
    ///
    /// When `not_ended_before` is given, trips whose last day is earlier
    /// than that date are filtered out.
    pub fn list_trips(&self, not_ended_before: Option<&str>) -> Result<Vec<TripSummary>> {
        let mut query = String::from(
            "SELECT id, name, destination, start_date, end_date, description, created_at, updated_at,
                    activity_count, total_items, packed_items
             FROM trip_summaries",
        );
        if not_ended_before.is_some() {
            query.push_str(" WHERE end_date >= ?1");
        }
        query.push_str(" ORDER BY start_date ASC, id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let map_row = |row: &Row<'_>| -> rusqlite::Result<TripSummary> {
            Ok(TripSummary {
                id: row.get::<_, i64>(0)? as u64,
                name: row.get(1)?,
                destination: row.get(2)?,
                start_date: row.get(3)?,
                end_date: row.get(4)?,
                description: row.get(5)?,
                created_at: timestamp_column(row, 6)?,
                updated_at: timestamp_column(row, 7)?,
                activity_count: row.get::<_, i64>(8)? as u32,
                total_items: row.get::<_, i64>(9)? as u32,
                packed_items: row.get::<_, i64>(10)? as u32,
            })
        };

        let rows = match not_ended_before {
            Some(date) => stmt.query_map(params![date], map_row),
            None => stmt.query_map([], map_row),
        }
        .db_context("Failed to query trips")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch trips")
    }

    /// Applies a validated partial update to a trip and returns the result.
    pub fn update_trip(&mut self, id: u64, changes: &ValidUpdateTrip) -> Result<Trip> {
        let mut trip = self.get_trip(id)?.ok_or(TripError::TripNotFound { id })?;

        if let Some(name) = &changes.name {
            trip.name = name.clone();
        }
        if let Some(destination) = &changes.destination {
            trip.destination = destination.clone();
        }
        if let Some(start) = &changes.start_date {
            trip.start_date = start.clone();
        }
        if let Some(end) = &changes.end_date {
            trip.end_date = end.clone();
        }
        if let Some(description) = &changes.description {
            trip.description = description.clone();
        }
        trip.updated_at = Timestamp::now();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            "UPDATE trips SET name = ?1, destination = ?2, start_date = ?3, end_date = ?4,
                    description = ?5, updated_at = ?6 WHERE id = ?7",
            params![
                &trip.name,
                &trip.destination,
                &trip.start_date,
                &trip.end_date,
                trip.description.as_deref(),
                trip.updated_at.to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(trip)
    }

    /// Deletes a trip and, via cascade, its activities and packing lists.
    pub fn delete_trip(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let rows = tx
            .execute("DELETE FROM trips WHERE id = ?1", params![id as i64])
            .db_context("Failed to delete trip")?;

        if rows == 0 {
            return Err(TripError::TripNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Retrieves an activity by its ID.
    pub fn get_activity(&self, id: u64) -> Result<Option<Activity>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1"
            ))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], activity_from_row)
            .optional()
            .db_context("Failed to query activity")
    }

    /// Lists a trip's activities in itinerary order.
    ///
    /// Sorted by date, then time; untimed activities lead their day
    /// (SQLite sorts NULL first, matching [`crate::datetime::compare_times`]).
    pub fn list_activities(&self, trip_id: u64) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities
                 WHERE trip_id = ?1 ORDER BY date ASC, time ASC, id ASC"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![trip_id as i64], activity_from_row)
            .db_context("Failed to query activities")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch activities")
    }

    /// Creates an activity from validated input and touches the parent trip.
    pub fn create_activity(&mut self, activity: &ValidCreateActivity) -> Result<Activity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM trips WHERE id = ?1)",
                params![activity.trip_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check trip existence")?;

        if !trip_exists {
            return Err(TripError::TripNotFound {
                id: activity.trip_id,
            });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            "INSERT INTO activities (trip_id, name, date, time, location, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                activity.trip_id as i64,
                &activity.name,
                &activity.date,
                activity.time.as_deref(),
                activity.location.as_deref(),
                activity.notes.as_deref(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert activity")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(
            "UPDATE trips SET updated_at = ?1 WHERE id = ?2",
            params![&now_str, activity.trip_id as i64],
        )
        .db_context("Failed to update trip timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Activity {
            id,
            trip_id: activity.trip_id,
            name: activity.name.clone(),
            date: activity.date.clone(),
            time: activity.time.clone(),
            location: activity.location.clone(),
            notes: activity.notes.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a validated partial update to an activity.
    pub fn update_activity(&mut self, id: u64, changes: &ValidUpdateActivity) -> Result<Activity> {
        let mut activity = self
            .get_activity(id)?
            .ok_or(TripError::ActivityNotFound { id })?;

        if let Some(name) = &changes.name {
            activity.name = name.clone();
        }
        if let Some(date) = &changes.date {
            activity.date = date.clone();
        }
        if let Some(time) = &changes.time {
            activity.time = time.clone();
        }
        if let Some(location) = &changes.location {
            activity.location = location.clone();
        }
        if let Some(notes) = &changes.notes {
            activity.notes = notes.clone();
        }
        activity.updated_at = Timestamp::now();
        let now_str = activity.updated_at.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            "UPDATE activities SET name = ?1, date = ?2, time = ?3, location = ?4, notes = ?5,
                    updated_at = ?6 WHERE id = ?7",
            params![
                &activity.name,
                &activity.date,
                activity.time.as_deref(),
                activity.location.as_deref(),
                activity.notes.as_deref(),
                &now_str,
                id as i64
            ],
        )
        .db_context("Failed to update activity")?;

        tx.execute(
            "UPDATE trips SET updated_at = ?1 WHERE id = ?2",
            params![&now_str, activity.trip_id as i64],
        )
        .db_context("Failed to update trip timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(activity)
    }

    /// Deletes an activity and touches the parent trip.
    pub fn delete_activity(&mut self, id: u64) -> Result<()> {
        let activity = self
            .get_activity(id)?
            .ok_or(TripError::ActivityNotFound { id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute("DELETE FROM activities WHERE id = ?1", params![id as i64])
            .db_context("Failed to delete activity")?;

        tx.execute(
            "UPDATE trips SET updated_at = ?1 WHERE id = ?2",
            params![Timestamp::now().to_string(), activity.trip_id as i64],
        )
        .db_context("Failed to update trip timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Creates a packing list on a trip.
    pub fn create_packing_list(&mut self, trip_id: u64, name: &str) -> Result<PackingList> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM trips WHERE id = ?1)",
                params![trip_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check trip existence")?;

        if !trip_exists {
            return Err(TripError::TripNotFound { id: trip_id });
        }

        let now = Timestamp::now();

        tx.execute(
            "INSERT INTO packing_lists (trip_id, name, created_at) VALUES (?1, ?2, ?3)",
            params![trip_id as i64, name, now.to_string()],
        )
        .db_context("Failed to insert packing list")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PackingList {
            id,
            trip_id,
            name: name.to_string(),
            created_at: now,
            items: Vec::new(),
        })
    }

    /// Retrieves a packing list with its items loaded.
    pub fn get_packing_list(&self, id: u64) -> Result<Option<PackingList>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, trip_id, name, created_at FROM packing_lists WHERE id = ?1",
            )
            .db_context("Failed to prepare query")?;

        let list = stmt
            .query_row(params![id as i64], |row| {
                Ok(PackingList {
                    id: row.get::<_, i64>(0)? as u64,
                    trip_id: row.get::<_, i64>(1)? as u64,
                    name: row.get(2)?,
                    created_at: timestamp_column(row, 3)?,
                    items: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query packing list")?;

        match list {
            Some(mut list) => {
                list.items = self.list_packing_items(list.id)?;
                Ok(Some(list))
            }
            None => Ok(None),
        }
    }

    /// Lists a trip's packing lists with their items loaded.
    pub fn list_packing_lists(&self, trip_id: u64) -> Result<Vec<PackingList>> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, trip_id, name, created_at FROM packing_lists
                 WHERE trip_id = ?1 ORDER BY id ASC",
            )
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![trip_id as i64], |row| {
                Ok(PackingList {
                    id: row.get::<_, i64>(0)? as u64,
                    trip_id: row.get::<_, i64>(1)? as u64,
                    name: row.get(2)?,
                    created_at: timestamp_column(row, 3)?,
                    items: Vec::new(),
                })
            })
            .db_context("Failed to query packing lists")?;

        let mut lists = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch packing lists")?;

        for list in &mut lists {
            list.items = self.list_packing_items(list.id)?;
        }
        Ok(lists)
    }

    fn list_packing_items(&self, packing_list_id: u64) -> Result<Vec<PackingItem>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM packing_items
                 WHERE packing_list_id = ?1 ORDER BY id ASC"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![packing_list_id as i64], item_from_row)
            .db_context("Failed to query packing items")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch packing items")
    }

    /// Adds a validated item to a packing list.
    pub fn add_packing_item(&mut self, item: &ValidAddPackingItem) -> Result<PackingItem> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let list_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM packing_lists WHERE id = ?1)",
                params![item.packing_list_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check packing list existence")?;

        if !list_exists {
            return Err(TripError::PackingListNotFound {
                id: item.packing_list_id,
            });
        }

        let now = Timestamp::now();

        tx.execute(
            "INSERT INTO packing_items (packing_list_id, name, quantity, packed, created_at)
             VALUES (?1, ?2, ?3, 0, ?4)",
            params![
                item.packing_list_id as i64,
                &item.name,
                i64::from(item.quantity),
                now.to_string()
            ],
        )
        .db_context("Failed to insert packing item")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PackingItem {
            id,
            packing_list_id: item.packing_list_id,
            name: item.name.clone(),
            quantity: item.quantity,
            packed: false,
            created_at: now,
        })
    }

    fn get_packing_item(&self, id: u64) -> Result<Option<PackingItem>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM packing_items WHERE id = ?1"
            ))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], item_from_row)
            .optional()
            .db_context("Failed to query packing item")
    }

    /// Applies a validated partial update to a packing item.
    pub fn update_packing_item(
        &mut self,
        changes: &UpdatePackingItem,
    ) -> Result<PackingItem> {
        let mut item = self
            .get_packing_item(changes.id)?
            .ok_or(TripError::PackingItemNotFound { id: changes.id })?;

        if let Some(name) = &changes.name {
            item.name = name.trim().to_string();
        }
        if let Some(quantity) = changes.quantity {
            item.quantity = quantity;
        }
        if let Some(packed) = changes.packed {
            item.packed = packed;
        }

        self.connection
            .execute(
                "UPDATE packing_items SET name = ?1, quantity = ?2, packed = ?3 WHERE id = ?4",
                params![
                    &item.name,
                    i64::from(item.quantity),
                    item.packed,
                    changes.id as i64
                ],
            )
            .db_context("Failed to update packing item")?;

        Ok(item)
    }

    /// Flips an item's packed flag and returns the new state.
    pub fn toggle_packed(&mut self, id: u64) -> Result<PackingItem> {
        let mut item = self
            .get_packing_item(id)?
            .ok_or(TripError::PackingItemNotFound { id })?;

        item.packed = !item.packed;
        self.connection
            .execute(
                "UPDATE packing_items SET packed = ?1 WHERE id = ?2",
                params![item.packed, id as i64],
            )
            .db_context("Failed to toggle packing item")?;

        Ok(item)
    }

    /// Deletes a packing item.
    pub fn delete_packing_item(&mut self, id: u64) -> Result<()> {
        let rows = self
            .connection
            .execute("DELETE FROM packing_items WHERE id = ?1", params![id as i64])
            .db_context("Failed to delete packing item")?;

        if rows == 0 {
            return Err(TripError::PackingItemNotFound { id });
        }
        Ok(())
    }

    /// Deletes a packing list.
    ///
    /// A list that still contains items is only deleted when `force` is
    /// set; otherwise the call fails so items are not lost by accident.
    pub fn delete_packing_list(&mut self, id: u64, force: bool) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let count: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM packing_items WHERE packing_list_id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to count packing items")?;

        if count > 0 && !force {
            return Err(TripError::PackingListNotEmpty {
                id,
                count: count as u32,
            });
        }

        let rows = tx
            .execute("DELETE FROM packing_lists WHERE id = ?1", params![id as i64])
            .db_context("Failed to delete packing list")?;

        if rows == 0 {
            return Err(TripError::PackingListNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
