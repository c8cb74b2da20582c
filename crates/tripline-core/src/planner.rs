//! High-level trip planner API with async support.
//!
//! [`Planner`] is the facade front ends talk to. Each operation validates
//! its input, opens the database on a blocking worker thread via
//! [`tokio::task::spawn_blocking`], and performs the whole read-validate-
//! write sequence there, since rusqlite is synchronous.

use std::path::PathBuf;

use tokio::task;

mod builder;

pub use builder::PlannerBuilder;

use crate::{
    db::Database,
    error::{Result, TripError},
    models::{Activity, PackingItem, PackingList, Trip, TripSummary},
    params::{
        AddPackingItem, CreateActivity, CreatePackingList, CreateTrip, Id, ListTrips,
        UpdateActivity, UpdatePackingItem, UpdateTrip,
    },
    validate,
};

/// Main planner interface for managing trips, activities, and packing.
pub struct Planner {
    db_path: PathBuf,
    enforce_conflicts: bool,
}

fn join_error(e: task::JoinError) -> TripError {
    TripError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

impl Planner {
    fn new(db_path: PathBuf, enforce_conflicts: bool) -> Self {
        Self {
            db_path,
            enforce_conflicts,
        }
    }

    /// Creates a new trip after validating every field.
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        let valid = validate::validate_create_trip(params)?;
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_trip(&valid)
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves a trip with its activities in itinerary order.
    pub async fn get_trip(&self, params: &Id) -> Result<Option<Trip>> {
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_trip_with_activities(trip_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists trip summaries, soonest start date first.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<Vec<TripSummary>> {
        let db_path = self.db_path.clone();
        let cutoff = params.upcoming.then(crate::datetime::today);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_trips(cutoff.as_deref())
        })
        .await
        .map_err(join_error)?
    }

    /// Applies a partial update to a trip; only provided fields change.
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        let valid = validate::validate_update_trip(params)?;
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_trip(trip_id, &valid)
        })
        .await
        .map_err(join_error)?
    }

    /// Permanently deletes a trip along with its activities and packing
    /// lists. This operation cannot be undone.
    pub async fn delete_trip(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_trip(trip_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Adds an activity to a trip.
    ///
    /// The activity date is validated against the parent trip's date range.
    /// When conflict enforcement is on (the default), a date/time slot
    /// already taken by another activity of the trip is rejected.
    pub async fn add_activity(&self, params: &CreateActivity) -> Result<Activity> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let enforce = self.enforce_conflicts;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let trip = db
                .get_trip(params.trip_id)?
                .ok_or(TripError::TripNotFound { id: params.trip_id })?;

            let valid = validate::validate_create_activity(&params, &trip.date_range())?;

            if enforce {
                let existing = db.list_activities(params.trip_id)?;
                if let Some(conflict) = validate::check_time_conflict(
                    &valid.date,
                    valid.time.as_deref(),
                    &existing,
                    None,
                ) {
                    return Err(TripError::validation(vec![conflict]));
                }
            }

            db.create_activity(&valid)
        })
        .await
        .map_err(join_error)?
    }

    /// Applies a partial update to an activity.
    ///
    /// A changed date must stay within the trip's range, and the resulting
    /// date/time slot is conflict-checked against the trip's other
    /// activities when enforcement is on.
    pub async fn update_activity(&self, params: &UpdateActivity) -> Result<Activity> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let enforce = self.enforce_conflicts;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let activity = db
                .get_activity(params.id)?
                .ok_or(TripError::ActivityNotFound { id: params.id })?;
            let trip = db
                .get_trip(activity.trip_id)?
                .ok_or(TripError::TripNotFound {
                    id: activity.trip_id,
                })?;

            let valid = validate::validate_update_activity(&params, &trip.date_range())?;

            if enforce {
                // Conflict-check the slot the activity will occupy after
                // the update, not just the changed fields.
                let date = valid.date.clone().unwrap_or_else(|| activity.date.clone());
                let time = match &valid.time {
                    Some(changed) => changed.clone(),
                    None => activity.time.clone(),
                };

                let existing = db.list_activities(activity.trip_id)?;
                if let Some(conflict) = validate::check_time_conflict(
                    &date,
                    time.as_deref(),
                    &existing,
                    Some(activity.id),
                ) {
                    return Err(TripError::validation(vec![conflict]));
                }
            }

            db.update_activity(params.id, &valid)
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves a single activity by ID.
    pub async fn get_activity(&self, params: &Id) -> Result<Option<Activity>> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_activity(activity_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Deletes an activity.
    pub async fn delete_activity(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_activity(activity_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists a trip's activities in itinerary order.
    pub async fn list_activities(&self, params: &Id) -> Result<Vec<Activity>> {
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            if db.get_trip(trip_id)?.is_none() {
                return Err(TripError::TripNotFound { id: trip_id });
            }
            db.list_activities(trip_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Creates a packing list on a trip.
    pub async fn create_packing_list(&self, params: &CreatePackingList) -> Result<PackingList> {
        let name = validate::validate_create_packing_list(params)?;
        let db_path = self.db_path.clone();
        let trip_id = params.trip_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_packing_list(trip_id, &name)
        })
        .await
        .map_err(join_error)?
    }

    /// Retrieves a packing list with its items.
    pub async fn get_packing_list(&self, params: &Id) -> Result<Option<PackingList>> {
        let db_path = self.db_path.clone();
        let list_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_packing_list(list_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists a trip's packing lists with their items.
    pub async fn list_packing_lists(&self, params: &Id) -> Result<Vec<PackingList>> {
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            if db.get_trip(trip_id)?.is_none() {
                return Err(TripError::TripNotFound { id: trip_id });
            }
            db.list_packing_lists(trip_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Adds an item to a packing list. New items start unpacked.
    pub async fn add_packing_item(&self, params: &AddPackingItem) -> Result<PackingItem> {
        let valid = validate::validate_add_packing_item(params)?;
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_packing_item(&valid)
        })
        .await
        .map_err(join_error)?
    }

    /// Applies a partial update to a packing item.
    pub async fn update_packing_item(&self, params: &UpdatePackingItem) -> Result<PackingItem> {
        validate::validate_update_packing_item(params)?;
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_packing_item(&params)
        })
        .await
        .map_err(join_error)?
    }

    /// Flips an item's packed flag and returns the new state.
    pub async fn toggle_packed(&self, params: &Id) -> Result<PackingItem> {
        let db_path = self.db_path.clone();
        let item_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.toggle_packed(item_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Deletes a packing item.
    pub async fn delete_packing_item(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let item_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_packing_item(item_id)
        })
        .await
        .map_err(join_error)?
    }

    /// Deletes a packing list. Lists that still contain items are only
    /// deleted when `force` is set.
    pub async fn delete_packing_list(&self, params: &Id, force: bool) -> Result<()> {
        let db_path = self.db_path.clone();
        let list_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_packing_list(list_id, force)
        })
        .await
        .map_err(join_error)?
    }
}
