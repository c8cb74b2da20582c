//! Parameter structures for trip planner operations.
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI today, other front ends later) without
//! framework-specific derives or dependencies. Interface layers define their
//! own argument structs with framework derives and convert into these types
//! via `From`/`Into`.
//!
//! None of these structures are validated on construction. Validation
//! happens in [`crate::validate`], which checks every field and reports all
//! violations in one aggregate error.

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like get_trip, delete_trip, delete_activity,
/// toggle_packed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTrip {
    /// Name of the trip (required)
    pub name: String,
    /// Destination of the trip (required)
    pub destination: String,
    /// First day of the trip, `YYYY-MM-DD` (required)
    pub start_date: String,
    /// Last day of the trip, `YYYY-MM-DD`; must be after the start (required)
    pub end_date: String,
    /// Optional detailed description of the trip
    pub description: Option<String>,
}

/// Parameters for updating an existing trip.
///
/// All fields except the ID are optional; only provided fields are validated
/// and written. An absent field keeps its current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: u64,
    /// Updated name of the trip
    pub name: Option<String>,
    /// Updated destination
    pub destination: Option<String>,
    /// Updated first day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Updated last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Updated description
    pub description: Option<String>,
}

impl UpdateTrip {
    /// True when no updatable field is provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
    }
}

/// Parameters for listing trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTrips {
    /// Only show trips whose last day is today or later
    #[serde(default)]
    pub upcoming: bool,
}

/// Parameters for creating a new activity within a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateActivity {
    /// ID of the trip to add the activity to
    pub trip_id: u64,
    /// Name of the activity (required)
    pub name: String,
    /// Day of the activity, `YYYY-MM-DD`; must fall within the trip's dates
    pub date: String,
    /// Optional start time, 24-hour `HH:MM`
    pub time: Option<String>,
    /// Optional location
    pub location: Option<String>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Parameters for updating an existing activity.
///
/// All fields except the ID are optional; only provided fields are validated
/// and written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActivity {
    /// Activity ID to update (required)
    pub id: u64,
    /// Updated name of the activity
    pub name: Option<String>,
    /// Updated day, `YYYY-MM-DD`; must stay within the trip's dates
    pub date: Option<String>,
    /// Updated start time, 24-hour `HH:MM`; an empty string clears the time
    pub time: Option<String>,
    /// Updated location; an empty string clears the location
    pub location: Option<String>,
    /// Updated notes; an empty string clears the notes
    pub notes: Option<String>,
}

impl UpdateActivity {
    /// True when no updatable field is provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.notes.is_none()
    }
}

/// Parameters for creating a packing list on a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePackingList {
    /// ID of the trip to attach the list to
    pub trip_id: u64,
    /// Name of the list (required)
    pub name: String,
}

/// Parameters for adding an item to a packing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPackingItem {
    /// ID of the packing list to add the item to
    pub packing_list_id: u64,
    /// Name of the item (required)
    pub name: String,
    /// How many to pack (defaults to 1, must be at least 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Default for AddPackingItem {
    fn default() -> Self {
        Self {
            packing_list_id: 0,
            name: String::new(),
            quantity: 1,
        }
    }
}

/// Parameters for updating a packing item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackingItem {
    /// Item ID to update (required)
    pub id: u64,
    /// Updated name of the item
    pub name: Option<String>,
    /// Updated quantity (must be at least 1)
    pub quantity: Option<u32>,
    /// Updated packed flag
    pub packed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_trip_is_empty() {
        let params = UpdateTrip {
            id: 1,
            ..Default::default()
        };
        assert!(params.is_empty());

        let params = UpdateTrip {
            id: 1,
            destination: Some("Lisbon".to_string()),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }

    #[test]
    fn test_update_activity_is_empty() {
        let params = UpdateActivity {
            id: 7,
            ..Default::default()
        };
        assert!(params.is_empty());

        // Clearing a field still counts as a change.
        let params = UpdateActivity {
            id: 7,
            time: Some(String::new()),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }

    #[test]
    fn test_add_packing_item_default_quantity() {
        let params = AddPackingItem::default();
        assert_eq!(params.quantity, 1);

        let parsed: AddPackingItem =
            serde_json::from_str(r#"{"packing_list_id": 3, "name": "Socks"}"#).unwrap();
        assert_eq!(parsed.quantity, 1);
    }
}
