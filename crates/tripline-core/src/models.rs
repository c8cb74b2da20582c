//! Data models for trips, activities, and packing lists.
//!
//! This module contains the core domain models of the trip planner. Each
//! model implements Display for direct markdown formatting, while the
//! [`crate::display`] module provides wrapper types for contextual
//! formatting (lists, itineraries, operation results).
//!
//! Dates are stored as `YYYY-MM-DD` strings and times as 24-hour `HH:MM`
//! strings, matching the database column format; the [`crate::datetime`]
//! module owns parsing and validation of both.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use crate::datetime;

/// Represents a complete trip with metadata and activities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Name of the trip
    pub name: String,

    /// Destination of the trip
    pub destination: String,

    /// First day of the trip (`YYYY-MM-DD`)
    pub start_date: String,

    /// Last day of the trip (`YYYY-MM-DD`)
    pub end_date: String,

    /// Detailed multi-line description of the trip
    pub description: Option<String>,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated activities (lazy-loaded by default)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub activities: Vec<Activity>,
}

impl Trip {
    /// The trip's date range as a value usable with range checks.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(&self.start_date, &self.end_date)
    }
}

/// Represents a single scheduled activity within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: u64,

    /// ID of the parent trip
    pub trip_id: u64,

    /// Name of the activity
    pub name: String,

    /// Day the activity takes place (`YYYY-MM-DD`)
    pub date: String,

    /// Optional start time (24-hour `HH:MM`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Optional location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Optional free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Timestamp when the activity was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the activity was last updated (UTC)
    pub updated_at: Timestamp,
}

/// A packing list attached to a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackingList {
    /// Unique identifier for the packing list
    pub id: u64,

    /// ID of the parent trip
    pub trip_id: u64,

    /// Name of the list (e.g. "Clothes", "Electronics")
    pub name: String,

    /// Timestamp when the list was created (UTC)
    pub created_at: Timestamp,

    /// Associated items (lazy-loaded by default)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub items: Vec<PackingItem>,
}

impl PackingList {
    /// Packed/total progress across this list's loaded items.
    pub fn progress(&self) -> PackingProgress {
        let total = self.items.len() as u32;
        let packed = self.items.iter().filter(|i| i.packed).count() as u32;
        PackingProgress { packed, total }
    }
}

/// A single item on a packing list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackingItem {
    /// Unique identifier for the item
    pub id: u64,

    /// ID of the parent packing list
    pub packing_list_id: u64,

    /// Name of the item
    pub name: String,

    /// How many to pack (at least 1)
    pub quantity: u32,

    /// Whether the item has been packed
    pub packed: bool,

    /// Timestamp when the item was created (UTC)
    pub created_at: Timestamp,
}

/// An inclusive date range with `YYYY-MM-DD` string endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Create a date range from string endpoints.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Summary information about a trip with activity and packing statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    /// Trip ID
    pub id: u64,
    /// Name of the trip
    pub name: String,
    /// Destination of the trip
    pub destination: String,
    /// First day of the trip (`YYYY-MM-DD`)
    pub start_date: String,
    /// Last day of the trip (`YYYY-MM-DD`)
    pub end_date: String,
    /// Detailed multi-line description of the trip
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of activities
    pub activity_count: u32,
    /// Total number of packing items across all lists
    pub total_items: u32,
    /// Number of packed items across all lists
    pub packed_items: u32,
}

impl TripSummary {
    /// Create a TripSummary from a Trip and aggregate counts.
    pub fn from_trip(trip: Trip, total_items: u32, packed_items: u32) -> Self {
        let activity_count = trip.activities.len() as u32;
        Self {
            id: trip.id,
            name: trip.name,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            description: trip.description,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
            activity_count,
            total_items,
            packed_items,
        }
    }
}

/// Packed/total counters for packing progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingProgress {
    pub packed: u32,
    pub total: u32,
}

impl PackingProgress {
    /// Packed percentage rounded to the nearest whole number, 0 when empty.
    pub fn percentage(self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (f64::from(self.packed) * 100.0 / f64::from(self.total)).round() as u32
        }
    }

    /// True when every item is packed and the list is non-empty.
    pub fn is_complete(self) -> bool {
        self.total > 0 && self.packed == self.total
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Destination: {}", self.destination)?;
        writeln!(
            f,
            "- Dates: {} – {}",
            datetime::format_date_for_display(&self.start_date),
            datetime::format_date_for_display(&self.end_date)
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Description as a paragraph
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.activities.is_empty() {
            writeln!(f, "\n## Activities")?;
            writeln!(f)?;
            for activity in &self.activities {
                write!(f, "{activity}")?;
            }
        } else {
            writeln!(f, "\nNo activities planned for this trip.")?;
        }

        Ok(())
    }
}

impl Activity {
    /// Compact "date at time" line, omitting the time when absent.
    pub fn when(&self) -> String {
        let date = datetime::format_date_for_display(&self.date);
        match self.time.as_deref().filter(|t| !t.is_empty()) {
            Some(time) => format!("{} at {}", date, datetime::format_time_for_display(time)),
            None => date,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {} ({})", self.id, self.name, self.when())?;
        writeln!(f)?;

        if let Some(location) = &self.location {
            writeln!(f, "- Location: {location}")?;
        }

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for PackingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = self.progress();
        let counter = if progress.total > 0 {
            format!(" ({}/{})", progress.packed, progress.total)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){counter}", self.name, self.id)?;
        writeln!(f)?;

        if self.items.is_empty() {
            writeln!(f, "No items in this list.")?;
        } else {
            for item in &self.items {
                write!(f, "{item}")?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for PackingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.packed { "x" } else { " " };
        let quantity = if self.quantity > 1 {
            format!(" (x{})", self.quantity)
        } else {
            String::new()
        };
        writeln!(f, "- [{mark}] {}{quantity}", self.name)
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Destination**: {}", self.destination)?;
        writeln!(
            f,
            "- **Dates**: {} – {}",
            datetime::format_date_for_display(&self.start_date),
            datetime::format_date_for_display(&self.end_date)
        )?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }

        if self.activity_count > 0 {
            writeln!(f, "- **Activities**: {}", self.activity_count)?;
        }

        if self.total_items > 0 {
            writeln!(
                f,
                "- **Packing**: {}/{} packed",
                self.packed_items, self.total_items
            )?;
        }

        writeln!(f)?; // Blank line after each trip in lists

        Ok(())
    }
}

/// A wrapper around `Timestamp` that formats in the system timezone.
///
/// Display format: `YYYY-MM-DD HH:MM:SS TZ`. Zero-cost, holds only a
/// reference to the timestamp.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn create_test_activity(time: Option<&str>) -> Activity {
        Activity {
            id: 123,
            trip_id: 456,
            name: "Snorkeling tour".to_string(),
            date: "2024-06-17".to_string(),
            time: time.map(String::from),
            location: Some("Hanauma Bay".to_string()),
            notes: Some("Bring reef-safe sunscreen".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
        }
    }

    fn create_test_trip() -> Trip {
        Trip {
            id: 789,
            name: "Hawaii Vacation".to_string(),
            destination: "Honolulu".to_string(),
            start_date: "2024-06-15".to_string(),
            end_date: "2024-06-22".to_string(),
            description: Some("Family summer trip".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            activities: vec![
                create_test_activity(Some("09:30")),
                create_test_activity(None),
            ],
        }
    }

    fn create_test_packing_list() -> PackingList {
        let item = |id, name: &str, quantity, packed| PackingItem {
            id,
            packing_list_id: 5,
            name: name.to_string(),
            quantity,
            packed,
            created_at: Timestamp::from_second(1640995200).unwrap(),
        };

        PackingList {
            id: 5,
            trip_id: 789,
            name: "Beach Gear".to_string(),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            items: vec![
                item(1, "Towel", 2, true),
                item(2, "Sunscreen", 1, false),
                item(3, "Snorkel", 1, false),
            ],
        }
    }

    #[test]
    fn test_activity_when_with_time() {
        let activity = create_test_activity(Some("09:30"));
        assert_eq!(activity.when(), "June 17, 2024 at 9:30 AM");
    }

    #[test]
    fn test_activity_when_without_time() {
        let activity = create_test_activity(None);
        assert_eq!(activity.when(), "June 17, 2024");
    }

    #[test]
    fn test_activity_display() {
        let activity = create_test_activity(Some("09:30"));
        let output = format!("{activity}");

        assert!(output.contains("### 123. Snorkeling tour (June 17, 2024 at 9:30 AM)"));
        assert!(output.contains("- Location: Hanauma Bay"));
        assert!(output.contains("Bring reef-safe sunscreen"));
    }

    #[test]
    fn test_trip_display_with_activities() {
        let trip = create_test_trip();
        let output = format!("{trip}");

        assert!(output.contains("# 789. Hawaii Vacation"));
        assert!(output.contains("- Destination: Honolulu"));
        assert!(output.contains("- Dates: June 15, 2024 – June 22, 2024"));
        assert!(output.contains("- Created: 2022-01-01"));
        assert!(output.contains("- Updated: 2022-01-02"));
        assert!(output.contains("Family summer trip"));
        assert!(output.contains("## Activities"));
        assert!(output.contains("Snorkeling tour"));
    }

    #[test]
    fn test_trip_display_empty_activities() {
        let mut trip = create_test_trip();
        trip.activities.clear();
        let output = format!("{trip}");

        assert!(output.contains("No activities planned for this trip."));
        assert!(!output.contains("## Activities"));
    }

    #[test]
    fn test_trip_date_range() {
        let trip = create_test_trip();
        assert_eq!(
            trip.date_range(),
            DateRange::new("2024-06-15", "2024-06-22")
        );
    }

    #[test]
    fn test_packing_list_progress() {
        let list = create_test_packing_list();
        let progress = list.progress();

        assert_eq!(progress.packed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percentage(), 33);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_packing_progress_edge_cases() {
        let empty = PackingProgress { packed: 0, total: 0 };
        assert_eq!(empty.percentage(), 0);
        assert!(!empty.is_complete());

        let done = PackingProgress { packed: 4, total: 4 };
        assert_eq!(done.percentage(), 100);
        assert!(done.is_complete());
    }

    #[test]
    fn test_packing_list_display() {
        let list = create_test_packing_list();
        let output = format!("{list}");

        assert!(output.contains("## Beach Gear (ID: 5) (1/3)"));
        assert!(output.contains("- [x] Towel (x2)"));
        assert!(output.contains("- [ ] Sunscreen"));
        assert!(!output.contains("Sunscreen (x1)"));
    }

    #[test]
    fn test_packing_list_display_empty() {
        let mut list = create_test_packing_list();
        list.items.clear();
        let output = format!("{list}");

        assert!(output.contains("## Beach Gear (ID: 5)"));
        assert!(!output.contains("(0/0)"));
        assert!(output.contains("No items in this list."));
    }

    #[test]
    fn test_trip_summary_display() {
        let summary = TripSummary {
            id: 789,
            name: "Hawaii Vacation".to_string(),
            destination: "Honolulu".to_string(),
            start_date: "2024-06-15".to_string(),
            end_date: "2024-06-22".to_string(),
            description: Some("Family summer trip".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            activity_count: 4,
            total_items: 10,
            packed_items: 7,
        };
        let output = format!("{summary}");

        assert!(output.contains("## Hawaii Vacation (ID: 789)"));
        assert!(output.contains("- **Destination**: Honolulu"));
        assert!(output.contains("- **Dates**: June 15, 2024 – June 22, 2024"));
        assert!(output.contains("- **Description**: Family summer trip"));
        assert!(output.contains("- **Activities**: 4"));
        assert!(output.contains("- **Packing**: 7/10 packed"));
        assert!(output.ends_with("\n\n"));
    }

    #[test]
    fn test_trip_summary_from_trip() {
        let trip = create_test_trip();
        let summary = TripSummary::from_trip(trip.clone(), 8, 3);

        assert_eq!(summary.id, trip.id);
        assert_eq!(summary.name, trip.name);
        assert_eq!(summary.activity_count, 2);
        assert_eq!(summary.total_items, 8);
        assert_eq!(summary.packed_items, 3);
    }

    #[test]
    fn test_trip_summary_display_minimal() {
        let summary = TripSummary {
            id: 1,
            name: "Quick Getaway".to_string(),
            destination: "Portland".to_string(),
            start_date: "2024-09-01".to_string(),
            end_date: "2024-09-03".to_string(),
            description: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            activity_count: 0,
            total_items: 0,
            packed_items: 0,
        };
        let output = format!("{summary}");

        assert!(output.contains("## Quick Getaway (ID: 1)"));
        assert!(!output.contains("- **Description**:"));
        assert!(!output.contains("- **Activities**:"));
        assert!(!output.contains("- **Packing**:"));
    }

    #[test]
    fn test_local_date_time_display_format() {
        let timestamp = Timestamp::from_second(1640995200).unwrap();
        let output = format!("{}", LocalDateTime(&timestamp));

        let parts: Vec<&str> = output.split_whitespace().collect();
        assert_eq!(parts.len(), 3); // Date, Time, Timezone
        assert!(parts[1].contains(':'));
        assert!(!parts[2].is_empty());
    }
}
