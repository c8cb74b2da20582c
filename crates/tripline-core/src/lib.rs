//! Core library for the Tripline trip planning application.
//!
//! This crate provides the business logic for managing trips, their
//! activities, and packing lists: date/time primitives, validation rules,
//! database operations, and display formatting.
//!
//! # Architecture
//!
//! - **Date primitives** ([`datetime`]): parsing, validation, comparison,
//!   and formatting of `YYYY-MM-DD` dates and `HH:MM` times
//! - **Validation** ([`validate`]): collect-all field validation producing
//!   cleaned values or a single aggregate error
//! - **Storage** ([`db`]): SQLite-backed persistence with cascading deletes
//! - **Display** ([`models`] and [`display`]): domain models implement
//!   [`std::fmt::Display`] for markdown output, with wrapper types for
//!   contextual formatting (lists, itineraries, operation results)
//!
//! # Quick Start
//!
//! ```rust
//! use tripline_core::{params::CreateTrip, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("trips.db"))
//!     .build()
//!     .await?;
//!
//! let params = CreateTrip {
//!     name: "Hawaii Vacation".to_string(),
//!     destination: "Honolulu".to_string(),
//!     start_date: "2024-06-15".to_string(),
//!     end_date: "2024-06-22".to_string(),
//!     description: None,
//! };
//!
//! let trip = planner.create_trip(&params).await?;
//! println!("{trip}");
//! # Ok(())
//! # }
//! ```

pub mod datetime;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod planner;
pub mod validate;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Itinerary, OperationStatus, TripList, UpdateResult,
};
pub use error::{ErrorCode, Result, TripError, ValidationError};
pub use models::{
    Activity, DateRange, LocalDateTime, PackingItem, PackingList, PackingProgress, Trip,
    TripSummary,
};
pub use params::{
    AddPackingItem, CreateActivity, CreatePackingList, CreateTrip, Id, ListTrips, UpdateActivity,
    UpdatePackingItem, UpdateTrip,
};
pub use planner::{Planner, PlannerBuilder};
