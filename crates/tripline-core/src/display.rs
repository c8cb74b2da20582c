//! Display formatting for trips, activities, and packing lists.
//!
//! Two layers live here:
//!
//! 1. **Formatting functions**: small pure helpers that turn domain values
//!    into human-readable fragments (durations, date ranges, summaries,
//!    list joins). These never fail; malformed input yields an empty
//!    string, consistent with [`crate::datetime`].
//! 2. **Wrapper types**: [`TripList`], [`Itinerary`], [`CreateResult`],
//!    [`UpdateResult`], [`DeleteResult`], and [`OperationStatus`] implement
//!    Display for whole-output contexts. All wrappers produce markdown for
//!    rich terminal rendering.

use std::fmt;

use crate::datetime;
use crate::models::{Activity, PackingItem, PackingProgress, Trip, TripSummary};

/// Formats a trip's length in nights-inclusive days: "Same day", "1 day",
/// or "N days". Returns "Same day" when either date is malformed, since
/// the difference computes to zero.
pub fn format_trip_duration(start_date: &str, end_date: &str) -> String {
    match datetime::days_between(start_date, end_date) {
        0 => "Same day".to_string(),
        1 => "1 day".to_string(),
        days => format!("{days} days"),
    }
}

/// Formats trip dates as a range, collapsing to a single date when the trip
/// starts and ends on the same day.
pub fn format_trip_date_range(start_date: &str, end_date: &str) -> String {
    let start = datetime::format_date_for_display(start_date);
    if start_date == end_date {
        return start;
    }
    format!("{} - {}", start, datetime::format_date_for_display(end_date))
}

/// Formats an activity's date and optional time, e.g.
/// "June 17, 2024 at 9:30 AM".
pub fn format_activity_date_time(date: &str, time: Option<&str>) -> String {
    let formatted_date = datetime::format_date_for_display(date);
    match time.filter(|t| !t.is_empty()) {
        Some(t) => format!("{formatted_date} at {}", datetime::format_time_for_display(t)),
        None => formatted_date,
    }
}

/// Formats packing progress as "packed/total (percent%)", or "No items".
pub fn format_packing_progress(progress: PackingProgress) -> String {
    if progress.total == 0 {
        return "No items".to_string();
    }
    format!(
        "{}/{} ({}%)",
        progress.packed,
        progress.total,
        progress.percentage()
    )
}

/// Formats a quantity with its unit, pluralizing as needed.
///
/// When `plural` is `None` an "s" is appended to the singular form.
pub fn format_quantity(quantity: u32, singular: &str, plural: Option<&str>) -> String {
    if quantity == 1 {
        return format!("1 {singular}");
    }
    match plural {
        Some(p) => format!("{quantity} {p}"),
        None => format!("{quantity} {singular}s"),
    }
}

/// Formats a packing item's name, appending the quantity when above one.
pub fn format_packing_item_name(item: &PackingItem) -> String {
    if item.quantity == 1 {
        item.name.clone()
    } else {
        format!("{} ({})", item.name, item.quantity)
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Truncates text to `max_length` characters, ending with an ellipsis.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{truncated}...")
}

/// Joins items into an English list with an Oxford comma, e.g.
/// `["a", "b", "c"]` with "and" becomes "a, b, and c".
pub fn format_list(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [rest @ .., last] => format!("{}, {conjunction} {last}", rest.join(", ")),
    }
}

/// Up to two initials from a name, e.g. "John Doe" becomes "JD".
pub fn format_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// One-line trip summary: "Honolulu • 7 days".
pub fn format_trip_summary(trip: &Trip) -> String {
    format!(
        "{} • {}",
        trip.destination,
        format_trip_duration(&trip.start_date, &trip.end_date)
    )
}

/// One-line activity summary: "Snorkeling tour • 9:30 AM • Hanauma Bay".
///
/// Absent parts are simply omitted; a bare activity is just its name.
pub fn format_activity_summary(activity: &Activity) -> String {
    let mut parts = Vec::new();

    if let Some(time) = activity.time.as_deref().filter(|t| !t.is_empty()) {
        parts.push(datetime::format_time_for_display(time));
    }
    if let Some(location) = &activity.location {
        parts.push(location.clone());
    }

    if parts.is_empty() {
        return activity.name.clone();
    }
    format!("{} • {}", activity.name, parts.join(" • "))
}

/// URL-safe slug from arbitrary text: lowercase, hyphens, alphanumerics.
pub fn format_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // Suppress a leading hyphen.

    for c in text.trim().chars() {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            slug.push(lower);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Formats a percentage value with the given number of decimal places.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Formats a dollar amount with thousands separators, e.g. "$1,234.50".
///
/// Negative amounts keep the sign before the dollar symbol.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Wrapper type for displaying a collection of trip summaries.
///
/// Typically used for trip listings; adds an optional title header and a
/// friendly message for the empty case.
pub struct TripList<'a> {
    trips: &'a [TripSummary],
    title: Option<&'a str>,
}

impl<'a> TripList<'a> {
    /// Create a new TripList wrapper.
    pub fn new(trips: &'a [TripSummary]) -> Self {
        Self { trips, title: None }
    }

    /// Create a TripList with a title header.
    pub fn with_title(trips: &'a [TripSummary], title: &'a str) -> Self {
        Self {
            trips,
            title: Some(title),
        }
    }
}

impl fmt::Display for TripList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = self.title {
            writeln!(f, "# {title}")?;
            writeln!(f)?;
        }

        if self.trips.is_empty() {
            writeln!(f, "No trips found.")?;
            return Ok(());
        }

        for trip in self.trips {
            write!(f, "{trip}")?;
        }

        Ok(())
    }
}

/// Wrapper type rendering a trip's activities grouped by day.
///
/// Expects the trip's activities to be loaded and already in itinerary
/// order (date, then time with untimed first), as
/// [`crate::db::Database::get_trip_with_activities`] returns them.
pub struct Itinerary<'a> {
    trip: &'a Trip,
}

impl<'a> Itinerary<'a> {
    /// Create a new Itinerary wrapper.
    pub fn new(trip: &'a Trip) -> Self {
        Self { trip }
    }
}

impl fmt::Display for Itinerary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Itinerary: {}", self.trip.name)?;
        writeln!(f)?;
        writeln!(
            f,
            "{} • {}",
            format_trip_date_range(&self.trip.start_date, &self.trip.end_date),
            format_trip_duration(&self.trip.start_date, &self.trip.end_date)
        )?;

        if self.trip.activities.is_empty() {
            writeln!(f)?;
            writeln!(f, "No activities planned for this trip.")?;
            return Ok(());
        }

        let mut current_date = "";
        for activity in &self.trip.activities {
            if activity.date != current_date {
                current_date = &activity.date;
                writeln!(f)?;
                writeln!(f, "## {}", datetime::format_date_for_display(current_date))?;
                writeln!(f)?;
            }
            writeln!(f, "- {}", format_activity_summary(activity))?;
        }

        Ok(())
    }
}

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
    pub resource_type: &'static str,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T, resource_type: &'static str) -> Self {
        Self {
            resource,
            resource_type,
        }
    }
}

impl<T: HasId + fmt::Display> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} with ID: {}",
            self.resource_type,
            self.resource.id()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub resource_type: &'static str,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T, resource_type: &'static str) -> Self {
        Self {
            resource,
            resource_type,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, resource_type: &'static str, changes: Vec<String>) -> Self {
        Self {
            resource,
            resource_type,
            changes,
        }
    }
}

impl<T: HasId + fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated {} with ID: {}",
            self.resource_type,
            self.resource.id()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Resources that carry a database ID, for result headers.
pub trait HasId {
    fn id(&self) -> u64;
}

impl HasId for Trip {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for Activity {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for crate::models::PackingList {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for PackingItem {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult {
    pub resource_id: u64,
    pub resource_type: &'static str,
    pub resource_name: Option<String>,
}

impl DeleteResult {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource_id: u64, resource_type: &'static str) -> Self {
        Self {
            resource_id,
            resource_type,
            resource_name: None,
        }
    }

    /// Create a DeleteResult carrying the resource name for better context.
    pub fn with_name(resource_id: u64, resource_type: &'static str, name: String) -> Self {
        Self {
            resource_id,
            resource_type,
            resource_name: Some(name),
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource_name {
            Some(name) => writeln!(
                f,
                "Deleted {} '{}' (ID: {})",
                self.resource_type, name, self.resource_id
            ),
            None => writeln!(
                f,
                "Deleted {} with ID: {}",
                self.resource_type, self.resource_id
            ),
        }
    }
}

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{} {}", prefix, self.message)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn test_activity(time: Option<&str>, location: Option<&str>) -> Activity {
        Activity {
            id: 1,
            trip_id: 1,
            name: "Snorkeling tour".to_string(),
            date: "2024-06-17".to_string(),
            time: time.map(String::from),
            location: location.map(String::from),
            notes: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    fn test_trip() -> Trip {
        Trip {
            id: 7,
            name: "Hawaii Vacation".to_string(),
            destination: "Honolulu".to_string(),
            start_date: "2024-06-15".to_string(),
            end_date: "2024-06-22".to_string(),
            description: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            activities: Vec::new(),
        }
    }

    #[test]
    fn test_format_trip_duration() {
        assert_eq!(format_trip_duration("2024-06-15", "2024-06-15"), "Same day");
        assert_eq!(format_trip_duration("2024-06-15", "2024-06-16"), "1 day");
        assert_eq!(format_trip_duration("2024-06-15", "2024-06-22"), "7 days");
    }

    #[test]
    fn test_format_trip_date_range() {
        assert_eq!(
            format_trip_date_range("2024-06-15", "2024-06-22"),
            "June 15, 2024 - June 22, 2024"
        );
        assert_eq!(
            format_trip_date_range("2024-06-15", "2024-06-15"),
            "June 15, 2024"
        );
    }

    #[test]
    fn test_format_activity_date_time() {
        assert_eq!(
            format_activity_date_time("2024-06-17", Some("14:30")),
            "June 17, 2024 at 2:30 PM"
        );
        assert_eq!(
            format_activity_date_time("2024-06-17", None),
            "June 17, 2024"
        );
        assert_eq!(
            format_activity_date_time("2024-06-17", Some("")),
            "June 17, 2024"
        );
    }

    #[test]
    fn test_format_packing_progress() {
        assert_eq!(
            format_packing_progress(PackingProgress { packed: 0, total: 0 }),
            "No items"
        );
        assert_eq!(
            format_packing_progress(PackingProgress { packed: 3, total: 10 }),
            "3/10 (30%)"
        );
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1, "item", None), "1 item");
        assert_eq!(format_quantity(3, "item", None), "3 items");
        assert_eq!(format_quantity(2, "box", Some("boxes")), "2 boxes");
        assert_eq!(format_quantity(0, "item", None), "0 items");
    }

    #[test]
    fn test_format_packing_item_name() {
        let mut item = PackingItem {
            id: 1,
            packing_list_id: 1,
            name: "Towel".to_string(),
            quantity: 1,
            packed: false,
            created_at: Timestamp::from_second(1640995200).unwrap(),
        };
        assert_eq!(format_packing_item_name(&item), "Towel");

        item.quantity = 3;
        assert_eq!(format_packing_item_name(&item), "Towel (3)");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("HELLO WORLD"), "Hello world");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_text("a rather long sentence", 10), "a rathe...");
    }

    #[test]
    fn test_format_list() {
        let items: Vec<String> = Vec::new();
        assert_eq!(format_list(&items, "and"), "");

        let items = vec!["apple".to_string()];
        assert_eq!(format_list(&items, "and"), "apple");

        let items = vec!["apple".to_string(), "banana".to_string()];
        assert_eq!(format_list(&items, "and"), "apple and banana");

        let items = vec![
            "apple".to_string(),
            "banana".to_string(),
            "cherry".to_string(),
        ];
        assert_eq!(format_list(&items, "and"), "apple, banana, and cherry");
        assert_eq!(format_list(&items, "or"), "apple, banana, or cherry");
    }

    #[test]
    fn test_format_initials() {
        assert_eq!(format_initials("John Doe"), "JD");
        assert_eq!(format_initials("Ada"), "A");
        assert_eq!(format_initials("Anna Maria van der Berg"), "AM");
        assert_eq!(format_initials(""), "");
    }

    #[test]
    fn test_format_trip_summary() {
        assert_eq!(format_trip_summary(&test_trip()), "Honolulu • 7 days");
    }

    #[test]
    fn test_format_activity_summary() {
        let activity = test_activity(Some("09:30"), Some("Hanauma Bay"));
        assert_eq!(
            format_activity_summary(&activity),
            "Snorkeling tour • 9:30 AM • Hanauma Bay"
        );

        let activity = test_activity(None, Some("Hanauma Bay"));
        assert_eq!(
            format_activity_summary(&activity),
            "Snorkeling tour • Hanauma Bay"
        );

        let activity = test_activity(None, None);
        assert_eq!(format_activity_summary(&activity), "Snorkeling tour");
    }

    #[test]
    fn test_format_slug() {
        assert_eq!(format_slug("Hawaii Vacation 2024"), "hawaii-vacation-2024");
        assert_eq!(format_slug("  Trip to Canada!  "), "trip-to-canada");
        assert_eq!(format_slug("a -- b"), "a-b");
        assert_eq!(format_slug(""), "");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(30.0, 0), "30%");
        assert_eq!(format_percentage(33.333, 1), "33.3%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(9.5), "$9.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.25), "-$42.25");
    }

    #[test]
    fn test_trip_list_display() {
        let summary = TripSummary {
            id: 7,
            name: "Hawaii Vacation".to_string(),
            destination: "Honolulu".to_string(),
            start_date: "2024-06-15".to_string(),
            end_date: "2024-06-22".to_string(),
            description: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            activity_count: 0,
            total_items: 0,
            packed_items: 0,
        };
        let trips = vec![summary];

        let output = format!("{}", TripList::with_title(&trips, "Upcoming Trips"));
        assert!(output.contains("# Upcoming Trips"));
        assert!(output.contains("Hawaii Vacation"));

        let empty: Vec<TripSummary> = Vec::new();
        let output = format!("{}", TripList::new(&empty));
        assert!(output.contains("No trips found."));
    }

    #[test]
    fn test_itinerary_groups_by_day() {
        let mut trip = test_trip();
        trip.activities = vec![
            test_activity(None, None),
            test_activity(Some("09:30"), Some("Hanauma Bay")),
            Activity {
                date: "2024-06-18".to_string(),
                ..test_activity(Some("19:00"), None)
            },
        ];

        let output = format!("{}", Itinerary::new(&trip));
        assert!(output.contains("# Itinerary: Hawaii Vacation"));
        assert!(output.contains("June 15, 2024 - June 22, 2024 • 7 days"));
        // One header per distinct day.
        assert_eq!(output.matches("## June 17, 2024").count(), 1);
        assert!(output.contains("## June 18, 2024"));
        assert!(output.contains("- Snorkeling tour • 9:30 AM • Hanauma Bay"));
    }

    #[test]
    fn test_itinerary_empty() {
        let trip = test_trip();
        let output = format!("{}", Itinerary::new(&trip));
        assert!(output.contains("No activities planned for this trip."));
    }

    #[test]
    fn test_create_result_display() {
        let result = CreateResult::new(test_trip(), "trip");
        let output = format!("{result}");
        assert!(output.contains("Created trip with ID: 7"));
        assert!(output.contains("Hawaii Vacation"));
    }

    #[test]
    fn test_update_result_display_with_changes() {
        let result = UpdateResult::with_changes(
            test_trip(),
            "trip",
            vec!["Updated destination".to_string()],
        );
        let output = format!("{result}");
        assert!(output.contains("Updated trip with ID: 7"));
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Updated destination"));
    }

    #[test]
    fn test_delete_result_display() {
        let output = format!("{}", DeleteResult::new(3, "activity"));
        assert!(output.contains("Deleted activity with ID: 3"));

        let output = format!(
            "{}",
            DeleteResult::with_name(7, "trip", "Hawaii Vacation".to_string())
        );
        assert!(output.contains("Deleted trip 'Hawaii Vacation' (ID: 7)"));
    }

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("All packed".to_string());
        assert!(format!("{success}").contains("Success:"));

        let failure = OperationStatus::failure("Nothing to do".to_string());
        assert!(format!("{failure}").contains("Error:"));
    }
}
