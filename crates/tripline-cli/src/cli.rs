//! Command definitions and handlers.
//!
//! Each subcommand gets a clap argument struct with a `From` conversion into
//! the matching core parameter type, so clap attributes never leak into the
//! core crate. [`Cli`] owns the planner and renderer and executes commands,
//! turning core results into rendered markdown and core errors into
//! human-readable failures.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use tripline_core::params::{
    AddPackingItem, CreateActivity, CreatePackingList, CreateTrip, Id, ListTrips, UpdateActivity,
    UpdatePackingItem, UpdateTrip,
};
use tripline_core::{
    CreateResult, DeleteResult, Itinerary, OperationStatus, Planner, TripError, TripList,
    UpdateResult,
};

use crate::renderer::TerminalRenderer;

/// Create a new trip
#[derive(Args)]
pub struct CreateTripArgs {
    /// Name of the trip
    pub name: String,
    /// Destination of the trip
    pub destination: String,
    /// Start date in YYYY-MM-DD format
    pub start_date: String,
    /// End date in YYYY-MM-DD format (must be after the start date)
    pub end_date: String,
    /// Optional description providing more context about the trip
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            name: val.name,
            destination: val.destination,
            start_date: val.start_date,
            end_date: val.end_date,
            description: val.description,
        }
    }
}

/// List all trips
#[derive(Args)]
pub struct ListTripsArgs {
    /// Show only trips that have not ended yet
    #[arg(long)]
    pub upcoming: bool,
}

impl From<ListTripsArgs> for ListTrips {
    fn from(val: ListTripsArgs) -> Self {
        ListTrips {
            upcoming: val.upcoming,
        }
    }
}

/// Show details of a specific trip
#[derive(Args)]
pub struct ShowTripArgs {
    /// ID of the trip to display
    pub id: u64,
}

impl From<ShowTripArgs> for Id {
    fn from(val: ShowTripArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a trip's details
///
/// Only the provided flags change; everything else keeps its stored value.
/// Pass an empty string to --description to clear it.
#[derive(Args)]
pub struct UpdateTripArgs {
    /// ID of the trip to update
    pub id: u64,
    /// Updated trip name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Updated destination
    #[arg(long)]
    pub destination: Option<String>,
    /// Updated start date in YYYY-MM-DD format
    #[arg(long)]
    pub start_date: Option<String>,
    /// Updated end date in YYYY-MM-DD format
    #[arg(long)]
    pub end_date: Option<String>,
    /// Updated description (empty string clears it)
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            name: val.name,
            destination: val.destination,
            start_date: val.start_date,
            end_date: val.end_date,
            description: val.description,
        }
    }
}

/// Delete a trip permanently
#[derive(Args)]
pub struct DeleteTripArgs {
    /// ID of the trip to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List all trips
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show a trip with its activities
    #[command(alias = "s")]
    Show(ShowTripArgs),
    /// Show a trip's itinerary grouped by day
    #[command(alias = "i")]
    Itinerary(ShowTripArgs),
    /// Update a trip's details
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Delete a trip permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

/// Add a new activity to a trip
#[derive(Args)]
pub struct AddActivityArgs {
    /// ID of the trip to add the activity to
    pub trip_id: u64,
    /// Name of the activity
    pub name: String,
    /// Date in YYYY-MM-DD format (must fall within the trip's dates)
    pub date: String,
    /// Optional time in HH:MM format (24-hour)
    #[arg(short, long)]
    pub time: Option<String>,
    /// Optional location of the activity
    #[arg(short, long)]
    pub location: Option<String>,
    /// Optional free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<AddActivityArgs> for CreateActivity {
    fn from(val: AddActivityArgs) -> Self {
        CreateActivity {
            trip_id: val.trip_id,
            name: val.name,
            date: val.date,
            time: val.time,
            location: val.location,
            notes: val.notes,
        }
    }
}

/// List a trip's activities in itinerary order
#[derive(Args)]
pub struct ListActivitiesArgs {
    /// ID of the trip whose activities to list
    pub trip_id: u64,
}

impl From<ListActivitiesArgs> for Id {
    fn from(val: ListActivitiesArgs) -> Self {
        Id { id: val.trip_id }
    }
}

/// Show details of a specific activity
#[derive(Args)]
pub struct ShowActivityArgs {
    /// ID of the activity to display
    pub id: u64,
}

impl From<ShowActivityArgs> for Id {
    fn from(val: ShowActivityArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update an activity's details
///
/// Only the provided flags change. Pass an empty string to --time,
/// --location, or --notes to clear the stored value.
#[derive(Args)]
pub struct UpdateActivityArgs {
    /// ID of the activity to update
    pub id: u64,
    /// Updated activity name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Updated date in YYYY-MM-DD format
    #[arg(short, long)]
    pub date: Option<String>,
    /// Updated time in HH:MM format (empty string clears it)
    #[arg(short, long)]
    pub time: Option<String>,
    /// Updated location (empty string clears it)
    #[arg(short, long)]
    pub location: Option<String>,
    /// Updated notes (empty string clears them)
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<UpdateActivityArgs> for UpdateActivity {
    fn from(val: UpdateActivityArgs) -> Self {
        UpdateActivity {
            id: val.id,
            name: val.name,
            date: val.date,
            time: val.time,
            location: val.location,
            notes: val.notes,
        }
    }
}

/// Delete an activity
#[derive(Args)]
pub struct DeleteActivityArgs {
    /// ID of the activity to delete
    pub id: u64,
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add a new activity to a trip
    #[command(alias = "a")]
    Add(AddActivityArgs),
    /// List a trip's activities
    #[command(aliases = ["l", "ls"])]
    List(ListActivitiesArgs),
    /// Show details of a specific activity
    #[command(alias = "s")]
    Show(ShowActivityArgs),
    /// Update an activity's details
    #[command(alias = "u")]
    Update(UpdateActivityArgs),
    /// Delete an activity
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteActivityArgs),
}

/// Create a new packing list on a trip
#[derive(Args)]
pub struct CreatePackingListArgs {
    /// ID of the trip the packing list belongs to
    pub trip_id: u64,
    /// Name of the packing list
    pub name: String,
}

impl From<CreatePackingListArgs> for CreatePackingList {
    fn from(val: CreatePackingListArgs) -> Self {
        CreatePackingList {
            trip_id: val.trip_id,
            name: val.name,
        }
    }
}

/// List a trip's packing lists
#[derive(Args)]
pub struct ListPackingListsArgs {
    /// ID of the trip whose packing lists to show
    pub trip_id: u64,
}

/// Show a packing list with its items
#[derive(Args)]
pub struct ShowPackingListArgs {
    /// ID of the packing list to display
    pub id: u64,
}

/// Delete a packing list
#[derive(Args)]
pub struct DeletePackingListArgs {
    /// ID of the packing list to delete
    pub id: u64,
    /// Delete the list even if it still contains items
    #[arg(long)]
    pub force: bool,
}

/// Add an item to a packing list
#[derive(Args)]
pub struct AddItemArgs {
    /// ID of the packing list to add the item to
    pub packing_list_id: u64,
    /// Name of the item
    pub name: String,
    /// How many to pack
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,
}

impl From<AddItemArgs> for AddPackingItem {
    fn from(val: AddItemArgs) -> Self {
        AddPackingItem {
            packing_list_id: val.packing_list_id,
            name: val.name,
            quantity: val.quantity,
        }
    }
}

/// Update a packing item
#[derive(Args)]
pub struct UpdateItemArgs {
    /// ID of the item to update
    pub id: u64,
    /// Updated item name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Updated quantity
    #[arg(short, long)]
    pub quantity: Option<u32>,
    /// Set the packed state directly (true or false)
    #[arg(long)]
    pub packed: Option<bool>,
}

impl From<UpdateItemArgs> for UpdatePackingItem {
    fn from(val: UpdateItemArgs) -> Self {
        UpdatePackingItem {
            id: val.id,
            name: val.name,
            quantity: val.quantity,
            packed: val.packed,
        }
    }
}

/// Toggle an item between packed and unpacked
#[derive(Args)]
pub struct ToggleItemArgs {
    /// ID of the item to toggle
    pub id: u64,
}

/// Remove an item from its packing list
#[derive(Args)]
pub struct RemoveItemArgs {
    /// ID of the item to remove
    pub id: u64,
}

#[derive(Subcommand)]
pub enum PackingCommands {
    /// Create a new packing list on a trip
    #[command(alias = "c")]
    Create(CreatePackingListArgs),
    /// List a trip's packing lists
    #[command(aliases = ["l", "ls"])]
    List(ListPackingListsArgs),
    /// Show a packing list with its items
    #[command(alias = "s")]
    Show(ShowPackingListArgs),
    /// Delete a packing list
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePackingListArgs),
    /// Add an item to a packing list
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Update a packing item
    #[command(alias = "u")]
    Update(UpdateItemArgs),
    /// Toggle an item between packed and unpacked
    #[command(alias = "t")]
    Toggle(ToggleItemArgs),
    /// Remove an item from its packing list
    Remove(RemoveItemArgs),
}

/// Executes parsed commands against the planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

/// Flattens a core error into a single printable failure.
///
/// Validation errors list every violated field; everything else keeps its
/// own display form.
fn command_error(err: TripError) -> anyhow::Error {
    match err.field_errors() {
        Some(errors) => {
            let mut message = String::from("Validation failed:");
            for e in errors {
                message.push_str(&format!("\n  {}: {}", e.field, e.message));
            }
            anyhow::anyhow!(message)
        }
        None => anyhow::Error::new(err),
    }
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let trip = self
                    .planner
                    .create_trip(&args.into())
                    .await
                    .map_err(command_error)?;
                self.render(&CreateResult::new(trip, "trip"))
            }
            TripCommands::List(args) => self.list_trips(&args.into()).await,
            TripCommands::Show(args) => {
                let id = args.id;
                match self
                    .planner
                    .get_trip(&args.into())
                    .await
                    .map_err(command_error)?
                {
                    Some(trip) => self.render(&trip),
                    None => bail!("Trip {id} not found"),
                }
            }
            TripCommands::Itinerary(args) => {
                let id = args.id;
                match self
                    .planner
                    .get_trip(&args.into())
                    .await
                    .map_err(command_error)?
                {
                    Some(trip) => self.render(&Itinerary::new(&trip)),
                    None => bail!("Trip {id} not found"),
                }
            }
            TripCommands::Update(args) => {
                let params: UpdateTrip = args.into();
                if params.is_empty() {
                    return self.render(&OperationStatus::failure(
                        "No changes provided. Pass at least one field flag.".to_string(),
                    ));
                }
                let changes = trip_change_summary(&params);
                let trip = self
                    .planner
                    .update_trip(&params)
                    .await
                    .map_err(command_error)?;
                self.render(&UpdateResult::with_changes(trip, "trip", changes))
            }
            TripCommands::Delete(args) => {
                if !args.confirm {
                    return self.render(&OperationStatus::failure(format!(
                        "Deleting trip {} removes all its activities and packing lists. \
                         Re-run with --confirm to proceed.",
                        args.id
                    )));
                }
                let name = self
                    .planner
                    .get_trip(&Id { id: args.id })
                    .await
                    .map_err(command_error)?
                    .map(|t| t.name);
                self.planner
                    .delete_trip(&Id { id: args.id })
                    .await
                    .map_err(command_error)?;
                let result = match name {
                    Some(name) => DeleteResult::with_name(args.id, "trip", name),
                    None => DeleteResult::new(args.id, "trip"),
                };
                self.render(&result)
            }
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Add(args) => {
                let activity = self
                    .planner
                    .add_activity(&args.into())
                    .await
                    .map_err(command_error)?;
                self.render(&CreateResult::new(activity, "activity"))
            }
            ActivityCommands::List(args) => {
                let activities = self
                    .planner
                    .list_activities(&args.into())
                    .await
                    .map_err(command_error)?;
                if activities.is_empty() {
                    return self.render_str("No activities found.\n");
                }
                let mut output = String::new();
                for activity in &activities {
                    output.push_str(&activity.to_string());
                    output.push('\n');
                }
                self.render_str(&output)
            }
            ActivityCommands::Show(args) => {
                let id = args.id;
                match self
                    .planner
                    .get_activity(&args.into())
                    .await
                    .map_err(command_error)?
                {
                    Some(activity) => self.render(&activity),
                    None => bail!("Activity {id} not found"),
                }
            }
            ActivityCommands::Update(args) => {
                let params: UpdateActivity = args.into();
                if params.is_empty() {
                    return self.render(&OperationStatus::failure(
                        "No changes provided. Pass at least one field flag.".to_string(),
                    ));
                }
                let activity = self
                    .planner
                    .update_activity(&params)
                    .await
                    .map_err(command_error)?;
                self.render(&UpdateResult::new(activity, "activity"))
            }
            ActivityCommands::Delete(args) => {
                self.planner
                    .delete_activity(&Id { id: args.id })
                    .await
                    .map_err(command_error)?;
                self.render(&DeleteResult::new(args.id, "activity"))
            }
        }
    }

    pub async fn handle_packing_command(&self, command: PackingCommands) -> Result<()> {
        match command {
            PackingCommands::Create(args) => {
                let list = self
                    .planner
                    .create_packing_list(&args.into())
                    .await
                    .map_err(command_error)?;
                self.render(&CreateResult::new(list, "packing list"))
            }
            PackingCommands::List(args) => {
                let lists = self
                    .planner
                    .list_packing_lists(&Id { id: args.trip_id })
                    .await
                    .map_err(command_error)?;
                if lists.is_empty() {
                    return self.render_str("No packing lists found.\n");
                }
                let mut output = String::new();
                for list in &lists {
                    output.push_str(&list.to_string());
                    output.push('\n');
                }
                self.render_str(&output)
            }
            PackingCommands::Show(args) => {
                match self
                    .planner
                    .get_packing_list(&Id { id: args.id })
                    .await
                    .map_err(command_error)?
                {
                    Some(list) => self.render(&list),
                    None => bail!("Packing list {} not found", args.id),
                }
            }
            PackingCommands::Delete(args) => {
                self.planner
                    .delete_packing_list(&Id { id: args.id }, args.force)
                    .await
                    .map_err(command_error)?;
                self.render(&DeleteResult::new(args.id, "packing list"))
            }
            PackingCommands::Add(args) => {
                let item = self
                    .planner
                    .add_packing_item(&args.into())
                    .await
                    .map_err(command_error)?;
                self.render(&CreateResult::new(item, "packing item"))
            }
            PackingCommands::Update(args) => {
                let item = self
                    .planner
                    .update_packing_item(&args.into())
                    .await
                    .map_err(command_error)?;
                self.render(&UpdateResult::new(item, "packing item"))
            }
            PackingCommands::Toggle(args) => {
                let item = self
                    .planner
                    .toggle_packed(&Id { id: args.id })
                    .await
                    .map_err(command_error)?;
                let state = if item.packed { "packed" } else { "unpacked" };
                self.render(&OperationStatus::success(format!(
                    "'{}' is now {state}",
                    item.name
                )))
            }
            PackingCommands::Remove(args) => {
                self.planner
                    .delete_packing_item(&Id { id: args.id })
                    .await
                    .map_err(command_error)?;
                self.render(&DeleteResult::new(args.id, "packing item"))
            }
        }
    }

    /// Lists trips; also the default action when no command is given.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<()> {
        let trips = self
            .planner
            .list_trips(params)
            .await
            .map_err(command_error)?;
        let list = if params.upcoming {
            TripList::with_title(&trips, "Upcoming Trips")
        } else {
            TripList::new(&trips)
        };
        self.render(&list)
    }

    fn render(&self, output: &impl std::fmt::Display) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    fn render_str(&self, output: &str) -> Result<()> {
        self.renderer.render(output)
    }
}

/// Human-readable list of the fields a trip update touches.
fn trip_change_summary(params: &UpdateTrip) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(name) = &params.name {
        changes.push(format!("name: {name}"));
    }
    if let Some(destination) = &params.destination {
        changes.push(format!("destination: {destination}"));
    }
    if let Some(start) = &params.start_date {
        changes.push(format!("start date: {start}"));
    }
    if let Some(end) = &params.end_date {
        changes.push(format!("end date: {end}"));
    }
    if params.description.is_some() {
        changes.push("description".to_string());
    }
    changes
}
