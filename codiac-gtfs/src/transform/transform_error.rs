/// Errors raised while transforming one agency feed into mobile schedule data.
///
/// The configuration-gap variants (unknown route suffix, unknown color,
/// unknown stop code format, unlisted headsign merge) mean the curated tables
/// have fallen behind the upstream feed; they are fatal for the whole batch.
/// [`TransformError::UnclassifiableTrip`] is scoped to a single trip and the
/// caller may exclude that trip and continue.
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("Failed to read GTFS bundle: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("Unexpected route short name '{0}', no route id rule matches")]
    UnknownRouteShortName(String),
    #[error("Unexpected route color for route '{short_name}' (id {route_id})")]
    UnknownRouteColor { short_name: String, route_id: u64 },
    #[error("Unexpected stop code '{stop_code}' for stop '{stop_name}'")]
    UnknownStopCode {
        stop_code: String,
        stop_name: String,
    },
    #[error("Unexpected headsigns to merge for route {route_id}: '{first}' & '{second}'")]
    UnknownHeadsignMerge {
        route_id: u64,
        first: String,
        second: String,
    },
    #[error("Route '{0}' appears more than once in the direction table")]
    DuplicateRouteEntry(String),
    #[error("Route {route_id} registers direction {heading} for both slots")]
    DuplicateDirection { route_id: u64, heading: String },
    #[error("Invalid direction spec for route {route_id}: {msg}")]
    InvalidDirectionSpec { route_id: u64, msg: String },
    #[error("Failed to parse route direction table: {0}")]
    DirectionTableError(String),
    #[error("Failed to compile text cleanup pattern: {0}")]
    TextPatternError(String),
    #[error("Trip {trip_id} on route {route_id} matches neither curated direction")]
    UnclassifiableTrip { trip_id: String, route_id: u64 },
    #[error("Malformed trip {trip_id} on route {route_id}: {msg}")]
    MalformedTrip {
        trip_id: String,
        route_id: String,
        msg: String,
    },
    #[error("Failed writing output file '{filename}': {msg}")]
    OutputError { filename: String, msg: String },
}
