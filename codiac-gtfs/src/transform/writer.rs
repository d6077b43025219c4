use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::transform::batch_ops::FeedOutput;
use crate::transform::directed_trip::DirectedTrip;
use crate::transform::transform_error::TransformError;

/// one row of trips.csv.
#[derive(Debug, Serialize)]
struct TripRow<'a> {
    route_id: u64,
    direction_id: u8,
    heading: Option<String>,
    headsign: &'a str,
}

/// one row of trip_stops.csv.
#[derive(Debug, Serialize)]
struct TripStopRow {
    route_id: u64,
    direction_id: u8,
    stop_id: u64,
    sequence: u32,
}

/// writes the transform output as the csv resource files consumed by the
/// mobile-app data generator. refuses to clobber existing files unless
/// `overwrite` is set.
pub fn write_feed_output(
    output: &FeedOutput,
    output_directory: &Path,
    overwrite: bool,
) -> Result<(), TransformError> {
    fs::create_dir_all(output_directory)
        .map_err(|e| output_error(output_directory, format!("{e}")))?;

    write_rows(output_directory, "routes.csv", overwrite, &output.routes)?;

    let trip_rows: Vec<TripRow> = output
        .trips
        .iter()
        .map(|t| TripRow {
            route_id: t.route_id,
            direction_id: t.direction_id,
            heading: t.heading.map(|h| h.to_string()),
            headsign: &t.headsign,
        })
        .collect();
    write_rows(output_directory, "trips.csv", overwrite, &trip_rows)?;

    let trip_stop_rows: Vec<TripStopRow> = output.trips.iter().flat_map(stop_rows).collect();
    write_rows(output_directory, "trip_stops.csv", overwrite, &trip_stop_rows)?;

    write_rows(output_directory, "stops.csv", overwrite, &output.stops)?;
    info!("wrote mobile schedule files to {}", output_directory.display());
    Ok(())
}

fn stop_rows(trip: &DirectedTrip) -> Vec<TripStopRow> {
    trip.stops
        .iter()
        .map(|s| TripStopRow {
            route_id: trip.route_id,
            direction_id: trip.direction_id,
            stop_id: s.stop_id,
            sequence: s.sequence,
        })
        .collect()
}

fn write_rows<T: Serialize>(
    output_directory: &Path,
    filename: &str,
    overwrite: bool,
    rows: &[T],
) -> Result<(), TransformError> {
    let path = output_directory.join(filename);
    if path.exists() && !overwrite {
        return Err(TransformError::OutputError {
            filename: filename.to_string(),
            msg: String::from("file exists and --overwrite was not set"),
        });
    }
    let mut csv_writer = csv::Writer::from_path(&path).map_err(|e| TransformError::OutputError {
        filename: filename.to_string(),
        msg: format!("{e}"),
    })?;
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| TransformError::OutputError {
                filename: filename.to_string(),
                msg: format!("{e}"),
            })?;
    }
    csv_writer.flush().map_err(|e| TransformError::OutputError {
        filename: filename.to_string(),
        msg: format!("{e}"),
    })
}

fn output_error(path: &Path, msg: String) -> TransformError {
    TransformError::OutputError {
        filename: path.display().to_string(),
        msg,
    }
}
