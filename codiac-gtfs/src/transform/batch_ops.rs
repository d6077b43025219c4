use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use gtfs_structures::Gtfs;
use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::transform::color;
use crate::transform::directed_trip::DirectedTrip;
use crate::transform::direction::{splitter, DirectionRegistry};
use crate::transform::feed;
use crate::transform::route_id;
use crate::transform::stop_id;
use crate::transform::summary::TransformSummary;
use crate::transform::text::TextCleaner;
use crate::transform::transform_error::TransformError;
use crate::transform::writer;

/// one output route row for the downstream writer. an empty color means
/// "use the agency color".
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    pub route_id: u64,
    pub short_name: String,
    pub long_name: String,
    pub color: Option<String>,
}

/// one output stop row with the normalized display name.
#[derive(Debug, Clone, Serialize)]
pub struct StopRecord {
    pub stop_id: u64,
    pub name: String,
}

/// everything one batch run produces for the downstream writer.
pub struct FeedOutput {
    pub routes: Vec<RouteRecord>,
    pub trips: Vec<DirectedTrip>,
    pub stops: Vec<StopRecord>,
    pub summary: TransformSummary,
}

/// runs the full one-shot batch: load the bundle, transform it, write the
/// mobile schedule files, and report counts.
pub fn process_feed(
    bundle_file: &str,
    output_directory: &Path,
    overwrite: bool,
) -> Result<TransformSummary, TransformError> {
    let output = load_and_transform(bundle_file)?;
    writer::write_feed_output(&output, output_directory, overwrite)?;
    Ok(output.summary)
}

/// loads a bundle and transforms it in memory without writing files.
pub fn load_and_transform(bundle_file: &str) -> Result<FeedOutput, TransformError> {
    info!("reading GTFS bundle {bundle_file}");
    let gtfs = Gtfs::new(bundle_file)?;
    let registry = DirectionRegistry::builtin()?;
    let cleaner = TextCleaner::new()?;
    let cutoff = chrono::Local::now().date_naive();
    transform_feed(&gtfs, &registry, &cleaner, cutoff)
}

/// transforms one in-memory feed snapshot, route by route in a single
/// sequential pass. the first configuration-gap error aborts the batch;
/// per-trip classification failures are counted and logged inside the
/// splitter instead.
pub fn transform_feed(
    gtfs: &Gtfs,
    registry: &DirectionRegistry,
    cleaner: &TextCleaner,
    cutoff: NaiveDate,
) -> Result<FeedOutput, TransformError> {
    let useful = feed::useful_service_ids(gtfs, cutoff);
    let keep_service = |service_id: &str| useful.contains(service_id);

    let mut routes: Vec<RouteRecord> = Vec::with_capacity(gtfs.routes.len());
    let mut trips: Vec<DirectedTrip> = Vec::new();
    let mut summary = TransformSummary::default();

    // fixed iteration order so repeated runs produce identical output
    for route in gtfs.routes.values().sorted_by_key(|r| r.id.clone()) {
        let short_name = route.short_name.as_deref().unwrap_or_default();
        let route_id = route_id::derive_route_id(short_name)?;
        let raw_trips = feed::extract_route_trips(gtfs, &route.id, &keep_service)?;
        if raw_trips.is_empty() {
            debug!("skipping route {short_name}: no trips on a useful service");
            continue;
        }
        let declared = declared_color(route);
        let route_color = color::route_color(declared.as_deref(), short_name, route_id)?;
        let long_name = route.long_name.as_deref().unwrap_or_default();
        let (route_trips, stats) =
            splitter::split_route(route_id, long_name, &raw_trips, registry, cleaner)?;

        routes.push(RouteRecord {
            route_id,
            short_name: short_name.to_uppercase(),
            long_name: long_name.to_string(),
            color: route_color,
        });
        summary.routes += 1;
        if registry.lookup(route_id).is_some() {
            summary.governed_routes += 1;
        }
        summary.trips_split += stats.trips_split;
        summary.trips_passed_through += stats.trips_passed_through;
        summary.trips_excluded += stats.trips_excluded;
        trips.extend(route_trips);
    }

    routes.sort_by_key(|r| r.route_id);
    trips.sort_by_key(|t| (t.route_id, t.direction_id));

    let stops = collect_stops(gtfs, cleaner, &trips)?;
    summary.stops = stops.len();
    Ok(FeedOutput {
        routes,
        trips,
        stops,
        summary,
    })
}

/// the normalized stop rows for every stop the output trips visit. all feed
/// stops go through id derivation so an unrecognized code format fails the
/// batch even when that stop is unused.
fn collect_stops(
    gtfs: &Gtfs,
    cleaner: &TextCleaner,
    trips: &[DirectedTrip],
) -> Result<Vec<StopRecord>, TransformError> {
    let mut names: BTreeMap<u64, String> = BTreeMap::new();
    for stop in gtfs.stops.values() {
        let code = stop.code.as_deref().filter(|c| !c.is_empty());
        let raw_name = stop.name.as_deref().unwrap_or_default();
        let stop_id = stop_id::derive_stop_id(code.unwrap_or(&stop.id), raw_name)?;
        names.insert(stop_id, cleaner.clean_stop_name(raw_name));
    }
    let used: HashSet<u64> = trips
        .iter()
        .flat_map(|t| t.stops.iter().map(|s| s.stop_id))
        .collect();
    Ok(names
        .into_iter()
        .filter(|(stop_id, _)| used.contains(stop_id))
        .map(|(stop_id, name)| StopRecord { stop_id, name })
        .collect())
}

/// the color declared in the feed, if any. gtfs-structures defaults an
/// absent route_color to white, which the agency never uses as a real route
/// color, so white is treated as undeclared.
fn declared_color(route: &gtfs_structures::Route) -> Option<String> {
    let c = route.color;
    if c.r == 255 && c.g == 255 && c.b == 255 {
        return None;
    }
    Some(format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    use gtfs_structures::{Calendar, Route, Stop, StopTime, Trip};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(service_id: &str, end_date: NaiveDate) -> Calendar {
        Calendar {
            id: service_id.to_string(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: date(2026, 1, 1),
            end_date,
        }
    }

    fn route(id: &str, short_name: &str, long_name: &str) -> Route {
        let mut route = Route {
            id: id.to_string(),
            short_name: Some(short_name.to_string()),
            long_name: Some(long_name.to_string()),
            ..Default::default()
        };
        // a parsed feed defaults an absent route_color to white; a
        // hand-built Route defaults to black
        route.color.r = 255;
        route.color.g = 255;
        route.color.b = 255;
        route
    }

    fn stop(code: &str, name: &str) -> Arc<Stop> {
        Arc::new(Stop {
            id: code.to_string(),
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    fn trip(trip_id: &str, route_id: &str, stops: &[(&str, u32)]) -> Trip {
        Trip {
            id: trip_id.to_string(),
            route_id: route_id.to_string(),
            service_id: String::from("wk"),
            stop_times: stops
                .iter()
                .enumerate()
                .map(|(i, (code, arrival))| StopTime {
                    stop: stop(code, "Main St"),
                    stop_sequence: (i + 1) as u32,
                    arrival_time: Some(*arrival),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn fixture_feed() -> Gtfs {
        let mut gtfs = Gtfs::default();
        gtfs.calendar
            .insert(String::from("wk"), calendar("wk", date(2026, 12, 31)));
        gtfs.routes
            .insert(String::from("60"), route("60", "60", "Elmwood"));
        gtfs.routes
            .insert(String::from("82"), route("82", "82", "Gunningsville"));
        // one classifiable westbound trip, one matching neither direction
        gtfs.trips.insert(
            String::from("west"),
            trip("west", "60", &[("6810234", 100), ("6810763", 200)]),
        );
        gtfs.trips.insert(
            String::from("stray"),
            trip("stray", "60", &[("6810001", 100), ("6810002", 200)]),
        );
        gtfs.trips.insert(
            String::from("loop"),
            trip("loop", "82", &[("6810100", 100), ("6810101", 200)]),
        );
        for code in ["6810234", "6810763", "6810001", "6810002", "6810100", "6810101"] {
            gtfs.stops.insert(code.to_string(), stop(code, "Main Street"));
        }
        gtfs
    }

    #[test]
    fn test_summary_counts_split_passed_and_excluded() {
        let gtfs = fixture_feed();
        let registry = DirectionRegistry::builtin().unwrap();
        let cleaner = TextCleaner::new().unwrap();
        let output = transform_feed(&gtfs, &registry, &cleaner, date(2026, 6, 1)).unwrap();

        assert_eq!(output.summary.routes, 2);
        assert_eq!(output.summary.governed_routes, 1);
        assert_eq!(output.summary.trips_split, 1);
        assert_eq!(output.summary.trips_passed_through, 1);
        assert_eq!(output.summary.trips_excluded, 1);
        // excluded-trip stops never reach the output
        assert_eq!(output.summary.stops, 4);
    }

    #[test]
    fn test_transformed_routes_and_trips() {
        let gtfs = fixture_feed();
        let registry = DirectionRegistry::builtin().unwrap();
        let cleaner = TextCleaner::new().unwrap();
        let output = transform_feed(&gtfs, &registry, &cleaner, date(2026, 6, 1)).unwrap();

        let colors: Vec<(u64, Option<&str>)> = output
            .routes
            .iter()
            .map(|r| (r.route_id, r.color.as_deref()))
            .collect();
        assert_eq!(colors, vec![(60, Some("E977AF")), (82, Some("FDCC08"))]);

        // two directional trips for the governed route, one pass-through
        assert_eq!(output.trips.len(), 3);
        let west = &output.trips[1];
        assert_eq!(west.headsign, "Bessborough");
        assert_eq!(west.stops.len(), 2);
        let stop_names: Vec<&str> = output.stops.iter().map(|s| s.name.as_str()).collect();
        assert!(stop_names.iter().all(|n| *n == "Main St"));
    }

    #[test]
    fn test_expired_service_leaves_route_unreported() {
        let mut gtfs = fixture_feed();
        gtfs.calendar
            .insert(String::from("wk"), calendar("wk", date(2026, 3, 1)));
        let registry = DirectionRegistry::builtin().unwrap();
        let cleaner = TextCleaner::new().unwrap();
        let output = transform_feed(&gtfs, &registry, &cleaner, date(2026, 6, 1)).unwrap();
        assert_eq!(output.summary.routes, 0);
        assert!(output.trips.is_empty());
    }
}
