use std::collections::{BinaryHeap, HashSet};

use chrono::NaiveDate;
use gtfs_structures::{DirectionType, Exception, Gtfs, StopTime, Trip};

use crate::transform::stop_id;
use crate::transform::transform_error::TransformError;

/// one stop visit from the raw feed, with the agency-numeric stop id already
/// derived and the arrival clock in seconds after midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStopTime {
    pub stop_id: u64,
    pub arrival: u32,
}

/// a GTFS trip as consumed by the splitter: the raw route reference, the
/// optional raw headsign, and stop visits in stop_sequence order.
#[derive(Debug, Clone)]
pub struct RawTrip {
    pub trip_id: String,
    pub route_id: String,
    pub headsign: Option<String>,
    pub direction_id: u8,
    pub stops: Vec<RawStopTime>,
}

impl RawTrip {
    pub fn stop_ids(&self) -> Vec<u64> {
        self.stops.iter().map(|st| st.stop_id).collect()
    }
}

/// service ids still worth keeping: the calendar window has not fully
/// expired, or at least one calendar-date exception still adds service on or
/// after the cutoff date.
pub fn useful_service_ids(gtfs: &Gtfs, cutoff: NaiveDate) -> HashSet<String> {
    let mut useful = HashSet::new();
    for (service_id, calendar) in &gtfs.calendar {
        if calendar.end_date >= cutoff {
            useful.insert(service_id.clone());
        }
    }
    for (service_id, dates) in &gtfs.calendar_dates {
        let still_added = dates
            .iter()
            .any(|cd| cd.exception_type == Exception::Added && cd.date >= cutoff);
        if still_added {
            useful.insert(service_id.clone());
        }
    }
    useful
}

/// collects the [`RawTrip`]s of one route, keeping only trips whose service
/// id passes the upstream usefulness predicate. trips are ordered by first
/// arrival so repeated runs produce identical output.
pub fn extract_route_trips(
    gtfs: &Gtfs,
    raw_route_id: &str,
    keep_service: &dyn Fn(&str) -> bool,
) -> Result<Vec<RawTrip>, TransformError> {
    let mut trips = Vec::new();
    for trip in gtfs.trips.values() {
        if trip.route_id != raw_route_id || !keep_service(&trip.service_id) {
            continue;
        }
        trips.push(extract_trip(trip)?);
    }
    trips.sort_by_key(|t| (t.stops.first().map(|st| st.arrival), t.trip_id.clone()));
    Ok(trips)
}

/// converts one feed trip, deriving numeric stop ids and ordering stop
/// visits by stop_sequence. an empty stop list or a stop time with neither
/// arrival nor departure is malformed and fatal for the batch.
pub fn extract_trip(trip: &Trip) -> Result<RawTrip, TransformError> {
    if trip.stop_times.is_empty() {
        return Err(malformed(trip, String::from("empty stop list")));
    }
    let mut stops = Vec::with_capacity(trip.stop_times.len());
    for stop_time in ordered_stop_times(trip) {
        let stop = &stop_time.stop;
        let code = stop.code.as_deref().filter(|c| !c.is_empty());
        let name = stop.name.as_deref().unwrap_or_default();
        let stop_id = stop_id::derive_stop_id(code.unwrap_or(&stop.id), name)?;
        let arrival = stop_time
            .arrival_time
            .or(stop_time.departure_time)
            .ok_or_else(|| {
                malformed(
                    trip,
                    format!("missing arrival and departure time at stop {}", stop.id),
                )
            })?;
        stops.push(RawStopTime { stop_id, arrival });
    }
    Ok(RawTrip {
        trip_id: trip.id.clone(),
        route_id: trip.route_id.clone(),
        headsign: trip.trip_headsign.clone().filter(|h| !h.trim().is_empty()),
        direction_id: match trip.direction_id {
            Some(DirectionType::Inbound) => 1,
            _ => 0,
        },
        stops,
    })
}

/// returns the trip's stop times sorted ascending by stop_sequence.
fn ordered_stop_times(trip: &Trip) -> Vec<&StopTime> {
    let order: BinaryHeap<(u32, usize)> = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (st.stop_sequence, i))
        .collect();
    order
        .into_sorted_vec()
        .iter()
        .map(|(_, idx)| &trip.stop_times[*idx])
        .collect()
}

fn malformed(trip: &Trip, msg: String) -> TransformError {
    TransformError::MalformedTrip {
        trip_id: trip.id.clone(),
        route_id: trip.route_id.clone(),
        msg,
    }
}
