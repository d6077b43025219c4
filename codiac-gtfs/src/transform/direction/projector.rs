use crate::transform::directed_trip::ProjectedStop;
use crate::transform::direction::{DirectionSlot, RouteDirectionSpec};
use crate::transform::feed::RawTrip;
use crate::transform::transform_error::TransformError;

/// projects a trip's stop visits onto its assigned direction.
///
/// sequence numbers follow the trip's natural arrival order, 1-based and
/// strictly increasing. each stop additionally carries the reference-list
/// position of the nearest reference stop matched at or before it, which
/// [`merge_stop_lists`] uses to order stops from different trips at a shared
/// point; stops before the first match are outliers with no anchor.
pub fn project(
    trip: &RawTrip,
    slot: DirectionSlot,
    spec: &RouteDirectionSpec,
) -> Result<Vec<ProjectedStop>, TransformError> {
    let reference = &spec.direction(slot).reference_stops;
    let stops = number_stops(trip)?;
    Ok(annotate_anchors(stops, reference))
}

/// projection for routes without a curated direction spec: natural arrival
/// order only, every stop an outlier.
pub fn project_natural(trip: &RawTrip) -> Result<Vec<ProjectedStop>, TransformError> {
    number_stops(trip)
}

fn number_stops(trip: &RawTrip) -> Result<Vec<ProjectedStop>, TransformError> {
    if trip.stops.is_empty() {
        return Err(TransformError::MalformedTrip {
            trip_id: trip.trip_id.clone(),
            route_id: trip.route_id.clone(),
            msg: String::from("empty stop list"),
        });
    }
    Ok(trip
        .stops
        .iter()
        .enumerate()
        .map(|(i, stop_time)| ProjectedStop {
            stop_id: stop_time.stop_id,
            sequence: (i + 1) as u32,
            anchor_position: None,
            arrival: stop_time.arrival,
        })
        .collect())
}

/// carries the position of the last in-order reference match forward over
/// the stops that follow it.
fn annotate_anchors(mut stops: Vec<ProjectedStop>, reference: &[u64]) -> Vec<ProjectedStop> {
    let mut cursor = 0;
    let mut last_anchor: Option<u32> = None;
    for stop in stops.iter_mut() {
        if let Some(found) = reference[cursor..].iter().position(|r| *r == stop.stop_id) {
            cursor += found + 1;
            last_anchor = Some((cursor - 1) as u32);
        }
        stop.anchor_position = last_anchor;
    }
    stops
}

/// merges the projected stops of two trips of the same direction into one
/// ordered list, deciding "which stop comes first" for the downstream UI.
///
/// both inputs keep their internal order. when the heads disagree, the stop
/// with the smaller anchor position goes first; stops without a usable
/// anchor comparison fall back to raw arrival order. shared stops are
/// emitted once. the result is renumbered 1..n.
pub fn merge_stop_lists(first: &[ProjectedStop], second: &[ProjectedStop]) -> Vec<ProjectedStop> {
    let mut merged: Vec<ProjectedStop> = Vec::with_capacity(first.len().max(second.len()));
    let (mut i, mut j) = (0, 0);
    while i < first.len() && j < second.len() {
        let (x, y) = (&first[i], &second[j]);
        if x.stop_id == y.stop_id {
            merged.push(x.clone());
            i += 1;
            j += 1;
            continue;
        }
        let x_first = match (x.anchor_position, y.anchor_position) {
            (Some(p), Some(q)) if p != q => p < q,
            _ => x.arrival <= y.arrival,
        };
        if x_first {
            merged.push(x.clone());
            i += 1;
        } else {
            merged.push(y.clone());
            j += 1;
        }
    }
    merged.extend(first[i..].iter().cloned());
    merged.extend(second[j..].iter().cloned());

    // a stop can still appear twice when the two trips visit it at different
    // relative points; keep the first occurrence
    let mut seen = std::collections::HashSet::new();
    merged.retain(|stop| seen.insert(stop.stop_id));
    for (index, stop) in merged.iter_mut().enumerate() {
        stop.sequence = (index + 1) as u32;
    }
    merged
}
