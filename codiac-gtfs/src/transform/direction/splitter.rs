use log::warn;

use crate::transform::directed_trip::DirectedTrip;
use crate::transform::direction::{
    classifier, projector, DirectionRegistry, DirectionSlot, RouteDirectionSpec,
};
use crate::transform::feed::RawTrip;
use crate::transform::route_id::RID_ENDS_WITH_A;
use crate::transform::text::TextCleaner;
use crate::transform::transform_error::TransformError;

/// known headsign equivalences: pairs of variants observed for the same
/// logical direction, with the canonical rider-facing label. an unlisted
/// pair is a configuration gap, never guessed. merges only happen on the
/// pass-through path; the 64 and 65 entries take effect again if those
/// routes ever leave the direction table.
const HEADSIGN_MERGES: &[(u64, [&str; 2], &str)] = &[
    (
        61 + RID_ENDS_WITH_A,
        ["Elmwood Dr & Donald Ave", "CF Champlain"],
        "CF Champlain",
    ),
    (64, ["Ctr Hospitalier Universaire", "1111 Main"], "1111 Main"),
    (65, ["Killam Dr & Purdy Ave", "North Plz"], "North Plz"),
    (
        82,
        ["Riverview Pl Routing", "Gunningsville"],
        "Gunningsville",
    ),
];

/// per-route split outcome counters, aggregated into the batch summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitStats {
    pub trips_split: usize,
    pub trips_passed_through: usize,
    pub trips_excluded: usize,
}

/// the two directional output templates for a governed route, pre-populated
/// with the canonical headsign and compass heading. slot A maps to GTFS
/// direction 0 and slot B to direction 1.
pub fn direction_templates(spec: &RouteDirectionSpec) -> (DirectedTrip, DirectedTrip) {
    let template = |slot: DirectionSlot, direction_id: u8| DirectedTrip {
        route_id: spec.route_id,
        direction_id,
        heading: Some(spec.direction(slot).heading),
        headsign: spec.direction(slot).headsign.clone(),
        stops: Vec::new(),
    };
    (
        template(DirectionSlot::A, 0),
        template(DirectionSlot::B, 1),
    )
}

/// splits one route's trips into direction-labeled output trips.
///
/// governed routes produce exactly two trips, one per curated direction;
/// each raw trip is classified, projected, and merged into its direction's
/// template. a trip matching neither direction is excluded and warn-logged
/// rather than mislabeled. ungoverned routes pass through grouped by the
/// feed's own direction flag, with headsigns cleaned and known variants
/// merged to one canonical label.
pub fn split_route(
    route_id: u64,
    route_long_name: &str,
    trips: &[RawTrip],
    registry: &DirectionRegistry,
    cleaner: &TextCleaner,
) -> Result<(Vec<DirectedTrip>, SplitStats), TransformError> {
    match registry.lookup(route_id) {
        Some(spec) => split_governed(spec, trips),
        None => pass_through(route_id, route_long_name, trips, cleaner),
    }
}

fn split_governed(
    spec: &RouteDirectionSpec,
    trips: &[RawTrip],
) -> Result<(Vec<DirectedTrip>, SplitStats), TransformError> {
    let (mut trip_a, mut trip_b) = direction_templates(spec);
    let mut stats = SplitStats::default();
    for trip in trips {
        let slot = match classifier::classify(trip, spec) {
            Ok(slot) => slot,
            Err(TransformError::UnclassifiableTrip { trip_id, route_id }) => {
                warn!("excluding trip {trip_id} on route {route_id}: matches neither curated direction");
                stats.trips_excluded += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        let projected = projector::project(trip, slot, spec)?;
        let template = match slot {
            DirectionSlot::A => &mut trip_a,
            DirectionSlot::B => &mut trip_b,
        };
        template.stops = projector::merge_stop_lists(&template.stops, &projected);
        stats.trips_split += 1;
    }
    Ok((vec![trip_a, trip_b], stats))
}

fn pass_through(
    route_id: u64,
    route_long_name: &str,
    trips: &[RawTrip],
    cleaner: &TextCleaner,
) -> Result<(Vec<DirectedTrip>, SplitStats), TransformError> {
    let mut outputs: Vec<DirectedTrip> = Vec::new();
    let mut stats = SplitStats::default();
    for trip in trips {
        let raw_headsign = trip.headsign.as_deref().unwrap_or(route_long_name);
        let headsign = cleaner.clean_headsign(raw_headsign);
        let projected = projector::project_natural(trip)?;
        match outputs
            .iter_mut()
            .find(|out| out.direction_id == trip.direction_id)
        {
            Some(existing) => {
                if existing.headsign != headsign {
                    existing.headsign =
                        merge_headsigns(route_id, &existing.headsign, &headsign)?;
                }
                existing.stops = projector::merge_stop_lists(&existing.stops, &projected);
            }
            None => outputs.push(DirectedTrip {
                route_id,
                direction_id: trip.direction_id,
                heading: None,
                headsign,
                stops: projected,
            }),
        }
        stats.trips_passed_through += 1;
    }
    Ok((outputs, stats))
}

/// resolves two headsign variants observed for the same logical direction to
/// one canonical label via the fixed equivalence table. an unlisted pair is
/// surfaced loudly with both values; silent merging risks shipping a wrong
/// rider-facing label.
pub fn merge_headsigns(
    route_id: u64,
    first: &str,
    second: &str,
) -> Result<String, TransformError> {
    if first == second {
        return Ok(first.to_string());
    }
    for (merge_route, pair, canonical) in HEADSIGN_MERGES {
        if *merge_route == route_id && pair.contains(&first) && pair.contains(&second) {
            return Ok(canonical.to_string());
        }
    }
    Err(TransformError::UnknownHeadsignMerge {
        route_id,
        first: first.to_string(),
        second: second.to_string(),
    })
}
