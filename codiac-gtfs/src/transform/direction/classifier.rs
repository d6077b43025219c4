use crate::transform::direction::{DirectionSlot, RouteDirectionSpec};
use crate::transform::feed::RawTrip;
use crate::transform::transform_error::TransformError;

/// decides which curated direction a trip belongs to.
///
/// each direction is scored by how many of its reference stops appear, in
/// order, within the trip's stop list; the higher score wins. ties prefer
/// the direction whose anchor (first reference stop) the trip reaches
/// earlier, then slot A, so repeated runs always agree. a trip matching
/// neither direction is never assigned arbitrarily: it is returned as an
/// error and the caller excludes it from output.
pub fn classify(
    trip: &RawTrip,
    spec: &RouteDirectionSpec,
) -> Result<DirectionSlot, TransformError> {
    let stops = trip.stop_ids();
    let score_a = subsequence_score(&spec.direction_a.reference_stops, &stops);
    let score_b = subsequence_score(&spec.direction_b.reference_stops, &stops);
    if score_a == 0 && score_b == 0 {
        return Err(TransformError::UnclassifiableTrip {
            trip_id: trip.trip_id.clone(),
            route_id: spec.route_id,
        });
    }
    if score_a != score_b {
        return Ok(if score_a > score_b {
            DirectionSlot::A
        } else {
            DirectionSlot::B
        });
    }
    // equal scores: the direction whose anchor the trip reaches first
    let anchor_index = |anchor: Option<u64>| -> Option<usize> {
        anchor.and_then(|stop_id| stops.iter().position(|s| *s == stop_id))
    };
    let index_a = anchor_index(spec.direction_a.anchor());
    let index_b = anchor_index(spec.direction_b.anchor());
    match (index_a, index_b) {
        (Some(a), Some(b)) if b < a => Ok(DirectionSlot::B),
        (None, Some(_)) => Ok(DirectionSlot::B),
        _ => Ok(DirectionSlot::A),
    }
}

/// counts how many reference stops appear, in order, within the trip's stop
/// list. reference lists are short curated decision points, so a greedy
/// forward scan is enough; there is no full sequence alignment.
fn subsequence_score(reference: &[u64], stops: &[u64]) -> usize {
    let mut matched = 0;
    let mut start = 0;
    for reference_stop in reference {
        if let Some(found) = stops[start..].iter().position(|s| s == reference_stop) {
            matched += 1;
            start += found + 1;
        }
    }
    matched
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::transform::direction::{CompassDirection, DirectionSpec};
    use crate::transform::feed::RawStopTime;

    fn route_60_spec() -> RouteDirectionSpec {
        RouteDirectionSpec {
            route_short_name: String::from("60"),
            route_id: 60,
            direction_a: DirectionSpec {
                heading: CompassDirection::East,
                headsign: String::from("1111 Main"),
                reference_stops: vec![6810277, 6810770, 6810286, 6810234],
            },
            direction_b: DirectionSpec {
                heading: CompassDirection::West,
                headsign: String::from("Bessborough"),
                reference_stops: vec![6810234, 6810763, 6810277],
            },
        }
    }

    fn trip(stop_ids: &[u64]) -> RawTrip {
        RawTrip {
            trip_id: String::from("t1"),
            route_id: String::from("60"),
            headsign: None,
            direction_id: 0,
            stops: stop_ids
                .iter()
                .enumerate()
                .map(|(i, id)| RawStopTime {
                    stop_id: *id,
                    arrival: 28_800 + 60 * i as u32,
                })
                .collect(),
        }
    }

    #[test]
    fn test_westbound_trip_matches_west_references() {
        let spec = route_60_spec();
        // two west reference stops in order, only one east stop
        let trip = trip(&[100, 200, 6810234, 6810763]);
        assert_eq!(classify(&trip, &spec).unwrap(), DirectionSlot::B);
    }

    #[test]
    fn test_eastbound_trip_matches_east_references() {
        let spec = route_60_spec();
        let trip = trip(&[6810277, 6810770, 6810286, 6810234]);
        assert_eq!(classify(&trip, &spec).unwrap(), DirectionSlot::A);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let spec = route_60_spec();
        let trip = trip(&[100, 6810234, 6810763]);
        let first = classify(&trip, &spec).unwrap();
        for _ in 0..10 {
            assert_eq!(classify(&trip, &spec).unwrap(), first);
        }
    }

    #[test]
    fn test_tie_breaks_on_earlier_anchor() {
        let spec = RouteDirectionSpec {
            route_short_name: String::from("63"),
            route_id: 63,
            direction_a: DirectionSpec {
                heading: CompassDirection::East,
                headsign: String::from("Gagnon / Shediac"),
                reference_stops: vec![1, 2],
            },
            direction_b: DirectionSpec {
                heading: CompassDirection::West,
                headsign: String::from("Champlain Pl"),
                reference_stops: vec![3, 4],
            },
        };
        // one anchor match per direction; the west anchor comes first
        let trip_west_first = trip(&[3, 1]);
        assert_eq!(classify(&trip_west_first, &spec).unwrap(), DirectionSlot::B);
        // reversed visitation order resolves east
        let trip_east_first = trip(&[1, 3]);
        assert_eq!(classify(&trip_east_first, &spec).unwrap(), DirectionSlot::A);
    }

    #[test]
    fn test_tie_with_equal_anchors_prefers_slot_a() {
        let spec = RouteDirectionSpec {
            route_short_name: String::from("50"),
            route_id: 50,
            direction_a: DirectionSpec {
                heading: CompassDirection::East,
                headsign: String::from("Champlain Pl"),
                reference_stops: vec![1, 2],
            },
            direction_b: DirectionSpec {
                heading: CompassDirection::West,
                headsign: String::from("Plz Blvd"),
                reference_stops: vec![1, 3],
            },
        };
        // both directions share the anchor and score one match each
        let trip = trip(&[1, 99]);
        assert_eq!(classify(&trip, &spec).unwrap(), DirectionSlot::A);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let spec = route_60_spec();
        let trip = trip(&[1, 2, 3]);
        assert!(matches!(
            classify(&trip, &spec),
            Err(TransformError::UnclassifiableTrip { route_id: 60, .. })
        ));
    }

    #[test]
    fn test_out_of_order_stops_do_not_count() {
        let spec = route_60_spec();
        // visits the west reference stops in reverse, so west only scores
        // one in-order match while east scores two
        let trip = trip(&[6810277, 6810763, 6810234]);
        assert_eq!(classify(&trip, &spec).unwrap(), DirectionSlot::A);
    }
}
