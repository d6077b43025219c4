use serde::Deserialize;

use crate::transform::direction::CompassDirection;
use crate::transform::transform_error::TransformError;

/// one curated direction of a governed route: the heading riders see, the
/// canonical headsign, and a short ordered list of decision stops taken from
/// a model trip in that direction. the list is not a complete path; its first
/// and last entries act as the direction's anchors.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionSpec {
    pub heading: CompassDirection,
    pub headsign: String,
    pub reference_stops: Vec<u64>,
}

impl DirectionSpec {
    /// the origin-terminal anchor used for tie-breaking.
    pub fn anchor(&self) -> Option<u64> {
        self.reference_stops.first().copied()
    }
}

/// identifies one of the two direction slots of a [`RouteDirectionSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionSlot {
    A,
    B,
}

/// curated splitting rule for one route whose raw trips do not separate
/// cleanly into two directions. built once at startup from the direction
/// table and read-only for the run.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDirectionSpec {
    /// route short name as published in the feed; the numeric id is derived
    /// from it when the registry is built.
    pub route_short_name: String,
    #[serde(skip)]
    pub route_id: u64,
    pub direction_a: DirectionSpec,
    pub direction_b: DirectionSpec,
}

impl RouteDirectionSpec {
    pub fn direction(&self, slot: DirectionSlot) -> &DirectionSpec {
        match slot {
            DirectionSlot::A => &self.direction_a,
            DirectionSlot::B => &self.direction_b,
        }
    }

    /// checks the hand-maintained invariants; a violation is a maintenance
    /// mistake in the direction table and must never pass silently.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.direction_a.heading == self.direction_b.heading {
            return Err(TransformError::DuplicateDirection {
                route_id: self.route_id,
                heading: self.direction_a.heading.to_string(),
            });
        }
        for spec in [&self.direction_a, &self.direction_b] {
            if spec.reference_stops.is_empty() {
                return Err(self.invalid(format!(
                    "empty reference stop sequence for {}",
                    spec.heading
                )));
            }
            if spec.headsign.trim().is_empty() {
                return Err(self.invalid(format!("empty headsign for {}", spec.heading)));
            }
        }
        if self.direction_a.reference_stops == self.direction_b.reference_stops {
            return Err(self.invalid(String::from(
                "identical reference stop sequences for both directions",
            )));
        }
        Ok(())
    }

    fn invalid(&self, msg: String) -> TransformError {
        TransformError::InvalidDirectionSpec {
            route_id: self.route_id,
            msg,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn spec(reference_a: Vec<u64>, reference_b: Vec<u64>) -> RouteDirectionSpec {
        RouteDirectionSpec {
            route_short_name: String::from("60"),
            route_id: 60,
            direction_a: DirectionSpec {
                heading: CompassDirection::East,
                headsign: String::from("1111 Main"),
                reference_stops: reference_a,
            },
            direction_b: DirectionSpec {
                heading: CompassDirection::West,
                headsign: String::from("Bessborough"),
                reference_stops: reference_b,
            },
        }
    }

    #[test]
    fn test_valid_spec_passes() {
        let spec = spec(vec![1, 2, 3], vec![3, 4, 1]);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_identical_sequences_rejected() {
        let spec = spec(vec![1, 2, 3], vec![1, 2, 3]);
        assert!(matches!(
            spec.validate(),
            Err(TransformError::InvalidDirectionSpec { route_id: 60, .. })
        ));
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let spec = spec(vec![], vec![1, 2]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_same_heading_twice_rejected() {
        let mut spec = spec(vec![1, 2], vec![2, 1]);
        spec.direction_b.heading = CompassDirection::East;
        assert!(matches!(
            spec.validate(),
            Err(TransformError::DuplicateDirection { route_id: 60, .. })
        ));
    }
}
