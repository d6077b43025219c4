use serde::Serialize;

use crate::transform::direction::CompassDirection;

/// a stop visit with its final output ordering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectedStop {
    pub stop_id: u64,
    /// 1-based, strictly increasing within one trip.
    pub sequence: u32,
    /// reference-list position of the nearest matched reference stop at or
    /// before this visit, used when trips are ordered relative to each other
    /// at a shared stop. `None` marks an outlier with no anchor yet.
    #[serde(skip)]
    pub anchor_position: Option<u32>,
    #[serde(skip)]
    pub arrival: u32,
}

/// one direction-labeled output trip: canonical headsign, optional compass
/// heading (curated routes only), and final per-stop sequence numbers.
#[derive(Debug, Clone, Serialize)]
pub struct DirectedTrip {
    pub route_id: u64,
    pub direction_id: u8,
    pub heading: Option<CompassDirection>,
    pub headsign: String,
    pub stops: Vec<ProjectedStop>,
}
