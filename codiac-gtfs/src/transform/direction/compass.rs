use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// the geographic heading riders see for one travel direction of a route.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompassDirection {
    North,
    South,
    East,
    West,
}

impl Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CompassDirection::North => "north",
            CompassDirection::South => "south",
            CompassDirection::East => "east",
            CompassDirection::West => "west",
        };
        write!(f, "{label}")
    }
}
