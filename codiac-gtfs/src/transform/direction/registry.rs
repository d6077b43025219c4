use std::collections::HashMap;

use crate::transform::direction::RouteDirectionSpec;
use crate::transform::route_id;
use crate::transform::transform_error::TransformError;

/// the curated direction table, versioned alongside the code so updates to
/// the hand-maintained data never touch the classification logic.
const BUILTIN_TABLE: &str = include_str!("../../../config/route_directions.json");

/// immutable lookup from numeric route id to the curated splitting rule for
/// that route. routes absent from the registry split cleanly with the
/// generic direction inference and pass through untouched.
pub struct DirectionRegistry {
    specs: HashMap<u64, RouteDirectionSpec>,
}

impl DirectionRegistry {
    /// builds the registry from the direction table shipped with the crate.
    pub fn builtin() -> Result<DirectionRegistry, TransformError> {
        DirectionRegistry::from_json(BUILTIN_TABLE)
    }

    /// parses and validates a direction table. fails fast on any maintenance
    /// mistake: unparseable entries, duplicate routes, or invariant
    /// violations inside a single route's spec.
    pub fn from_json(text: &str) -> Result<DirectionRegistry, TransformError> {
        let entries: Vec<RouteDirectionSpec> = serde_json::from_str(text)
            .map_err(|e| TransformError::DirectionTableError(format!("{e}")))?;
        let mut specs: HashMap<u64, RouteDirectionSpec> = HashMap::with_capacity(entries.len());
        for mut spec in entries {
            spec.route_id = route_id::derive_route_id(&spec.route_short_name)?;
            spec.validate()?;
            if specs.insert(spec.route_id, spec.clone()).is_some() {
                return Err(TransformError::DuplicateRouteEntry(spec.route_short_name));
            }
        }
        Ok(DirectionRegistry { specs })
    }

    pub fn lookup(&self, route_id: u64) -> Option<&RouteDirectionSpec> {
        self.specs.get(&route_id)
    }

    /// iterates the governed route specs.
    pub fn specs(&self) -> impl Iterator<Item = &RouteDirectionSpec> {
        self.specs.values()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
