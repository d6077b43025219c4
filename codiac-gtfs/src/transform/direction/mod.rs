pub mod classifier;
mod compass;
pub mod projector;
mod registry;
mod route_direction_spec;
pub mod splitter;

pub use classifier::classify;
pub use compass::CompassDirection;
pub use projector::{merge_stop_lists, project, project_natural};
pub use registry::DirectionRegistry;
pub use route_direction_spec::{DirectionSlot, DirectionSpec, RouteDirectionSpec};
pub use splitter::{direction_templates, merge_headsigns, split_route, SplitStats};
