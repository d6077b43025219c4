pub mod app;
mod batch_ops;
mod color;
mod directed_trip;
pub mod direction;
mod feed;
mod route_id;
mod stop_id;
mod summary;
mod text;
mod transform_error;
mod writer;

pub use batch_ops::{
    load_and_transform, process_feed, transform_feed, FeedOutput, RouteRecord, StopRecord,
};
pub use color::{route_color, AGENCY_COLOR};
pub use directed_trip::{DirectedTrip, ProjectedStop};
pub use feed::{extract_route_trips, useful_service_ids, RawStopTime, RawTrip};
pub use route_id::derive_route_id;
pub use stop_id::derive_stop_id;
pub use summary::TransformSummary;
pub use text::TextCleaner;
pub use transform_error::TransformError;
pub use writer::write_feed_output;
