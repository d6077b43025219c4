mod operation;
mod transform_app;

pub use operation::TransformOperation;
pub use transform_app::TransformApp;
