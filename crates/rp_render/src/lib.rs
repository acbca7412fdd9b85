pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod shape_pipeline;
pub mod vertex;

pub use batch::{rgba8, ShapeBatch};
pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::GpuContext;
pub use shape_pipeline::ShapePipeline;
pub use vertex::ShapeVertex;
