pub mod image_loader;
pub mod pipeline;
pub mod progress;

pub use image_loader::{decode_png, load_png, RgbaImage};
pub use pipeline::{ramp_hex, PipelineOutput, RampPipeline};
pub use progress::TracingProgress;
