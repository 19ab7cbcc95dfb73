pub mod binding;
pub mod calibration;
pub mod control;
pub mod dispatcher;
pub mod extractor;
pub mod gate;
pub mod pipeline;
pub mod snapshot;
pub mod types;

pub use control::{ControlState, Controller, SharedControl};
pub use pipeline::RetargetingPipeline;
pub use snapshot::PoseSnapshot;
pub use types::{AngleSlot, AngleVector, BodyReading};
