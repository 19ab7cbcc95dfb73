pub mod frame;

pub use frame::{BodyFrame, HandSide, HandState, JointId, Point3};
