pub mod actuator;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod intake;
pub mod pipeline;

pub use error::AppError;

pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use pipeline::control::Controller;
