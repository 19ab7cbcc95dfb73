use async_trait::async_trait;

use super::ActuatorSink;

/// Sink that logs every command instead of driving hardware.
///
/// Used when no robot transport is linked in: the full pipeline runs and its
/// command stream lands in the log.
#[derive(Debug, Default)]
pub struct LoggingActuator;

impl LoggingActuator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActuatorSink for LoggingActuator {
    async fn connect(&self, endpoint: &str) -> bool {
        tracing::info!(endpoint, "Actuator connect (logging sink)");
        true
    }

    async fn move_joint(&self, joint: &str, radians: f32) -> bool {
        tracing::info!(joint, radians, "moveJoint");
        true
    }

    async fn open_hand(&self, hand: &str) -> bool {
        tracing::info!(hand, "openHand");
        true
    }

    async fn close_hand(&self, hand: &str) -> bool {
        tracing::info!(hand, "closeHand");
        true
    }
}
