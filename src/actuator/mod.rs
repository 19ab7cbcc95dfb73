pub mod logging;

pub use logging::LoggingActuator;

use async_trait::async_trait;

/// Remote interface that physically moves the robot.
///
/// Implementations report failure by returning `false`; they never panic or
/// error across this boundary, so the dispatcher's catch-and-continue
/// contract holds.
#[async_trait]
pub trait ActuatorSink: Send + Sync {
    /// Establishes the transport session. `false` leaves the sink unusable
    /// until the next attempt.
    async fn connect(&self, endpoint: &str) -> bool;

    /// Commands one joint to an absolute angle in radians.
    async fn move_joint(&self, joint: &str, radians: f32) -> bool;

    /// Opens the named hand ("LHand" or "RHand").
    async fn open_hand(&self, hand: &str) -> bool;

    /// Closes the named hand ("LHand" or "RHand").
    async fn close_hand(&self, hand: &str) -> bool;
}
