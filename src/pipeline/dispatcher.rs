use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::actuator::ActuatorSink;
use crate::common::{HandSide, HandState};
use crate::pipeline::binding::binding_for;
use crate::pipeline::types::AngleSlot;

/// Default bound on a single actuator call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(250);

/// Translates gated angles and hand states into bounded actuator calls.
///
/// Best effort, keep going: a failed or timed-out call is recorded in a
/// per-tick status string and the remaining calls still run. The dispatcher
/// never retries; the change gate decides when a target is sent again.
pub struct CommandDispatcher {
    sink: Arc<dyn ActuatorSink>,
    call_timeout: Duration,
    tick_status: Option<String>,
}

impl CommandDispatcher {
    pub fn new(sink: Arc<dyn ActuatorSink>, call_timeout: Duration) -> Self {
        Self {
            sink,
            call_timeout,
            tick_status: None,
        }
    }

    /// Clears the previous tick's failure report.
    pub fn begin_tick(&mut self) {
        self.tick_status = None;
    }

    /// Last failure recorded this tick, if any. Overwritten per failure, so
    /// the latest one wins, matching a status line that is redrawn anyway.
    pub fn tick_status(&self) -> Option<&str> {
        self.tick_status.as_deref()
    }

    /// Sends one calibrated angle to its bound joint, resolved through the
    /// mirror flag, sign-corrected and clamped by the binding.
    pub async fn send_joint(&mut self, slot: AngleSlot, radians: f32, mirrored: bool) {
        let target = binding_for(slot).target(mirrored);
        let command = target.command_angle(radians);
        let sink = Arc::clone(&self.sink);
        let result = timeout(self.call_timeout, sink.move_joint(target.name, command)).await;
        match result {
            Ok(true) => {
                tracing::debug!(joint = target.name, command, "Joint command sent");
            }
            Ok(false) => {
                self.report(format!("moveJoint {} failed", target.name));
            }
            Err(_) => {
                self.report(format!(
                    "moveJoint {} timed out after {} ms",
                    target.name,
                    self.call_timeout.as_millis()
                ));
            }
        }
    }

    /// Opens or closes one hand, resolved through the mirror flag.
    /// Indeterminate never reaches this point; the gate filters it.
    pub async fn send_hand(&mut self, side: HandSide, state: HandState, mirrored: bool) {
        let target = if mirrored { side.opposite() } else { side };
        let name = target.actuator_name();
        let sink = Arc::clone(&self.sink);
        let call = match state {
            HandState::Open => sink.open_hand(name),
            HandState::Closed => sink.close_hand(name),
            HandState::Indeterminate => return,
        };
        let verb = if state == HandState::Open { "openHand" } else { "closeHand" };
        let result = timeout(self.call_timeout, call).await;
        match result {
            Ok(true) => {
                tracing::debug!(hand = name, verb, "Hand command sent");
            }
            Ok(false) => {
                self.report(format!("{verb} {name} failed"));
            }
            Err(_) => {
                self.report(format!(
                    "{verb} {name} timed out after {} ms",
                    self.call_timeout.as_millis()
                ));
            }
        }
    }

    fn report(&mut self, status: String) {
        tracing::warn!("{status}");
        self.tick_status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::fake::{HangingActuator, RecordingActuator};

    fn dispatcher(sink: Arc<RecordingActuator>) -> CommandDispatcher {
        CommandDispatcher::new(sink, DEFAULT_CALL_TIMEOUT)
    }

    #[tokio::test]
    async fn joint_command_is_sign_corrected_and_clamped() {
        let sink = Arc::new(RecordingActuator::new());
        let mut dispatcher = dispatcher(sink.clone());
        dispatcher.begin_tick();
        // RShoulderRoll inverts sign; 0.5 becomes -0.5, inside range.
        dispatcher
            .send_joint(AngleSlot::RShoulderRoll, 0.5, false)
            .await;
        assert_eq!(sink.calls(), vec!["move RShoulderRoll -0.5000"]);
        assert_eq!(dispatcher.tick_status(), None);
    }

    #[tokio::test]
    async fn mirrored_joint_goes_to_the_opposite_side() {
        let sink = Arc::new(RecordingActuator::new());
        let mut dispatcher = dispatcher(sink.clone());
        dispatcher.begin_tick();
        dispatcher
            .send_joint(AngleSlot::RShoulderPitch, 0.2, true)
            .await;
        assert_eq!(sink.calls(), vec!["move LShoulderPitch 0.2000"]);
    }

    #[tokio::test]
    async fn failure_sets_status_but_later_calls_still_run() {
        let sink = Arc::new(RecordingActuator::new());
        sink.fail_joint("RElbowRoll");
        let mut dispatcher = dispatcher(sink.clone());
        dispatcher.begin_tick();
        dispatcher.send_joint(AngleSlot::RElbowRoll, 0.5, false).await;
        dispatcher
            .send_joint(AngleSlot::LShoulderPitch, 0.1, false)
            .await;
        assert_eq!(dispatcher.tick_status(), Some("moveJoint RElbowRoll failed"));
        assert_eq!(sink.calls().len(), 2);

        // Next tick starts clean.
        dispatcher.begin_tick();
        assert_eq!(dispatcher.tick_status(), None);
    }

    #[tokio::test]
    async fn hand_commands_resolve_through_the_mirror_flag() {
        let sink = Arc::new(RecordingActuator::new());
        let mut dispatcher = dispatcher(sink.clone());
        dispatcher.begin_tick();
        dispatcher
            .send_hand(HandSide::Right, HandState::Open, false)
            .await;
        dispatcher
            .send_hand(HandSide::Right, HandState::Closed, true)
            .await;
        assert_eq!(sink.calls(), vec!["open RHand", "close LHand"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_actuator_call_is_bounded() {
        let mut dispatcher =
            CommandDispatcher::new(Arc::new(HangingActuator), Duration::from_millis(50));
        dispatcher.begin_tick();
        dispatcher.send_joint(AngleSlot::LShoulderRoll, 0.3, false).await;
        assert_eq!(
            dispatcher.tick_status(),
            Some("moveJoint LShoulderRoll timed out after 50 ms")
        );
    }
}
