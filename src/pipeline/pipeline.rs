use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::actuator::ActuatorSink;
use crate::common::{BodyFrame, HandSide};
use crate::pipeline::control::SharedControl;
use crate::pipeline::dispatcher::CommandDispatcher;
use crate::pipeline::extractor::AngleExtractor;
use crate::pipeline::gate::ChangeGate;
use crate::pipeline::snapshot::PoseSnapshot;
use crate::pipeline::types::{AngleSlot, AngleVector, BodyReading};

/// One full retargeting pass per tick: extract, calibrate, gate, dispatch.
///
/// Ticks never block on the sensor: they run against whatever frame is
/// newest, and the gate suppresses redundant dispatch when the same frame
/// is seen twice.
pub struct RetargetingPipeline {
    extractor: AngleExtractor,
    gate: ChangeGate,
    dispatcher: CommandDispatcher,
    control: SharedControl,
    snapshot_tx: watch::Sender<PoseSnapshot>,
}

impl RetargetingPipeline {
    pub fn new(
        sink: Arc<dyn ActuatorSink>,
        control: SharedControl,
        change_threshold: f32,
        call_timeout: Duration,
        snapshot_tx: watch::Sender<PoseSnapshot>,
    ) -> Self {
        Self {
            extractor: AngleExtractor::new(),
            gate: ChangeGate::new(change_threshold),
            dispatcher: CommandDispatcher::new(sink, call_timeout),
            control,
            snapshot_tx,
        }
    }

    /// Runs one tick against the latest frame, if any.
    pub async fn run_tick(&mut self, frame: Option<&BodyFrame>) {
        let Some(frame) = frame else {
            self.publish(PoseSnapshot::waiting());
            return;
        };

        let reading = self.extractor.extract(frame);
        if !reading.tracked {
            tracing::debug!("No subject tracked this tick");
            self.publish(PoseSnapshot::no_subject());
            return;
        }

        // Single control read per tick: observe calibration, derive the
        // calibrated angles, and copy the flags while holding the lock.
        let (calibrated, enabled, mirrored, baseline_set) = {
            let mut control = self
                .control
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            control.calibration.observe(&reading.angles);
            (
                control.calibration.calibrated_angles(&reading.angles),
                control.updates_enabled,
                control.mirrored,
                control.calibration.is_calibrated(),
            )
        };

        let status = if enabled {
            self.dispatch(&reading, &calibrated, mirrored).await
        } else {
            "updates disabled".to_string()
        };

        self.publish(PoseSnapshot {
            raw: reading.angles,
            calibrated,
            left_hand: reading.left_hand,
            right_hand: reading.right_hand,
            tracked: true,
            calibrated_baseline: baseline_set,
            status,
        });
    }

    async fn dispatch(
        &mut self,
        reading: &BodyReading,
        calibrated: &AngleVector,
        mirrored: bool,
    ) -> String {
        self.dispatcher.begin_tick();

        for slot in AngleSlot::ALL {
            // Unavailable slots are skipped outright, never sent as zero.
            let Some(value) = calibrated.get(slot) else {
                continue;
            };
            if self.gate.should_dispatch_angle(slot, value) {
                self.gate.record_angle_attempt(slot, value);
                self.dispatcher.send_joint(slot, value, mirrored).await;
            }
        }

        for (side, state) in [
            (HandSide::Right, reading.right_hand),
            (HandSide::Left, reading.left_hand),
        ] {
            if self.gate.should_dispatch_hand(side, state) {
                self.gate.record_hand_attempt(side, state);
                self.dispatcher.send_hand(side, state, mirrored).await;
            }
        }

        self.dispatcher
            .tick_status()
            .unwrap_or("ok")
            .to_string()
    }

    fn publish(&self, snapshot: PoseSnapshot) {
        // UI may not be listening; last-write-wins either way.
        let _ = self.snapshot_tx.send(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::fake::RecordingActuator;
    use crate::common::{HandState, JointId, Point3};
    use crate::pipeline::control::shared_control;
    use crate::pipeline::dispatcher::DEFAULT_CALL_TIMEOUT;
    use chrono::Utc;
    use std::collections::HashMap;

    fn skeleton(elbow_right_y: f32) -> BodyFrame {
        let mut joints = HashMap::new();
        joints.insert(JointId::HipRight, Point3::new(0.15, -0.5, 2.0));
        joints.insert(JointId::HipLeft, Point3::new(-0.15, -0.5, 2.0));
        joints.insert(JointId::ShoulderRight, Point3::new(0.2, 0.5, 2.0));
        joints.insert(JointId::ShoulderLeft, Point3::new(-0.2, 0.5, 2.0));
        joints.insert(JointId::ElbowRight, Point3::new(0.45, elbow_right_y, 1.8));
        joints.insert(JointId::ElbowLeft, Point3::new(-0.2, 0.2, 2.0));
        joints.insert(JointId::WristRight, Point3::new(0.5, elbow_right_y - 0.3, 1.7));
        joints.insert(JointId::WristLeft, Point3::new(-0.2, -0.1, 2.0));
        BodyFrame::new(joints, HandState::Closed, HandState::Open, Utc::now())
    }

    struct Harness {
        pipeline: RetargetingPipeline,
        sink: Arc<RecordingActuator>,
        control: SharedControl,
        snapshot_rx: watch::Receiver<PoseSnapshot>,
    }

    fn harness() -> Harness {
        let sink = Arc::new(RecordingActuator::new());
        let control = shared_control();
        let (snapshot_tx, snapshot_rx) = watch::channel(PoseSnapshot::default());
        let pipeline = RetargetingPipeline::new(
            sink.clone(),
            control.clone(),
            0.1,
            DEFAULT_CALL_TIMEOUT,
            snapshot_tx,
        );
        Harness {
            pipeline,
            sink,
            control,
            snapshot_rx,
        }
    }

    fn enable(harness: &Harness) {
        harness.control.lock().unwrap().updates_enabled = true;
    }

    #[tokio::test]
    async fn no_frame_publishes_waiting_status() {
        let mut h = harness();
        h.pipeline.run_tick(None).await;
        assert_eq!(h.snapshot_rx.borrow().status, "waiting for sensor");
        assert!(h.sink.calls().is_empty());
    }

    #[tokio::test]
    async fn untracked_subject_issues_no_actuator_calls() {
        let mut h = harness();
        enable(&h);
        h.pipeline
            .run_tick(Some(&BodyFrame::untracked(Utc::now())))
            .await;
        let snapshot = h.snapshot_rx.borrow().clone();
        assert_eq!(snapshot.status, "no subject tracked");
        assert!(!snapshot.tracked);
        assert!(h.sink.calls().is_empty());
    }

    #[tokio::test]
    async fn disabled_updates_still_extract_but_never_dispatch() {
        let mut h = harness();
        h.pipeline.run_tick(Some(&skeleton(0.5))).await;
        let snapshot = h.snapshot_rx.borrow().clone();
        assert!(snapshot.tracked);
        assert_eq!(snapshot.status, "updates disabled");
        assert!(snapshot.raw.complete().is_some());
        assert!(h.sink.calls().is_empty());
    }

    #[tokio::test]
    async fn identical_ticks_dispatch_once() {
        let mut h = harness();
        enable(&h);
        let frame = skeleton(0.5);
        h.pipeline.run_tick(Some(&frame)).await;
        let first_tick_calls = h.sink.calls().len();
        assert!(first_tick_calls > 0);

        // Tick faster than the sensor: same frame again, gate holds.
        h.pipeline.run_tick(Some(&frame)).await;
        assert_eq!(h.sink.calls().len(), first_tick_calls);
        assert_eq!(h.snapshot_rx.borrow().status, "ok");
    }

    #[tokio::test]
    async fn two_open_ticks_send_one_open_hand() {
        let mut h = harness();
        enable(&h);
        let frame = skeleton(0.5);
        h.pipeline.run_tick(Some(&frame)).await;
        h.pipeline.run_tick(Some(&frame)).await;
        let opens: Vec<_> = h
            .sink
            .calls()
            .into_iter()
            .filter(|c| c == "open RHand")
            .collect();
        assert_eq!(opens.len(), 1);
    }

    #[tokio::test]
    async fn failed_joint_reports_status_and_is_not_resent_until_changed() {
        let mut h = harness();
        enable(&h);
        h.sink.fail_joint("RShoulderRoll");
        h.pipeline.run_tick(Some(&skeleton(0.5))).await;
        assert_eq!(
            h.snapshot_rx.borrow().status,
            "moveJoint RShoulderRoll failed"
        );
        let moves_after_first = count_moves(&h.sink, "RShoulderRoll");
        assert_eq!(moves_after_first, 1);

        // Unchanged angle: the attempt was recorded, so no resend.
        h.pipeline.run_tick(Some(&skeleton(0.5))).await;
        assert_eq!(count_moves(&h.sink, "RShoulderRoll"), 1);
        assert_eq!(h.snapshot_rx.borrow().status, "ok");

        // Changed angle: the gate opens again.
        h.sink.clear_failures();
        h.pipeline.run_tick(Some(&skeleton(0.1))).await;
        assert_eq!(count_moves(&h.sink, "RShoulderRoll"), 2);
    }

    #[tokio::test]
    async fn calibrating_mid_session_zeroes_the_current_pose() {
        let mut h = harness();
        enable(&h);
        let frame = skeleton(0.5);
        h.pipeline.run_tick(Some(&frame)).await;
        assert!(h.snapshot_rx.borrow().calibrated_baseline);
        let calibrated = h.snapshot_rx.borrow().calibrated;
        for (_, value) in calibrated.iter() {
            assert!(value.unwrap().abs() < 1e-6);
        }
        let raw = h.snapshot_rx.borrow().raw;
        assert!(raw.complete().is_some());
    }

    #[tokio::test]
    async fn mirror_toggle_redirects_the_next_tick() {
        let mut h = harness();
        enable(&h);
        h.pipeline.run_tick(Some(&skeleton(0.5))).await;
        let before = h.sink.calls().len();

        h.control.lock().unwrap().mirrored = true;
        // Only the right arm moved, enough to reopen its gates; with
        // mirroring on those commands land on the left-side joints, with
        // unchanged angle math.
        h.pipeline.run_tick(Some(&skeleton(0.1))).await;
        let mut calls = h.sink.calls();
        let after_toggle = calls.split_off(before);
        assert!(after_toggle
            .iter()
            .any(|c| c.starts_with("move LShoulderRoll ")));
        assert!(!after_toggle
            .iter()
            .any(|c| c.starts_with("move RShoulderRoll ")));
    }

    fn count_moves(sink: &RecordingActuator, joint: &str) -> usize {
        sink.calls()
            .iter()
            .filter(|c| c.starts_with(&format!("move {joint} ")))
            .count()
    }
}
