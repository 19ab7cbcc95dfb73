use crate::common::{HandSide, HandState};
use crate::pipeline::types::{AngleSlot, AngleVector};

/// Default dead band below which an angle change is not worth resending.
pub const DEFAULT_CHANGE_THRESHOLD: f32 = 0.1;

/// Hysteresis layer between the calibrated angles and the dispatcher.
///
/// Tracks the last *attempted* value per slot and hand, updated on attempt
/// rather than on actuator success, so an unreachable actuator is not
/// hammered with the same target every tick. An angle dispatches when it
/// moved more than the threshold since the last attempt; a hand dispatches
/// when its state changed.
#[derive(Debug, Clone)]
pub struct ChangeGate {
    threshold: f32,
    last_angles: AngleVector,
    last_left_hand: HandState,
    last_right_hand: HandState,
}

impl ChangeGate {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last_angles: AngleVector::new(),
            last_left_hand: HandState::Indeterminate,
            last_right_hand: HandState::Indeterminate,
        }
    }

    pub fn should_dispatch_angle(&self, slot: AngleSlot, value: f32) -> bool {
        match self.last_angles.get(slot) {
            None => true,
            Some(last) => (value - last).abs() > self.threshold,
        }
    }

    /// Records an attempted angle, successful or not.
    pub fn record_angle_attempt(&mut self, slot: AngleSlot, value: f32) {
        self.last_angles.set(slot, Some(value));
    }

    pub fn should_dispatch_hand(&self, side: HandSide, state: HandState) -> bool {
        if state == HandState::Indeterminate {
            return false;
        }
        self.last_hand(side) != state
    }

    /// Records an attempted hand command, successful or not.
    pub fn record_hand_attempt(&mut self, side: HandSide, state: HandState) {
        match side {
            HandSide::Left => self.last_left_hand = state,
            HandSide::Right => self.last_right_hand = state,
        }
    }

    fn last_hand(&self, side: HandSide) -> HandState {
        match side {
            HandSide::Left => self.last_left_hand,
            HandSide::Right => self.last_right_hand,
        }
    }
}

impl Default for ChangeGate {
    fn default() -> Self {
        Self::new(DEFAULT_CHANGE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_always_dispatches() {
        let gate = ChangeGate::new(0.1);
        assert!(gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 0.0));
    }

    #[test]
    fn dispatches_only_past_the_dead_band() {
        let mut gate = ChangeGate::new(0.1);
        gate.record_angle_attempt(AngleSlot::RShoulderRoll, 0.20);

        // Moved 0.15: dispatch.
        assert!(gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 0.35));
        // Moved 0.04: hold.
        assert!(!gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 0.24));
        // Still inside the dead band: hold.
        assert!(!gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 0.28));
        // Symmetric on the way down.
        assert!(gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 0.05));
    }

    #[test]
    fn slots_are_gated_independently() {
        let mut gate = ChangeGate::new(0.1);
        gate.record_angle_attempt(AngleSlot::RShoulderRoll, 1.0);
        assert!(!gate.should_dispatch_angle(AngleSlot::RShoulderRoll, 1.0));
        assert!(gate.should_dispatch_angle(AngleSlot::LShoulderRoll, 1.0));
    }

    #[test]
    fn hand_debounces_repeated_states() {
        let mut gate = ChangeGate::default();
        assert!(gate.should_dispatch_hand(HandSide::Right, HandState::Open));
        gate.record_hand_attempt(HandSide::Right, HandState::Open);
        assert!(!gate.should_dispatch_hand(HandSide::Right, HandState::Open));
        assert!(gate.should_dispatch_hand(HandSide::Right, HandState::Closed));
        // The other hand has its own state.
        assert!(gate.should_dispatch_hand(HandSide::Left, HandState::Open));
    }

    #[test]
    fn indeterminate_hand_never_dispatches() {
        let gate = ChangeGate::default();
        assert!(!gate.should_dispatch_hand(HandSide::Left, HandState::Indeterminate));
    }
}
