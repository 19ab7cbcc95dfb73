use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// A single tracked joint position in sensor camera space, meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise difference `self - other`.
    pub fn delta(&self, other: &Point3) -> [f32; 3] {
        [self.x - other.x, self.y - other.y, self.z - other.z]
    }
}

/// Closed set of skeleton joints delivered by the body tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointId {
    Head,
    Neck,
    ShoulderLeft,
    ShoulderRight,
    ElbowLeft,
    ElbowRight,
    WristLeft,
    WristRight,
    HandLeft,
    HandRight,
    HipLeft,
    HipRight,
    SpineBase,
    SpineShoulder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Joint name the actuator uses for this hand.
    pub fn actuator_name(&self) -> &'static str {
        match self {
            HandSide::Left => "LHand",
            HandSide::Right => "RHand",
        }
    }

    pub fn opposite(&self) -> HandSide {
        match self {
            HandSide::Left => HandSide::Right,
            HandSide::Right => HandSide::Left,
        }
    }
}

/// Tracker classification of a hand. `Indeterminate` covers the ambiguous
/// gestures (lasso, momentarily untracked) some sensors report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandState {
    Open,
    Closed,
    #[default]
    Indeterminate,
}

/// One sampled instant of tracked joint positions plus hand classification.
///
/// Produced by the frame source, read-only for one pipeline pass, then
/// discarded. A joint missing from `joints` was not tracked this frame.
#[derive(Debug, Clone)]
pub struct BodyFrame {
    joints: HashMap<JointId, Point3>,
    left_hand: HandState,
    right_hand: HandState,
    tracked: bool,
    frame_id: Uuid,
    captured_at: DateTime<Utc>,
}

impl BodyFrame {
    pub fn new(
        joints: HashMap<JointId, Point3>,
        left_hand: HandState,
        right_hand: HandState,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            joints,
            left_hand,
            right_hand,
            tracked: true,
            frame_id: Uuid::new_v4(),
            captured_at,
        }
    }

    /// A frame with no tracked subject.
    pub fn untracked(captured_at: DateTime<Utc>) -> Self {
        Self {
            joints: HashMap::new(),
            left_hand: HandState::Indeterminate,
            right_hand: HandState::Indeterminate,
            tracked: false,
            frame_id: Uuid::new_v4(),
            captured_at,
        }
    }

    pub fn joint(&self, id: JointId) -> Option<Point3> {
        self.joints.get(&id).copied()
    }

    pub fn hand(&self, side: HandSide) -> HandState {
        match side {
            HandSide::Left => self.left_hand,
            HandSide::Right => self.right_hand,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    pub fn frame_id(&self) -> Uuid {
        self.frame_id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
