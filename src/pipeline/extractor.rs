use crate::common::{BodyFrame, HandSide, HandState, JointId};
use crate::geometry::{angle_between, Plane};
use crate::pipeline::types::{AngleSlot, AngleVector, BodyReading};

/// Anatomical triple for one angle slot: the angle at `vertex` between the
/// segments toward `a` and `c`, measured in `plane`.
struct AngleTriple {
    slot: AngleSlot,
    a: JointId,
    vertex: JointId,
    c: JointId,
    plane: Plane,
}

/// Fixed table of joint triples. Roll angles live in the coronal (XY) plane,
/// pitch angles in the sagittal (YZ) plane.
const ANGLE_TABLE: [AngleTriple; AngleSlot::COUNT] = [
    AngleTriple {
        slot: AngleSlot::RShoulderRoll,
        a: JointId::HipRight,
        vertex: JointId::ShoulderRight,
        c: JointId::ElbowRight,
        plane: Plane::Coronal,
    },
    AngleTriple {
        slot: AngleSlot::LShoulderRoll,
        a: JointId::HipLeft,
        vertex: JointId::ShoulderLeft,
        c: JointId::ElbowLeft,
        plane: Plane::Coronal,
    },
    AngleTriple {
        slot: AngleSlot::RElbowRoll,
        a: JointId::ShoulderRight,
        vertex: JointId::ElbowRight,
        c: JointId::WristRight,
        plane: Plane::Coronal,
    },
    AngleTriple {
        slot: AngleSlot::LElbowRoll,
        a: JointId::ShoulderLeft,
        vertex: JointId::ElbowLeft,
        c: JointId::WristLeft,
        plane: Plane::Coronal,
    },
    AngleTriple {
        slot: AngleSlot::RShoulderPitch,
        a: JointId::HipRight,
        vertex: JointId::ShoulderRight,
        c: JointId::ElbowRight,
        plane: Plane::Sagittal,
    },
    AngleTriple {
        slot: AngleSlot::LShoulderPitch,
        a: JointId::HipLeft,
        vertex: JointId::ShoulderLeft,
        c: JointId::ElbowLeft,
        plane: Plane::Sagittal,
    },
];

/// Derives the six-slot angle vector and hand openness from one frame.
///
/// Pure function of the frame plus the static triple table; no state.
pub struct AngleExtractor;

impl AngleExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, frame: &BodyFrame) -> BodyReading {
        if !frame.is_tracked() {
            return BodyReading::untracked();
        }

        let mut angles = AngleVector::new();
        for triple in &ANGLE_TABLE {
            let angle = match (
                frame.joint(triple.a),
                frame.joint(triple.vertex),
                frame.joint(triple.c),
            ) {
                (Some(a), Some(vertex), Some(c)) => angle_between(&a, &vertex, &c, triple.plane),
                _ => None,
            };
            angles.set(triple.slot, angle);
        }

        BodyReading {
            angles,
            left_hand: classify_hand(frame.hand(HandSide::Left)),
            right_hand: classify_hand(frame.hand(HandSide::Right)),
            tracked: true,
        }
    }
}

impl Default for AngleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Ambiguous gestures (lasso and friends) count as a closed hand, matching
/// the closed-fist fallback the tracker's own classifier leans toward.
fn classify_hand(state: HandState) -> HandState {
    match state {
        HandState::Open => HandState::Open,
        HandState::Closed | HandState::Indeterminate => HandState::Closed,
    }
}
