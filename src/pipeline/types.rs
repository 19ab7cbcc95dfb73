use crate::common::HandState;

/// The six retargeted angle slots, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleSlot {
    RShoulderRoll,
    LShoulderRoll,
    RElbowRoll,
    LElbowRoll,
    RShoulderPitch,
    LShoulderPitch,
}

impl AngleSlot {
    pub const COUNT: usize = 6;

    /// All slots, in the fixed dispatch order.
    pub const ALL: [AngleSlot; Self::COUNT] = [
        AngleSlot::RShoulderRoll,
        AngleSlot::LShoulderRoll,
        AngleSlot::RElbowRoll,
        AngleSlot::LElbowRoll,
        AngleSlot::RShoulderPitch,
        AngleSlot::LShoulderPitch,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Ordered vector of the six joint angles in radians.
///
/// A `None` slot means "angle unavailable this tick" (degenerate geometry or
/// a joint the tracker did not deliver). Produced fresh each tick, never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleVector {
    slots: [Option<f32>; AngleSlot::COUNT],
}

impl AngleVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: AngleSlot) -> Option<f32> {
        self.slots[slot.index()]
    }

    pub fn set(&mut self, slot: AngleSlot, value: Option<f32>) {
        self.slots[slot.index()] = value;
    }

    /// All six slots if every one is available.
    pub fn complete(&self) -> Option<[f32; AngleSlot::COUNT]> {
        let mut out = [0.0; AngleSlot::COUNT];
        for slot in AngleSlot::ALL {
            out[slot.index()] = self.get(slot)?;
        }
        Some(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AngleSlot, Option<f32>)> + '_ {
        AngleSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

impl From<[f32; AngleSlot::COUNT]> for AngleVector {
    fn from(values: [f32; AngleSlot::COUNT]) -> Self {
        Self {
            slots: values.map(Some),
        }
    }
}

/// Everything the extractor derives from one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyReading {
    pub angles: AngleVector,
    pub left_hand: HandState,
    pub right_hand: HandState,
    pub tracked: bool,
}

impl BodyReading {
    /// Reading for a frame with no tracked subject.
    pub fn untracked() -> Self {
        Self {
            angles: AngleVector::new(),
            left_hand: HandState::Indeterminate,
            right_hand: HandState::Indeterminate,
            tracked: false,
        }
    }
}
