use crate::pipeline::types::AngleSlot;

/// One actuator joint: its wire name, safe command range in radians, and
/// whether our extracted angle runs opposite to the actuator's convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTarget {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub invert_sign: bool,
}

impl JointTarget {
    /// Sign-corrects and clamps a calibrated angle into the safe range.
    pub fn command_angle(&self, radians: f32) -> f32 {
        let corrected = if self.invert_sign { -radians } else { radians };
        corrected.clamp(self.min, self.max)
    }
}

/// Maps one angle slot to its actuator joint, with the left/right partner
/// used when mirroring is on. Mirroring swaps names only; sign correction
/// belongs to the target joint, never to the mirror flag.
#[derive(Debug, Clone, Copy)]
pub struct JointBinding {
    pub slot: AngleSlot,
    primary: JointTarget,
    mirrored: JointTarget,
}

impl JointBinding {
    pub fn target(&self, mirrored: bool) -> &JointTarget {
        if mirrored {
            &self.mirrored
        } else {
            &self.primary
        }
    }
}

const R_SHOULDER_ROLL: JointTarget = JointTarget {
    name: "RShoulderRoll",
    min: -1.3265,
    max: 0.3142,
    invert_sign: true,
};

const L_SHOULDER_ROLL: JointTarget = JointTarget {
    name: "LShoulderRoll",
    min: -0.3142,
    max: 1.3265,
    invert_sign: false,
};

const R_ELBOW_ROLL: JointTarget = JointTarget {
    name: "RElbowRoll",
    min: 0.0349,
    max: 1.5446,
    invert_sign: false,
};

const L_ELBOW_ROLL: JointTarget = JointTarget {
    name: "LElbowRoll",
    min: -1.5446,
    max: -0.0349,
    invert_sign: true,
};

const R_SHOULDER_PITCH: JointTarget = JointTarget {
    name: "RShoulderPitch",
    min: -2.0857,
    max: 2.0857,
    invert_sign: false,
};

const L_SHOULDER_PITCH: JointTarget = JointTarget {
    name: "LShoulderPitch",
    min: -2.0857,
    max: 2.0857,
    invert_sign: false,
};

/// Static binding table, one entry per slot in dispatch order.
pub const BINDINGS: [JointBinding; AngleSlot::COUNT] = [
    JointBinding {
        slot: AngleSlot::RShoulderRoll,
        primary: R_SHOULDER_ROLL,
        mirrored: L_SHOULDER_ROLL,
    },
    JointBinding {
        slot: AngleSlot::LShoulderRoll,
        primary: L_SHOULDER_ROLL,
        mirrored: R_SHOULDER_ROLL,
    },
    JointBinding {
        slot: AngleSlot::RElbowRoll,
        primary: R_ELBOW_ROLL,
        mirrored: L_ELBOW_ROLL,
    },
    JointBinding {
        slot: AngleSlot::LElbowRoll,
        primary: L_ELBOW_ROLL,
        mirrored: R_ELBOW_ROLL,
    },
    JointBinding {
        slot: AngleSlot::RShoulderPitch,
        primary: R_SHOULDER_PITCH,
        mirrored: L_SHOULDER_PITCH,
    },
    JointBinding {
        slot: AngleSlot::LShoulderPitch,
        primary: L_SHOULDER_PITCH,
        mirrored: R_SHOULDER_PITCH,
    },
];

pub fn binding_for(slot: AngleSlot) -> &'static JointBinding {
    &BINDINGS[slot.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_has_a_binding_in_order() {
        for slot in AngleSlot::ALL {
            assert_eq!(binding_for(slot).slot, slot);
        }
    }

    #[test]
    fn mirroring_swaps_left_and_right_names() {
        let binding = binding_for(AngleSlot::RShoulderRoll);
        assert_eq!(binding.target(false).name, "RShoulderRoll");
        assert_eq!(binding.target(true).name, "LShoulderRoll");

        let elbow = binding_for(AngleSlot::LElbowRoll);
        assert_eq!(elbow.target(false).name, "LElbowRoll");
        assert_eq!(elbow.target(true).name, "RElbowRoll");
    }

    #[test]
    fn command_angle_inverts_then_clamps() {
        // RShoulderRoll runs opposite to the extracted convention.
        let target = binding_for(AngleSlot::RShoulderRoll).target(false);
        assert!((target.command_angle(0.5) - (-0.5)).abs() < 1e-6);
        // Past the joint limit: silently clamped, not rejected.
        assert!((target.command_angle(-2.0) - 0.3142).abs() < 1e-6);
    }

    #[test]
    fn clamp_uses_the_resolved_joint_range() {
        // Mirrored RShoulderRoll commands the left joint, so the left
        // joint's range applies.
        let target = binding_for(AngleSlot::RShoulderRoll).target(true);
        assert_eq!(target.name, "LShoulderRoll");
        assert!((target.command_angle(2.0) - 1.3265).abs() < 1e-6);
    }
}
