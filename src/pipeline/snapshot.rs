use crate::common::HandState;
use crate::pipeline::types::AngleVector;

/// Read-only view of the latest tick, published for the presentation layer.
/// Overwritten wholesale each tick.
#[derive(Debug, Clone, Default)]
pub struct PoseSnapshot {
    pub raw: AngleVector,
    pub calibrated: AngleVector,
    pub left_hand: HandState,
    pub right_hand: HandState,
    pub tracked: bool,
    pub calibrated_baseline: bool,
    /// Human-readable dispatch outcome for this tick.
    pub status: String,
}

impl PoseSnapshot {
    /// Snapshot for a tick with no frame from the sensor yet.
    pub fn waiting() -> Self {
        Self {
            status: "waiting for sensor".to_string(),
            ..Self::default()
        }
    }

    /// Snapshot for a tick whose frame had no tracked subject.
    pub fn no_subject() -> Self {
        Self {
            status: "no subject tracked".to_string(),
            ..Self::default()
        }
    }
}
