use crate::pipeline::types::{AngleSlot, AngleVector};

/// Baseline "zero pose" capture for relative angle reporting.
///
/// The baseline is written only while uncalibrated, at most once per
/// calibration request, by the tick that first sees a fully-available angle
/// vector. Until then the baseline is the zero vector, so calibrated angles
/// equal raw angles.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationState {
    baseline: [f32; AngleSlot::COUNT],
    calibrated: bool,
}

impl CalibrationState {
    pub fn new() -> Self {
        Self {
            baseline: [0.0; AngleSlot::COUNT],
            calibrated: false,
        }
    }

    /// Arms the next fully-available vector as the new baseline. Idempotent.
    pub fn request_calibration(&mut self) {
        self.calibrated = false;
    }

    /// Captures the baseline from the first complete vector after a request.
    /// Later calls while calibrated leave the baseline untouched.
    pub fn observe(&mut self, raw: &AngleVector) {
        if self.calibrated {
            return;
        }
        if let Some(values) = raw.complete() {
            self.baseline = values;
            self.calibrated = true;
            tracing::info!("Calibration baseline captured");
        }
    }

    /// Elementwise `raw - baseline`; unavailable slots stay unavailable.
    pub fn calibrated_angles(&self, raw: &AngleVector) -> AngleVector {
        let mut out = AngleVector::new();
        for (slot, value) in raw.iter() {
            out.set(slot, value.map(|v| v - self.baseline[slot.index()]));
        }
        out
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self::new()
    }
}
