use std::sync::{Arc, Mutex};

use crate::actuator::ActuatorSink;
use crate::error::AppError;
use crate::pipeline::calibration::CalibrationState;

/// Operator-owned flags plus the calibration state they act on.
///
/// Written through `Controller` setters from UI/voice contexts, read (and
/// calibration-observed) exactly once near the top of each tick, so baseline
/// writes never race with reads.
#[derive(Debug)]
pub struct ControlState {
    pub updates_enabled: bool,
    pub mirrored: bool,
    pub calibration: CalibrationState,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            updates_enabled: false,
            mirrored: false,
            calibration: CalibrationState::new(),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedControl = Arc<Mutex<ControlState>>;

pub fn shared_control() -> SharedControl {
    Arc::new(Mutex::new(ControlState::new()))
}

/// Control surface handed to the UI and voice collaborators.
#[derive(Clone)]
pub struct Controller {
    control: SharedControl,
    sink: Arc<dyn ActuatorSink>,
}

impl Controller {
    pub fn new(control: SharedControl, sink: Arc<dyn ActuatorSink>) -> Self {
        Self { control, sink }
    }

    /// Connects the actuator transport and enables dispatch.
    pub async fn start(&self, endpoint: &str) -> Result<(), AppError> {
        if !self.sink.connect(endpoint).await {
            return Err(AppError::ActuatorConnect(endpoint.to_string()));
        }
        self.lock().updates_enabled = true;
        tracing::info!(endpoint, "Actuator updates enabled");
        Ok(())
    }

    /// Disables dispatch. Extraction and display keep running.
    pub fn stop(&self) {
        self.lock().updates_enabled = false;
        tracing::info!("Actuator updates disabled");
    }

    pub fn set_mirrored(&self, mirrored: bool) {
        self.lock().mirrored = mirrored;
    }

    /// Arms a calibration reset; the next fully-tracked frame becomes the
    /// new zero pose.
    pub fn request_calibration(&self) {
        self.lock().calibration.request_calibration();
        tracing::info!("Calibration requested");
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().updates_enabled
    }

    pub fn is_mirrored(&self) -> bool {
        self.lock().mirrored
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ControlState> {
        // A poisoned control mutex means a panicked setter; the flags are
        // plain data, so continue with whatever was last written.
        self.control
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
