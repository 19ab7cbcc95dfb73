use std::str::FromStr;

use crate::error::AppError;
use crate::pipeline::control::Controller;

/// Minimum recognizer confidence before an intent is acted on.
pub const CONFIDENCE_FLOOR: f32 = 0.6;

/// Classified spoken command delivered by the speech collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceIntent {
    On,
    Off,
    Calibrate,
}

impl FromStr for VoiceIntent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(VoiceIntent::On),
            "off" => Ok(VoiceIntent::Off),
            "calibrate" => Ok(VoiceIntent::Calibrate),
            other => Err(AppError::UnknownIntent(other.to_string())),
        }
    }
}

/// An intent plus the recognizer's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizedIntent {
    pub intent: VoiceIntent,
    pub confidence: f32,
}

/// Applies recognized intents to the control surface.
///
/// Runs in the speech collaborator's context, not the tick's; everything it
/// touches goes through `Controller` setters.
pub struct VoiceCommandHandler {
    controller: Controller,
    endpoint: String,
}

impl VoiceCommandHandler {
    pub fn new(controller: Controller, endpoint: String) -> Self {
        Self {
            controller,
            endpoint,
        }
    }

    /// Acts on one recognized intent. Low-confidence results are rejected
    /// with no state change.
    pub async fn handle(&self, recognized: RecognizedIntent) -> Result<(), AppError> {
        if recognized.confidence <= CONFIDENCE_FLOOR {
            tracing::info!(
                intent = ?recognized.intent,
                confidence = recognized.confidence,
                "Voice intent rejected"
            );
            return Ok(());
        }

        tracing::info!(
            intent = ?recognized.intent,
            confidence = recognized.confidence,
            "Voice intent accepted"
        );
        match recognized.intent {
            VoiceIntent::On => self.controller.start(&self.endpoint).await,
            VoiceIntent::Off => {
                self.controller.stop();
                Ok(())
            }
            VoiceIntent::Calibrate => {
                self.controller.request_calibration();
                Ok(())
            }
        }
    }
}
