use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Address of the robot's actuator interface.
    pub actuator_endpoint: String,
    /// Tick period in milliseconds; the actuator update rate, independent
    /// of the sensor frame rate.
    pub tick_period_ms: u64,
    /// Dead band in radians below which an angle is not resent.
    pub change_threshold: f32,
    /// Bound on a single actuator call in milliseconds.
    pub call_timeout_ms: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            actuator_endpoint: "127.0.0.1".to_string(),
            // 7 updates per second
            tick_period_ms: 143,
            change_threshold: 0.1,
            call_timeout_ms: 250,
        }
    }
}

impl Configuration {
    /// Loads `naobot.toml` (optional) layered under `NAOBOT_*` environment
    /// overrides, with the defaults above as the base.
    pub fn load() -> Result<Self, AppError> {
        let defaults = Configuration::default();
        let settings = config::Config::builder()
            .set_default("actuator_endpoint", defaults.actuator_endpoint)?
            .set_default("tick_period_ms", defaults.tick_period_ms)?
            .set_default("change_threshold", defaults.change_threshold as f64)?
            .set_default("call_timeout_ms", defaults.call_timeout_ms)?
            .add_source(config::File::with_name("naobot").required(false))
            .add_source(config::Environment::with_prefix("NAOBOT"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_the_observed_rates() {
        let configuration = Configuration::default();
        assert_eq!(configuration.tick_period(), Duration::from_millis(143));
        assert!((configuration.change_threshold - 0.1).abs() < 1e-6);
        assert_eq!(configuration.call_timeout(), Duration::from_millis(250));
    }
}
