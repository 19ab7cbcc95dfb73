use std::sync::Arc;

use naobot_rust::actuator::LoggingActuator;
use naobot_rust::config::Configuration;
use naobot_rust::coordinator::CoordinatorBuilder;
use naobot_rust::error::AppError;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let configuration = Configuration::load()?;

    // No robot transport is linked in this build; commands land in the log.
    let (coordinator, _feed) = CoordinatorBuilder::new(configuration.clone())
        .sink(Arc::new(LoggingActuator::new()))
        .build()?;
    coordinator
        .controller()
        .start(&configuration.actuator_endpoint)
        .await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::Pipeline(e.to_string()))?;
    coordinator.stop();
    Ok(())
}
