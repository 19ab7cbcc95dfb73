use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::actuator::ActuatorSink;
use crate::config::Configuration;
use crate::error::AppError;
use crate::intake::{FrameFeed, FrameHandle};
use crate::pipeline::control::{shared_control, Controller};
use crate::pipeline::{PoseSnapshot, RetargetingPipeline};

/// Owns the tick task and the shutdown token.
///
/// The tick fires at the configured cadence regardless of the sensor rate
/// and runs one full pipeline pass against the newest frame.
pub struct Coordinator {
    tick_task: tokio::task::JoinHandle<()>,
    cancel_token: CancellationToken,
    controller: Controller,
    snapshot_rx: watch::Receiver<PoseSnapshot>,
}

impl Coordinator {
    fn new(
        configuration: Configuration,
        sink: Arc<dyn ActuatorSink>,
        frames: FrameHandle,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let control = shared_control();
        let controller = Controller::new(control.clone(), sink.clone());
        let (snapshot_tx, snapshot_rx) = watch::channel(PoseSnapshot::waiting());

        let pipeline = RetargetingPipeline::new(
            sink,
            control,
            configuration.change_threshold,
            configuration.call_timeout(),
            snapshot_tx,
        );
        let tick_task = Self::start_tick_task(
            configuration,
            pipeline,
            frames,
            cancel_token.clone(),
        );

        Self {
            tick_task,
            cancel_token,
            controller,
            snapshot_rx,
        }
    }

    fn start_tick_task(
        configuration: Configuration,
        mut pipeline: RetargetingPipeline,
        frames: FrameHandle,
        cancel_token: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(configuration.tick_period());
            // A slow actuator must not cause a burst of catch-up ticks.
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tracing::info!(
                period_ms = configuration.tick_period_ms,
                "Tick driver started"
            );
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Tick driver stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let frame = frames.latest();
                        pipeline.run_tick(frame.as_ref()).await;
                    }
                }
            }
        })
    }

    /// Control surface for the UI and voice collaborators.
    pub fn controller(&self) -> Controller {
        self.controller.clone()
    }

    /// Read side of the per-tick pose snapshot.
    pub fn snapshots(&self) -> watch::Receiver<PoseSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
        self.tick_task.abort();
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    sink: Option<Arc<dyn ActuatorSink>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            sink: None,
        }
    }

    // Overrides the configured tick period.
    pub fn tick_period_ms(mut self, tick_period_ms: u64) -> Self {
        self.configuration.tick_period_ms = tick_period_ms;
        self
    }

    // Overrides the configured change-gate dead band.
    pub fn change_threshold(mut self, change_threshold: f32) -> Self {
        self.configuration.change_threshold = change_threshold;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ActuatorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the coordinator and returns it with the sensor-side feed the
    /// frame source publishes into.
    pub fn build(self) -> Result<(Coordinator, FrameFeed), AppError> {
        let sink = self
            .sink
            .ok_or(AppError::Pipeline("Actuator sink not set".to_string()))?;
        let (feed, handle) = FrameFeed::new();
        Ok((Coordinator::new(self.configuration, sink, handle), feed))
    }
}
