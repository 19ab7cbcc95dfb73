use tokio::sync::watch;

use crate::common::BodyFrame;

/// Single-slot, last-write-wins frame feed between the sensor callback and
/// the tick driver.
///
/// The sensor publishes at its own rate; the tick reads whatever is newest
/// without blocking. `None` means no frame has arrived yet, which is
/// distinct from a frame whose subject is untracked.
pub struct FrameFeed {
    tx: watch::Sender<Option<BodyFrame>>,
}

impl FrameFeed {
    pub fn new() -> (FrameFeed, FrameHandle) {
        let (tx, rx) = watch::channel(None);
        (FrameFeed { tx }, FrameHandle { rx })
    }

    /// Replaces the current frame. Frames the tick never saw are simply
    /// overwritten; dropping them keeps the pipeline real time.
    pub fn publish(&self, frame: BodyFrame) {
        self.tx.send_replace(Some(frame));
    }
}

/// Tick-side reader of the feed.
#[derive(Clone)]
pub struct FrameHandle {
    rx: watch::Receiver<Option<BodyFrame>>,
}

impl FrameHandle {
    /// Newest frame, if any. Non-blocking; repeated calls between sensor
    /// updates return the same frame.
    pub fn latest(&self) -> Option<BodyFrame> {
        self.rx.borrow().clone()
    }
}
