pub mod feed;
pub mod voice;

pub use feed::{FrameFeed, FrameHandle};
pub use voice::{RecognizedIntent, VoiceCommandHandler, VoiceIntent};
