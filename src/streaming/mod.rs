//!
//! Server pushed `text/event-stream` responses fed by broker subscriptions
//!

mod event_stream;
mod stream_frame;

pub use event_stream::*;
pub use stream_frame::*;
