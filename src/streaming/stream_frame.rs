use serde::Serialize;

///
/// Single chunk written to the event stream
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// Keeps idle connection alive
    Ping,
    /// JSON encoded event
    Data(String),
    /// Event that could not be encoded
    Error(String),
}

impl StreamFrame {
    pub fn from_event<T>(event: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_string(event) {
            Ok(json) => Self::Data(json),
            Err(err) => {
                tracing::warn!(%err, "failed to encode event");
                Self::Error(err.to_string())
            }
        }
    }

    pub fn encode(&self) -> String {
        match self {
            StreamFrame::Ping => "ping: \n\n".to_string(),
            StreamFrame::Data(json) => format!("data: {json}\n\n"),
            // Newline would end the frame early
            StreamFrame::Error(message) => format!("error: {}\n\n", message.replace('\n', " ")),
        }
    }
}
