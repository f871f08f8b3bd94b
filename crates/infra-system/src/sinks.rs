// Report sinks - terminal delivery of retrieved messages

use async_trait::async_trait;
use chrono::Utc;

use hostpulse_core::domain::Message;
use hostpulse_core::port::{Sink, SinkError};

/// Prints each message as a plain line on stdout
pub struct ConsoleSink;

#[async_trait]
impl Sink for ConsoleSink {
    async fn deliver(&self, message: &Message) -> Result<(), SinkError> {
        println!("{}", message);
        Ok(())
    }
}

/// Prints each message as one JSON object per line, with a UTC
/// timestamp, for log-shipper friendly output
pub struct JsonLinesSink;

#[async_trait]
impl Sink for JsonLinesSink {
    async fn deliver(&self, message: &Message) -> Result<(), SinkError> {
        let line = serde_json::json!({
            "ts": Utc::now().to_rfc3339(),
            "message": message.as_str(),
        });
        println!("{}", line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sink_accepts_message() {
        let sink = ConsoleSink;
        sink.deliver(&Message::new("memory: total 1 MB")).await.unwrap();
    }

    #[tokio::test]
    async fn test_json_sink_accepts_message() {
        let sink = JsonLinesSink;
        sink.deliver(&Message::new("disk: total 1 MB")).await.unwrap();
    }
}
