//! Live-feed ingestion: a websocket client that parses wire lines into
//! records and inserts them into the store, plus a replay reader for
//! files captured by the simulator's file sink. Best effort by design: a
//! malformed or out-of-order message is dropped, never blocks the stream.

pub mod replay;

pub use replay::FileReplayReader;

use futures_util::{SinkExt, StreamExt};
use monitor_core::{MonitorError, VitalRecord};
use record_store::RecordStore;
use std::sync::Arc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Parse one wire line: `patientId|type|value|timestamp`, with `,` accepted
/// as an alternate delimiter. The value field stays a raw string; its
/// encoding is signal-specific and validated downstream by the strategies.
pub fn parse_wire_line(line: &str) -> Result<VitalRecord, MonitorError> {
    let line = line.trim();
    let delimiter = if line.contains('|') { '|' } else { ',' };
    let parts: Vec<&str> = line.split(delimiter).collect();

    if parts.len() != 4 {
        return Err(MonitorError::InvalidData(format!(
            "expected 4 fields, got {}: {line}",
            parts.len()
        )));
    }

    let patient_id: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| MonitorError::InvalidData(format!("bad patient id: {}", parts[0])))?;
    let timestamp: i64 = parts[3]
        .trim()
        .parse()
        .map_err(|_| MonitorError::InvalidData(format!("bad timestamp: {}", parts[3])))?;

    Ok(VitalRecord::new(
        patient_id,
        parts[1].trim(),
        parts[2].trim(),
        timestamp,
    ))
}

/// Websocket client that feeds the record store. Reconnects after errors,
/// shuts down on request.
pub struct FeedClient {
    url: String,
    store: Arc<RecordStore>,
    shutdown: Arc<tokio::sync::Notify>,
}

impl FeedClient {
    pub fn new(url: impl Into<String>, store: Arc<RecordStore>) -> Self {
        Self {
            url: url.into(),
            store,
            shutdown: Arc::new(tokio::sync::Notify::new()),
        }
    }

    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    pub async fn run(&self) {
        loop {
            match self.connect_and_stream().await {
                Ok(()) => {
                    tracing::info!("feed disconnected gracefully");
                    break;
                }
                Err(e) => {
                    tracing::warn!("feed error: {e}, reconnecting in 5s");
                    tokio::select! {
                        _ = tokio::time::sleep(std::time::Duration::from_secs(5)) => {}
                        _ = self.shutdown.notified() => {
                            tracing::info!("feed shutdown requested");
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn connect_and_stream(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (ws_stream, _) = connect_async(self.url.as_str()).await?;
        let (mut write, mut read) = ws_stream.split();
        tracing::info!("connected to feed at {}", self.url);

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_frame(&text);
                        }
                        Some(Ok(Message::Ping(data))) => {
                            let _ = write.send(Message::Pong(data)).await;
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::info!("feed connection closed");
                            return Ok(());
                        }
                        Some(Err(e)) => {
                            return Err(Box::new(e));
                        }
                        _ => {}
                    }
                }
                _ = self.shutdown.notified() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                }
            }
        }
    }

    /// A frame may batch several lines. Each line stands alone; one bad
    /// line never costs its neighbors.
    fn handle_frame(&self, text: &str) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            match parse_wire_line(line) {
                Ok(record) => self.store.insert(record),
                Err(e) => tracing::warn!("dropping malformed feed line: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_delimited_lines() {
        let record = parse_wire_line("123|HeartRate|97.2|1716632543000").unwrap();
        assert_eq!(record.patient_id, 123);
        assert_eq!(record.signal_type, "HeartRate");
        assert_eq!(record.value, "97.2");
        assert_eq!(record.timestamp, 1_716_632_543_000);
    }

    #[test]
    fn parses_comma_delimited_lines() {
        let record = parse_wire_line("7,Saturation,97%,1000").unwrap();
        assert_eq!(record.patient_id, 7);
        assert_eq!(record.value, "97%");
    }

    #[test]
    fn pressure_pairs_survive_as_raw_strings() {
        let record = parse_wire_line("5|BloodPressure|120/80|2000").unwrap();
        assert_eq!(record.value, "120/80");
    }

    #[test]
    fn fields_are_trimmed() {
        let record = parse_wire_line(" 9 | ECG | 0.55 | 3000 ").unwrap();
        assert_eq!(record.patient_id, 9);
        assert_eq!(record.signal_type, "ECG");
        assert_eq!(record.value, "0.55");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert!(parse_wire_line("1|HeartRate|80").is_err());
        assert!(parse_wire_line("1|HeartRate|80|100|extra").is_err());
        assert!(parse_wire_line("").is_err());
    }

    #[test]
    fn non_numeric_id_or_timestamp_is_rejected() {
        assert!(parse_wire_line("abc|HeartRate|80|100").is_err());
        assert!(parse_wire_line("1|HeartRate|80|soon").is_err());
    }

    #[test]
    fn frames_drop_bad_lines_and_keep_good_ones() {
        let store = Arc::new(RecordStore::new());
        let client = FeedClient::new("ws://localhost:9", store.clone());

        client.handle_frame("1|HeartRate|80|100\nnot-a-record\n2|Saturation|97%|200\n");

        assert_eq!(store.record_count(1), 1);
        assert_eq!(store.record_count(2), 1);
    }
}
