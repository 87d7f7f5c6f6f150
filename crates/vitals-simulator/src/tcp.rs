use crate::sinks::{format_wire_line, OutputSink};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Streams wire lines to every connected TCP client.
///
/// The listener and per-client writers run on background tasks; `emit` just
/// pushes into a broadcast channel. A slow or absent client misses lines
/// rather than blocking generation.
pub struct TcpSink {
    tx: broadcast::Sender<String>,
}

impl TcpSink {
    pub async fn bind(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port)).await?;
        tracing::info!("TCP sink listening on port {port}");

        let (tx, _) = broadcast::channel(1024);
        let accept_tx = tx.clone();

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        tracing::info!("TCP client connected: {addr}");
                        let rx = accept_tx.subscribe();
                        tokio::spawn(serve_client(stream, rx));
                    }
                    Err(e) => {
                        tracing::warn!("TCP accept failed: {e}");
                    }
                }
            }
        });

        Ok(Self { tx })
    }
}

async fn serve_client(mut stream: tokio::net::TcpStream, mut rx: broadcast::Receiver<String>) {
    loop {
        match rx.recv().await {
            Ok(line) => {
                if stream.write_all(line.as_bytes()).await.is_err()
                    || stream.write_all(b"\n").await.is_err()
                {
                    tracing::info!("TCP client disconnected");
                    return;
                }
            }
            // Fell behind the channel; skip the gap and keep streaming.
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

impl OutputSink for TcpSink {
    fn emit(&self, patient_id: u32, timestamp: i64, label: &str, value: &str) {
        let _ = self.tx.send(format_wire_line(patient_id, timestamp, label, value));
    }
}
