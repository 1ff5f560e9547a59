use arbor_protocol::{FrameWriter, ProtocolMessage};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::broadcaster::Sink;

/// The production [`Sink`]: a TCP-backed framed writer. Writes are
/// serialised behind an async mutex because the broadcaster's per-frame
/// workers, the welcome dispatcher, and query handlers may all write to the
/// same connection concurrently, and the wire has no room for interleaved
/// frames.
pub struct TcpSink {
    writer: Mutex<FrameWriter>,
}

impl TcpSink {
    pub fn new(writer: FrameWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[async_trait]
impl Sink for TcpSink {
    async fn write(&self, frame: ProtocolMessage) -> Result<(), ()> {
        self.writer.lock().await.write_frame(&frame).await.map_err(|_| ())
    }
}
