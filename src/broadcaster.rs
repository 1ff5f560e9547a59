use std::collections::HashMap;
use std::sync::Arc;

use arbor_protocol::ProtocolMessage;
use async_trait::async_trait;

pub type SinkId = u64;

/// A write-only handle representing one connected client. Concurrent calls
/// to `write` on the same sink must be safe — the Broadcaster may have a
/// write worker and, independently, a query handler or the welcome
/// dispatcher writing to the same sink at once.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn write(&self, frame: ProtocolMessage) -> Result<(), ()>;
}

enum Command {
    Add(Arc<dyn Sink>),
    Remove(SinkId),
    Send(ProtocolMessage),
}

/// Single-writer fan-out hub. One owner task holds the membership; `Send`
/// spawns one worker per sink per frame so a slow or dead sink can never
/// block delivery to the others, and a failing write evicts its sink.
#[derive(Clone)]
pub struct Broadcaster {
    commands: flume::Sender<Command>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        tokio::spawn(Self::run(tx.clone(), rx));
        Self { commands: tx }
    }

    async fn run(commands: flume::Sender<Command>, inbox: flume::Receiver<Command>) {
        let mut sinks: HashMap<SinkId, Arc<dyn Sink>> = HashMap::new();
        let mut next_id: SinkId = 0;

        while let Ok(cmd) = inbox.recv_async().await {
            match cmd {
                Command::Add(sink) => {
                    sinks.insert(next_id, sink);
                    next_id += 1;
                }
                Command::Remove(id) => {
                    sinks.remove(&id);
                }
                Command::Send(frame) => {
                    for (&id, sink) in &sinks {
                        let sink = sink.clone();
                        let frame = frame.clone();
                        let evict = commands.clone();
                        tokio::spawn(async move {
                            if sink.write(frame).await.is_err() {
                                let _ = evict.send_async(Command::Remove(id)).await;
                            }
                        });
                    }
                }
            }
        }
    }

    /// Registers a sink. The Broadcaster itself assigns identity; callers
    /// never need it back, since a subsequent failed write evicts the sink
    /// on the owner's own record of which identifier it is.
    pub async fn add(&self, sink: Arc<dyn Sink>) {
        let _ = self.commands.send_async(Command::Add(sink)).await;
    }

    /// Dispatches `frame` to the membership observed at the moment the
    /// owner dequeues this request. Returns as soon as the owner has
    /// accepted the frame; does not wait for any write to complete.
    pub async fn send(&self, frame: ProtocolMessage) {
        let _ = self.commands.send_async(Command::Send(frame)).await;
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
