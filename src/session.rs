use std::sync::Arc;

use arbor_protocol::{FrameKind, FrameReader, IdGenerator, ProtocolMessage};
use tracing::{error, info, warn};

use crate::broadcaster::{Broadcaster, Sink};
use crate::error::ArborError;
use crate::message_store::MessageStore;
use crate::recent_tracker::RecentTracker;
use crate::sink::TcpSink;

/// Per-connection reader loop. Reads one frame at a time and spawns an
/// independent handler per frame; handlers run concurrently with the
/// reader and with each other and carry no ordering guarantee relative to
/// one another, even for frames from the same client.
pub struct ClientSession {
    reader: FrameReader,
    sink: Arc<TcpSink>,
    store: Arc<MessageStore>,
    recents: RecentTracker,
    broadcaster: Broadcaster,
    id_gen: Arc<dyn IdGenerator>,
}

impl ClientSession {
    pub fn new(
        reader: FrameReader,
        sink: Arc<TcpSink>,
        store: Arc<MessageStore>,
        recents: RecentTracker,
        broadcaster: Broadcaster,
        id_gen: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            reader,
            sink,
            store,
            recents,
            broadcaster,
            id_gen,
        }
    }

    pub async fn run(mut self) {
        loop {
            let frame = match self.reader.read_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    info!("client closed the connection");
                    return;
                }
                Err(err) => {
                    error!(%err, "framed read failed, closing session");
                    return;
                }
            };

            match frame.kind {
                FrameKind::Query => self.spawn_query(frame),
                FrameKind::NewMessage => self.spawn_new_message(frame),
                FrameKind::Welcome => {
                    warn!(kind = "WELCOME", "unrecognised inbound frame type, closing session");
                    return;
                }
                FrameKind::Unknown(ref tag) => {
                    warn!(%tag, "unrecognised inbound frame type, closing session");
                    return;
                }
            }
        }
    }

    fn spawn_query(&self, frame: ProtocolMessage) {
        let store = self.store.clone();
        let sink = self.sink.clone();
        tokio::spawn(async move {
            let Some(chat) = frame.chat else {
                return;
            };
            match store.get(&chat.uuid) {
                Some(found) => {
                    let reply = ProtocolMessage::new_message(found);
                    let _ = sink.write(reply).await;
                }
                None => warn!(uuid = %chat.uuid, "query for unknown identifier, dropping"),
            }
        });
    }

    fn spawn_new_message(&self, frame: ProtocolMessage) {
        let store = self.store.clone();
        let recents = self.recents.clone();
        let broadcaster = self.broadcaster.clone();
        let id_gen = self.id_gen.clone();
        tokio::spawn(async move {
            let Some(mut chat) = frame.chat else {
                return;
            };
            match id_gen.generate() {
                Ok(id) => chat.uuid = id,
                Err(source) => {
                    let err = ArborError::IdAssignment(source);
                    warn!(%err, "broadcasting message in its current state");
                }
            }

            store.add(chat.clone());
            recents.add(&chat).await;

            let outbound = ProtocolMessage::new_message(chat);
            broadcaster.send(outbound).await;
        });
    }
}
