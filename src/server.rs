use std::sync::Arc;

use anyhow::Context;
use arbor_protocol::{ChatMessage, FrameReader, FrameWriter, IdGenerator, UuidGenerator};
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};

use crate::broadcaster::Broadcaster;
use crate::config::Config;
use crate::error::ArborError;
use crate::message_store::MessageStore;
use crate::recent_tracker::RecentTracker;
use crate::session::ClientSession;
use crate::sink::TcpSink;
use crate::welcome::WelcomeDispatcher;

/// Boots the singletons, binds the listener, and runs the accept loop
/// forever. The only way out is an unrecoverable bind failure.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(MessageStore::new());
    let broadcaster = Broadcaster::new();
    let recents = RecentTracker::new(config.recent_size as i64)
        .context("failed to initialize recent-leaves tracker")?;
    let id_gen: Arc<dyn IdGenerator> = Arc::new(UuidGenerator);

    let root_id = match &config.root_id {
        Some(id) => id.clone(),
        None => id_gen
            .generate()
            .context("failed to assign the root message's identifier")?,
    };
    let root = ChatMessage {
        uuid: root_id.clone(),
        parent: String::new(),
        username: config.root_username.clone(),
        content: config.root_content.clone(),
    };
    // The root is stored but deliberately never handed to the RecentTracker:
    // it isn't a reply to anything, so it can never be a "leaf" of the tree.
    store.add(root);
    info!(root_id = %root_id, "root message created");

    let listener = TcpListener::bind(&config.bind_addr).await.map_err(|source| {
        ArborError::BindFailure {
            addr: config.bind_addr.clone(),
            source,
        }
    })?;
    info!(addr = %config.bind_addr, "server listening");

    let root_id: Arc<str> = Arc::from(root_id.as_str());

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(%err, "accept failed, continuing");
                continue;
            }
        };

        if let Err(err) = socket.set_nodelay(true) {
            error!(%err, "failed to set TCP_NODELAY, continuing anyway");
        }

        let (read_half, write_half) = socket.into_split();
        let reader = FrameReader::new(read_half);
        let writer = FrameWriter::new(write_half);
        let sink = Arc::new(TcpSink::new(writer));

        broadcaster.add(sink.clone()).await;

        let welcome = WelcomeDispatcher::new(root_id.clone(), recents.clone());
        let welcome_sink = sink.clone();
        tokio::spawn(async move { welcome.dispatch(welcome_sink).await });

        let session = ClientSession::new(
            reader,
            sink,
            store.clone(),
            recents.clone(),
            broadcaster.clone(),
            id_gen.clone(),
        );
        let span = info_span!("session", %peer);
        tokio::spawn(session.run().instrument(span));
    }
}
