use std::sync::Arc;

use arbor_protocol::ProtocolMessage;
use tracing::warn;

use crate::broadcaster::Sink;
use crate::recent_tracker::RecentTracker;

/// Sends exactly one `WELCOME` frame to a newly connected client, then
/// exits. Errors are logged, never retried.
pub struct WelcomeDispatcher {
    root_id: Arc<str>,
    recents: RecentTracker,
}

impl WelcomeDispatcher {
    pub fn new(root_id: Arc<str>, recents: RecentTracker) -> Self {
        Self { root_id, recents }
    }

    pub async fn dispatch(&self, sink: Arc<dyn Sink>) {
        let recent = self.recents.snapshot().await;
        let welcome = ProtocolMessage::welcome(self.root_id.to_string(), recent);
        if sink.write(welcome).await.is_err() {
            warn!("failed to send welcome frame to new client");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::{ChatMessage, FrameKind};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct CapturingSink {
        received: Mutex<Vec<ProtocolMessage>>,
    }

    impl CapturingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                received: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Sink for CapturingSink {
        async fn write(&self, frame: ProtocolMessage) -> Result<(), ()> {
            self.received.lock().await.push(frame);
            Ok(())
        }
    }

    fn reply(uuid: &str, parent: &str) -> ChatMessage {
        ChatMessage {
            uuid: uuid.to_string(),
            parent: parent.to_string(),
            username: "tester".to_string(),
            content: "content".to_string(),
        }
    }

    #[tokio::test]
    async fn scenario_welcome_content() {
        let recents = RecentTracker::new(3).unwrap();
        recents.add(&reply("uuid1", "")).await;
        recents.add(&reply("uuid2", "")).await;

        let dispatcher = WelcomeDispatcher::new(Arc::from("root-uuid"), recents);
        let sink = CapturingSink::new();
        dispatcher.dispatch(sink.clone()).await;

        let received = sink.received.lock().await;
        assert_eq!(received.len(), 1);
        let welcome = &received[0];
        assert_eq!(welcome.kind, FrameKind::Welcome);
        assert_eq!(welcome.root.as_deref(), Some("root-uuid"));
        assert_eq!(welcome.major, Some(0));
        assert_eq!(welcome.minor, Some(1));
        assert_eq!(welcome.recent, vec!["uuid1".to_string(), "uuid2".to_string()]);
    }
}
