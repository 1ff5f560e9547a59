use arbor_protocol::ChatMessage;
use tokio::sync::oneshot;

use crate::error::ArborError;
use crate::leaf_list::LeafList;

enum Command {
    Add { parent: String, uuid: String },
    Snapshot { reply: oneshot::Sender<Vec<String>> },
}

/// Concurrency-safe wrapper around a [`LeafList`]: a single owner task
/// serialises every mutation and snapshot read, so the subtle
/// FIFO-under-replacement rule only ever runs single-threaded.
#[derive(Clone)]
pub struct RecentTracker {
    commands: flume::Sender<Command>,
}

impl RecentTracker {
    /// Spawns the owner task. Fails with `InvalidCapacity` without starting
    /// the task if `capacity < 1`.
    pub fn new(capacity: i64) -> Result<Self, ArborError> {
        let leaves = LeafList::new(capacity)?;
        let (tx, rx) = flume::unbounded();
        tokio::spawn(Self::run(leaves, rx));
        Ok(Self { commands: tx })
    }

    async fn run(mut leaves: LeafList, commands: flume::Receiver<Command>) {
        while let Ok(cmd) = commands.recv_async().await {
            match cmd {
                Command::Add { parent, uuid } => leaves.add_or_replace(&parent, uuid),
                Command::Snapshot { reply } => {
                    let _ = reply.send(leaves.elements());
                }
            }
        }
    }

    /// Equivalent to `leaves.AddOrReplace(msg.parent, msg.uuid)`. Blocks
    /// until the owner task has accepted the request.
    pub async fn add(&self, msg: &ChatMessage) {
        let _ = self
            .commands
            .send_async(Command::Add {
                parent: msg.parent.clone(),
                uuid: msg.uuid.clone(),
            })
            .await;
    }

    /// A copy of the current elements, taken at a point serialised with all
    /// prior `add` calls.
    pub async fn snapshot(&self) -> Vec<String> {
        let (reply, rx) = oneshot::channel();
        if self
            .commands
            .send_async(Command::Snapshot { reply })
            .await
            .is_err()
        {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }
}
