//! The hub: single owner of all cross-client state.
//!
//! The hub owns the username registry and every [`Channel`]. It runs as one
//! task draining one bounded queue of [`HubEvent`]s, applying each event to
//! completion before looking at the next. Nothing in here awaits: replies go
//! out through [`ClientHandle::send`], which never blocks.
//!
//! # Architecture
//!
//! ```text
//! Connection₁ ─┐                         ┌→ outbound queue₁ → writer₁
//! Connection₂ ─┼→ [HubEvent queue] → Hub ┼→ outbound queue₂ → writer₂
//! Connection₃ ─┘                         └→ outbound queue₃ → writer₃
//! ```

use std::collections::{BTreeMap, HashMap};

use hubchat_proto::{Command, CommandKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::channel::Channel;
use super::client::{ClientHandle, ClientId};
use crate::error::HandlerResult;
use crate::telemetry::spans;

mod event;
mod handlers;

pub use event::{HubEvent, HubHandle};

/// The hub state machine.
#[derive(Debug, Default)]
pub struct Hub {
    /// username → client, present only after a successful REG.
    users: HashMap<String, ClientHandle>,
    /// Reverse index of `users`.
    names: HashMap<ClientId, String>,
    channels: BTreeMap<String, Channel>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a hub task with a queue of `capacity` events.
    pub fn spawn(capacity: usize) -> (HubHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let task = tokio::spawn(Self::new().run(rx));
        (HubHandle::new(tx), task)
    }

    /// The main hub loop. Returns once every [`HubHandle`] is dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<HubEvent>) {
        info!("Hub started");
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
        }
        info!(
            users = self.user_count(),
            channels = self.channel_count(),
            "Hub stopped"
        );
    }

    /// Apply one event to completion.
    pub fn handle_event(&mut self, event: HubEvent) {
        match event {
            HubEvent::Register { client, username } => {
                let span = spans::command(CommandKind::Reg, client.id(), Some(username.as_str()));
                let _enter = span.enter();
                let result = self.handle_register(&client, username);
                Self::finish(&client, result);
            }
            HubEvent::Deregister { id } => self.handle_deregister(id),
            HubEvent::Command { client, command } => {
                let span = spans::command(command.kind(), client.id(), command.target());
                let _enter = span.enter();
                let result = self.dispatch(&client, command);
                Self::finish(&client, result);
            }
        }
    }

    fn dispatch(&mut self, client: &ClientHandle, command: Command) -> HandlerResult {
        match command {
            Command::Reg { username } => self.handle_register(client, username),
            Command::Join { channel } => self.handle_join(client, channel),
            Command::Leave { channel } => self.handle_leave(client, &channel),
            Command::Msg { recipient, body } => self.handle_msg(client, recipient, body),
            Command::Files { channel } => self.handle_files(client, &channel),
            Command::Send {
                channel,
                filename,
                body,
            } => self.handle_send(client, &channel, filename, body),
            Command::Get { channel, filename } => self.handle_get(client, &channel, &filename),
            Command::Chns => self.handle_chns(client),
            Command::Usrs => self.handle_usrs(client),
        }
    }

    fn finish(client: &ClientHandle, result: HandlerResult) {
        if let Err(err) = result {
            debug!(code = err.error_code(), error = %err, "Command rejected");
            client.send(err.to_reply());
        }
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of channels, empty ones included.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::state::client::test_support::{drain, handle};
    use hubchat_proto::Reply;

    /// A connected test client: its handle plus its observable outbound queue.
    pub struct Peer {
        pub client: ClientHandle,
        pub rx: mpsc::Receiver<Reply>,
    }

    impl Peer {
        pub fn new(id: u64) -> Self {
            Self::with_capacity(id, 64)
        }

        /// A peer whose outbound queue holds at most `capacity` lines.
        pub fn with_capacity(id: u64, capacity: usize) -> Self {
            let (client, rx) = handle(id, capacity);
            Self { client, rx }
        }

        /// Parse `line` and feed it to the hub as this client.
        pub fn run(&self, hub: &mut Hub, line: &str) {
            let command = Command::parse(line.as_bytes()).expect("test command must parse");
            hub.handle_event(HubEvent::from_command(self.client.clone(), command));
        }

        pub fn lines(&mut self) -> Vec<String> {
            drain(&mut self.rx)
        }

        /// Register under `name` and discard the confirmation.
        pub fn register(&mut self, hub: &mut Hub, name: &str) {
            self.run(hub, &format!("REG {}", name));
            assert_eq!(self.lines(), vec![format!("->> REG OK: registered as {}\n", name)]);
        }

        pub fn disconnect(&self, hub: &mut Hub) {
            hub.handle_event(HubEvent::Deregister {
                id: self.client.id(),
            });
        }
    }
}
