//! Events consumed by the hub and the handle used to submit them.

use hubchat_proto::Command;
use tokio::sync::mpsc;

use crate::error::HubError;
use crate::state::client::{ClientHandle, ClientId};

/// Everything the hub reacts to, in one queue.
///
/// A single queue gives one total order across registrations,
/// disconnects and commands from every connection.
#[derive(Debug)]
pub enum HubEvent {
    /// A client asked for a username.
    Register {
        client: ClientHandle,
        username: String,
    },
    /// A connection ended, cleanly or not.
    Deregister { id: ClientId },
    /// Any other parsed command.
    Command {
        client: ClientHandle,
        command: Command,
    },
}

impl HubEvent {
    /// Wrap a parsed command, routing REG to [`HubEvent::Register`].
    pub fn from_command(client: ClientHandle, command: Command) -> Self {
        match command {
            Command::Reg { username } => HubEvent::Register { client, username },
            command => HubEvent::Command { client, command },
        }
    }
}

/// Sending side of the hub queue, cloned into every connection.
#[derive(Debug, Clone)]
pub struct HubHandle {
    tx: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    pub(super) fn new(tx: mpsc::Sender<HubEvent>) -> Self {
        Self { tx }
    }

    /// Queue an event, waiting while the hub queue is full.
    pub async fn submit(&self, event: HubEvent) -> Result<(), HubError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| HubError::HubUnavailable)
    }
}
