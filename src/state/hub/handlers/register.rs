//! REG and disconnect handling.

use hubchat_proto::Reply;
use tracing::{debug, info};

use super::super::Hub;
use crate::error::{HandlerResult, HubError};
use crate::state::client::{ClientHandle, ClientId};

impl Hub {
    pub(in crate::state::hub) fn handle_register(
        &mut self,
        client: &ClientHandle,
        username: String,
    ) -> HandlerResult {
        if let Some(current) = self.names.get(&client.id()) {
            return Err(HubError::AlreadyRegistered(current.clone()));
        }

        if self.users.contains_key(&username) {
            info!(client = %client.id(), %username, "Registration denied: name taken");
            return Err(HubError::UsernameTaken(username));
        }

        self.users.insert(username.clone(), client.clone());
        self.names.insert(client.id(), username.clone());
        info!(client = %client.id(), addr = %client.addr(), %username, "Client registered");

        client.send(Reply::notice(format!("REG OK: registered as {}", username)));
        Ok(())
    }

    pub(in crate::state::hub) fn handle_deregister(&mut self, id: ClientId) {
        let Some(username) = self.names.remove(&id) else {
            debug!(client = %id, "Unregistered client disconnected");
            return;
        };
        self.users.remove(&username);

        let mut left = 0;
        for channel in self.channels.values_mut() {
            if channel.remove_member(id) {
                debug!(client = %id, channel = %channel.name(), "Removed from channel");
                left += 1;
            }
        }

        info!(client = %id, %username, channels = left, "Client disconnected");
    }
}
